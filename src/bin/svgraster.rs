//! Command line tool that converts SVG document into PNG image
#![deny(warnings)]

use std::env;
use svgraster::*;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    output_file: String,
    options: ConvertOptions,
    json: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            output_file: String::new(),
            options: ConvertOptions::default(),
            json: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "svgraster".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-bg" => {
                    result.options.background = args
                        .next()
                        .ok_or("-bg requires color #rrggbb or name argument")?
                        .parse()?;
                }
                "-j" => {
                    result.json = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        2 => result.output_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        let required = if result.json { 1 } else { 2 };
        if positional < required {
            eprintln!("Converts SVG document into PNG image");
            eprintln!("\nUSAGE:");
            eprintln!("    {} [-bg <color>] [-j] <file.svg> <out.png>", cmd);
            eprintln!("\nARGS:");
            eprintln!("    -bg <color>        background color (default: white)");
            eprintln!("    -j                 print built shapes as JSON instead of rendering");
            eprintln!("    <file.svg>         source document");
            eprintln!("    <out.png>          image rendered in the PNG format");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    if args.json {
        let doc = Document::load(&args.input_file)?;
        println!("{}", doc.to_json()?);
        return Ok(());
    }
    convert_with(&args.input_file, &args.output_file, &args.options)?;
    Ok(())
}
