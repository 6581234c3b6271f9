use crate::{Color, ConvertError, Document};
use std::path::Path;

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Color of the pixels not covered by any shape
    pub background: Color,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
        }
    }
}

/// Convert document at `input` into PNG image at `output`
///
/// Output file is only created once the whole document was built and
/// rendered, so a failed conversion never leaves a partial image behind.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), ConvertError> {
    convert_with(input, output, &ConvertOptions::default())
}

/// Same as [`convert`] but with explicit options
pub fn convert_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<(), ConvertError> {
    let input = input.as_ref();
    let doc = tracing::debug_span!("[load]", input = %input.display())
        .in_scope(|| Document::load(input))?;
    tracing::debug!(
        "[load:size] {}x{} with {} top level shapes",
        doc.width(),
        doc.height(),
        doc.shapes().len()
    );
    let raster = tracing::debug_span!("[render]").in_scope(|| doc.render(options.background));
    let output = output.as_ref();
    tracing::debug_span!("[save]", output = %output.display()).in_scope(|| raster.save(output))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("svgraster-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_convert() -> Result<(), Box<dyn std::error::Error>> {
        let input = temp_path("convert.svg");
        let output = temp_path("convert.png");
        std::fs::write(
            &input,
            r##"<svg width="8" height="4">
                <rect x="0" y="0" width="4" height="4" fill="#102030"/>
            </svg>"##,
        )?;
        convert(&input, &output)?;

        let decoder = png::Decoder::new(std::fs::File::open(&output)?);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        assert_eq!((info.width, info.height), (8, 4));
        assert_eq!(&buf[..3], &[0x10, 0x20, 0x30]);
        assert_eq!(&buf[21..24], &[255, 255, 255]);

        std::fs::remove_file(input)?;
        std::fs::remove_file(output)?;
        Ok(())
    }

    #[test]
    fn test_convert_background() -> Result<(), Box<dyn std::error::Error>> {
        let input = temp_path("background.svg");
        let output = temp_path("background.png");
        std::fs::write(&input, r#"<svg width="2" height="2"/>"#)?;
        let options = ConvertOptions {
            background: Color::BLACK,
        };
        convert_with(&input, &output, &options)?;

        let decoder = png::Decoder::new(std::fs::File::open(&output)?);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut buf)?;
        assert!(buf.iter().all(|byte| *byte == 0));

        std::fs::remove_file(input)?;
        std::fs::remove_file(output)?;
        Ok(())
    }

    #[test]
    fn test_convert_failure_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let input = temp_path("failure.svg");
        let output = temp_path("failure.png");
        std::fs::write(
            &input,
            r##"<svg width="2" height="2"><use href="#missing"/></svg>"##,
        )?;
        let result = convert(&input, &output);
        assert!(matches!(result, Err(ConvertError::UnresolvedReference(_))));
        assert!(!output.exists());

        let result = convert(temp_path("does-not-exist.svg"), &output);
        assert!(result.err().is_some_and(|error| error.is_document_load()));
        assert!(!output.exists());

        std::fs::remove_file(input)?;
        Ok(())
    }

    #[test]
    fn test_convert_output_error() -> Result<(), Box<dyn std::error::Error>> {
        let input = temp_path("output-error.svg");
        std::fs::write(&input, r#"<svg width="2" height="2"/>"#)?;
        let output = temp_path("missing-directory").join("out.png");
        let result = convert(&input, &output);
        assert!(matches!(result, Err(ConvertError::Io(_))));
        assert!(!result.err().is_some_and(|error| error.is_document_load()));

        std::fs::remove_file(input)?;
        Ok(())
    }
}
