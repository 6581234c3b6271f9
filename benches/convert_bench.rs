#![deny(warnings)]
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use svgraster::{Color, Document};

const SIZE: u32 = 512;

fn many_shapes_document(count: usize) -> String {
    let mut rnd = Rnd::default();
    let mut doc = format!(r#"<svg width="{SIZE}" height="{SIZE}">"#);
    doc.push_str("<g id=\"cell\">");
    for index in 0..count {
        let (x, y) = (rnd.coord(), rnd.coord());
        let color = rnd.color();
        let shape = match index % 4 {
            0 => format!(r#"<circle cx="{x}" cy="{y}" r="{}" fill="{color}"/>"#, rnd.coord() / 16),
            1 => format!(
                r#"<rect x="{x}" y="{y}" width="{}" height="{}" fill="{color}" transform="rotate(90)" transform-origin="256 256"/>"#,
                rnd.coord() / 8,
                rnd.coord() / 8
            ),
            2 => format!(
                r#"<polygon points="{x},{y} {},{} {},{}" fill="{color}"/>"#,
                rnd.coord(),
                rnd.coord(),
                rnd.coord(),
                rnd.coord()
            ),
            _ => format!(
                r#"<polyline points="{x},{y} {},{} {},{}" stroke="{color}" transform="translate(3,4)"/>"#,
                rnd.coord(),
                rnd.coord(),
                rnd.coord(),
                rnd.coord()
            ),
        };
        doc.push_str(&shape);
    }
    doc.push_str("</g>");
    for _ in 0..4 {
        doc.push_str(&format!(
            r##"<use href="#cell" transform="translate({},{})"/>"##,
            rnd.coord() / 4,
            rnd.coord() / 4
        ));
    }
    doc.push_str("</svg>");
    doc
}

fn convert_benchmark(c: &mut Criterion) {
    let count = 1024;
    let text = many_shapes_document(count);
    let doc = Document::parse(&text).expect("valid document");

    let mut group = c.benchmark_group("many-shapes");
    group.throughput(Throughput::Elements(count as u64));
    group.bench_function("build", |b| {
        b.iter_with_large_drop(|| Document::parse(black_box(&text)))
    });
    group.bench_function("render", |b| {
        b.iter_with_large_drop(|| doc.render(Color::WHITE))
    });
    group.finish();
}

criterion_group!(benches, convert_benchmark);
criterion_main!(benches);

/// Very simple linear congruential generator
#[derive(Default)]
struct Rnd {
    state: u32,
}

impl Rnd {
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(214_013).wrapping_add(2_531_011) & 0x7fffffff;
        self.state >> 16
    }

    fn coord(&mut self) -> u32 {
        self.step() % SIZE
    }

    fn color(&mut self) -> Color {
        Color::new(self.step() as u8, self.step() as u8, self.step() as u8)
    }
}
