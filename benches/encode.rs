use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minitel_gif::Encoder;
use pix::rgb::SRgba8;

/// Stripes and blocks, roughly like a Minitel page
fn page() -> Vec<SRgba8> {
    (0..320 * 250)
        .map(|i| {
            let x = i % 320;
            let y = i / 320;
            let v = ((x / 8) ^ (y / 10)) as u8;
            let a = if y % 50 < 2 { 0 } else { 255 };
            SRgba8::new(v & 4, v & 2, v & 1, a)
        })
        .collect()
}

fn encode_page(crit: &mut Criterion) {
    let pixels = page();
    crit.bench_function("encode_page", |b| {
        b.iter(|| {
            let mut enc = Encoder::default();
            enc.add(black_box(&pixels), 320, 250, 40).unwrap();
            black_box(enc.save().unwrap());
        })
    });
}

criterion_group!(benches, encode_page);
criterion_main!(benches);
