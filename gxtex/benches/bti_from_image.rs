use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gxtex::{bti_from_image, TextureFormat};
use image::RgbaImage;

fn criterion_benchmark(c: &mut Criterion) {
    let image = RgbaImage::from_fn(512, 512, |x, y| {
        image::Rgba([x as u8, y as u8, (x ^ y) as u8, if x < 256 { 255 } else { 0 }])
    });

    for format in [
        TextureFormat::I4,
        TextureFormat::Rgb5a3,
        TextureFormat::Rgba32,
        TextureFormat::Cmpr,
    ] {
        c.bench_function(&format!("bti_from_image {format:?}"), |b| {
            b.iter(|| bti_from_image(black_box(&image), black_box(format)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
