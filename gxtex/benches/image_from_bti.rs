use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gxtex::{image_from_bti, Bti, Header, Palette, PaletteFormat, TextureFormat};

fn criterion_benchmark(c: &mut Criterion) {
    for format in [
        TextureFormat::I8,
        TextureFormat::Rgb5a3,
        TextureFormat::Rgba32,
        TextureFormat::C8,
        TextureFormat::Cmpr,
    ] {
        let mut header = Header::new(format, 512, 512);
        header.palette_format = PaletteFormat::Rgb565;
        header.palette_entry_count = 256;

        let size = format.encoded_size(512, 512).unwrap();
        let bti = Bti {
            header,
            palette: Palette::new(vec![0xAB; 256 * 2]),
            data: (0..size).map(|i| (i % 251) as u8).collect(),
        };

        c.bench_function(&format!("image_from_bti {format:?}"), |b| {
            b.iter(|| image_from_bti(black_box(&bti)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
