use std::str::FromStr;

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: img2bti <input> <output.bti> <I4|Rgb5a3|Rgba32|Cmpr>");
        return;
    }

    // Don't assume the image comes with an alpha channel.
    let image = image::open(&args[1]).unwrap().to_rgba8();

    let format = gxtex::TextureFormat::from_str(&args[3]).unwrap();

    let start = std::time::Instant::now();
    let bti = gxtex::bti_from_image(&image, format).unwrap();
    println!("Encoded data in {:?}", start.elapsed());

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&args[2]).unwrap());
    bti.write(&mut writer).unwrap();
}
