use std::str::FromStr;

fn main() {
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: bti2img <input.bti> <output> [Png|Tga] [index]");
        return;
    }

    let format = args
        .get(3)
        .map(|s| gxtex::ExportFormat::from_str(s).unwrap())
        .unwrap_or_default();
    let index = args.get(4).map(|s| s.parse().unwrap()).unwrap_or(0);

    let mut reader = std::io::BufReader::new(std::fs::File::open(&args[1]).unwrap());
    let bti = gxtex::Bti::read(&mut reader, 0, index).unwrap();

    let start = std::time::Instant::now();
    let image = gxtex::image_from_bti(&bti).unwrap();
    println!(
        "Decoded {:?} data in {:?}",
        bti.header.format,
        start.elapsed()
    );

    let path = std::path::Path::new(&args[2]).with_extension(format.extension());
    image.save_with_format(path, format.into()).unwrap();
}
