#![no_main]

use libfuzzer_sys::fuzz_target;

type Input = (gxtex::SurfaceRgba8<Vec<u8>>, gxtex::TextureFormat);

fuzz_target!(|input: Input| {
    let (surface, format) = input;
    if let Ok(encoded) = surface.encode(format) {
        assert_eq!(
            format.encoded_size(surface.width, surface.height),
            Some(encoded.data.len())
        );
    }
});
