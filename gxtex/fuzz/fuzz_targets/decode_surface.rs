#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|surface: gxtex::Surface<Vec<u8>>| {
    if let Ok(pixels) = surface.decode() {
        // Unsupported formats decode to empty data.
        let size = pixels.width as usize * pixels.height as usize * pixels.layout.bytes_per_pixel();
        assert!(pixels.data.is_empty() || pixels.data.len() == size);
    }
});
