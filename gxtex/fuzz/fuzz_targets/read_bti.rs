#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(bti) = gxtex::Bti::read(&mut std::io::Cursor::new(data), 0, 0) {
        let _result = bti.decode();

        let mut writer = Vec::new();
        bti.write(&mut writer).unwrap();
    }
});
