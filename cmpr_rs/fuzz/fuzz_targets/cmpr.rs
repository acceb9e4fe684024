#![no_main]

extern crate libfuzzer_sys;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 8]| {
    let mut actual = [0u8; 16 * 4];
    cmpr_rs::cmpr(&data, &mut actual, 16);

    // The byte order conversion is its own inverse.
    let bc1 = cmpr_rs::bc1_from_cmpr(&data);
    assert_eq!(data, cmpr_rs::cmpr_from_bc1(&bc1));

    // Only the transparent color can have zero alpha.
    let c0 = u16::from_le_bytes([bc1[0], bc1[1]]);
    let c1 = u16::from_le_bytes([bc1[2], bc1[3]]);
    if c0 > c1 {
        assert!(actual.chunks_exact(4).all(|p| p[3] == 255));
    }
});
