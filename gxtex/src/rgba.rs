use self::convert::*;

pub mod convert;

// Most 16-bit formats are stored big endian.
// The channels are listed from most to least significant bit.

/// Decode a RGB565 value with opaque alpha.
pub fn rgba8_from_rgb565(value: u16) -> [u8; 4] {
    // The red channel is the top 5 bits of a 16-bit value.
    // Masking additional high bits like some tools do has no effect.
    let r = ((value >> 11) & 0x1F) as u8;
    let g = ((value >> 5) & 0x3F) as u8;
    let b = (value & 0x1F) as u8;
    [
        unorm5_to_unorm8(r),
        unorm6_to_unorm8(g),
        unorm5_to_unorm8(b),
        255u8,
    ]
}

/// Decode a value that is either RGB555 with the top bit set or ARGB3444.
pub fn rgba8_from_rgb5a3(value: u16) -> [u8; 4] {
    if value & 0x8000 != 0 {
        let r = ((value >> 10) & 0x1F) as u8;
        let g = ((value >> 5) & 0x1F) as u8;
        let b = (value & 0x1F) as u8;
        [
            unorm5_to_unorm8(r),
            unorm5_to_unorm8(g),
            unorm5_to_unorm8(b),
            255u8,
        ]
    } else {
        let a = ((value >> 12) & 0x7) as u8;
        let r = ((value >> 8) & 0xF) as u8;
        let g = ((value >> 4) & 0xF) as u8;
        let b = (value & 0xF) as u8;
        [
            unorm4_to_unorm8(r),
            unorm4_to_unorm8(g),
            unorm4_to_unorm8(b),
            unorm3_to_unorm8(a),
        ]
    }
}

/// Decode an 8-bit alpha and 8-bit intensity pair.
pub fn rgba8_from_ia8(alpha: u8, intensity: u8) -> [u8; 4] {
    [intensity, intensity, intensity, alpha]
}

/// Decode a byte with alpha in the high nibble and intensity in the low nibble.
pub fn rgba8_from_ia4(value: u8) -> [u8; 4] {
    let i = unorm4_to_unorm8(value & 0xF);
    let a = unorm4_to_unorm8(value >> 4);
    [i, i, i, a]
}

pub fn rgba8_from_i8(intensity: u8) -> [u8; 4] {
    [intensity, intensity, intensity, 255u8]
}

pub fn rgba8_from_i4(intensity: u8) -> [u8; 4] {
    rgba8_from_i8(unorm4_to_unorm8(intensity))
}

pub fn rgb565_from_rgba8([r, g, b, _]: [u8; 4]) -> u16 {
    ((unorm8_to_unorm5(r) as u16) << 11)
        | ((unorm8_to_unorm6(g) as u16) << 5)
        | unorm8_to_unorm5(b) as u16
}

pub fn rgb5a3_from_rgba8([r, g, b, a]: [u8; 4]) -> u16 {
    // Alpha values that would round to fully opaque use the higher precision RGB555.
    let a = unorm8_to_unorm3(a);
    if a == 7 {
        0x8000
            | ((unorm8_to_unorm5(r) as u16) << 10)
            | ((unorm8_to_unorm5(g) as u16) << 5)
            | unorm8_to_unorm5(b) as u16
    } else {
        ((a as u16) << 12)
            | ((unorm8_to_unorm4(r) as u16) << 8)
            | ((unorm8_to_unorm4(g) as u16) << 4)
            | unorm8_to_unorm4(b) as u16
    }
}

/// Calculate 8-bit luma using the BT.601 weights scaled to sum to 256.
pub fn intensity_from_rgba8([r, g, b, _]: [u8; 4]) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29 + 128) >> 8) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb565_channels() {
        assert_eq!([255, 0, 0, 255], rgba8_from_rgb565(0xF800));
        assert_eq!([0, 255, 0, 255], rgba8_from_rgb565(0x07E0));
        assert_eq!([0, 0, 255, 255], rgba8_from_rgb565(0x001F));
        assert_eq!([0, 0, 0, 255], rgba8_from_rgb565(0x0000));
    }

    #[test]
    fn rgb5a3_opaque() {
        assert_eq!([0, 0, 0, 255], rgba8_from_rgb5a3(0x8000));
        assert_eq!([255, 255, 255, 255], rgba8_from_rgb5a3(0xFFFF));
        assert_eq!([255, 0, 0, 255], rgba8_from_rgb5a3(0xFC00));
    }

    #[test]
    fn rgb5a3_transparent() {
        assert_eq!([0, 0, 0, 0], rgba8_from_rgb5a3(0x0000));
        assert_eq!([0x11, 0x22, 0x33, 0xFF], rgba8_from_rgb5a3(0x7123));
        assert_eq!([255, 255, 255, 109], rgba8_from_rgb5a3(0x3FFF));
    }

    #[test]
    fn rgb5a3_inverse() {
        // Opaque ARGB3444 values are encoded as RGB555 instead.
        for value in 0..=u16::MAX {
            let rgba = rgba8_from_rgb5a3(value);
            if value & 0xF000 == 0x7000 {
                assert_eq!(0x8000, rgb5a3_from_rgba8(rgba) & 0x8000);
            } else {
                assert_eq!(value, rgb5a3_from_rgba8(rgba));
            }
        }
    }

    #[test]
    fn rgb565_inverse() {
        for value in 0..=u16::MAX {
            assert_eq!(value, rgb565_from_rgba8(rgba8_from_rgb565(value)));
        }
    }

    #[test]
    fn ia4_nibbles() {
        assert_eq!([0x22, 0x22, 0x22, 0xFF], rgba8_from_ia4(0xF2));
        assert_eq!([0xFF, 0xFF, 0xFF, 0x00], rgba8_from_ia4(0x0F));
    }

    #[test]
    fn intensity_gray() {
        for i in 0..=255 {
            assert_eq!(i, intensity_from_rgba8([i, i, i, 255]));
        }
    }
}
