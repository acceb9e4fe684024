// The GX texture units expand channels by replicating the high bits.
pub fn unorm3_to_unorm8(x: u8) -> u8 {
    (x << 5) | (x << 2) | (x >> 1)
}

pub fn unorm4_to_unorm8(x: u8) -> u8 {
    x * 17
}

pub fn unorm5_to_unorm8(x: u8) -> u8 {
    (x << 3) | (x >> 2)
}

pub fn unorm6_to_unorm8(x: u8) -> u8 {
    (x << 2) | (x >> 4)
}

// Round to nearest so that expanded values convert back exactly.
pub fn unorm8_to_unorm3(x: u8) -> u8 {
    unorm8_to_unorm(x, 7)
}

// https://rundevelopment.github.io/blog/fast-unorm-conversions
pub fn unorm8_to_unorm4(x: u8) -> u8 {
    ((x as u16 * 15 + 135) >> 8) as u8
}

pub fn unorm8_to_unorm5(x: u8) -> u8 {
    unorm8_to_unorm(x, 31)
}

pub fn unorm8_to_unorm6(x: u8) -> u8 {
    unorm8_to_unorm(x, 63)
}

fn unorm8_to_unorm(x: u8, max: u16) -> u8 {
    ((x as u16 * max + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unorm_to_unorm8_reference(x: u8, max: u8) -> u8 {
        (x as f32 / max as f32 * 255.0).round() as u8
    }

    fn unorm8_to_unorm_reference(x: u8, max: u8) -> u8 {
        (x as f32 / 255.0 * max as f32).round() as u8
    }

    #[test]
    fn convert_unorm3_to_unorm8() {
        assert_eq!(
            [0, 36, 73, 109, 146, 182, 219, 255],
            [0, 1, 2, 3, 4, 5, 6, 7].map(unorm3_to_unorm8)
        );
    }

    #[test]
    fn convert_unorm4_to_unorm8() {
        for i in 0..=15 {
            assert_eq!(unorm4_to_unorm8(i), unorm_to_unorm8_reference(i, 15));
        }
    }

    #[test]
    fn convert_unorm5_to_unorm8() {
        assert_eq!(0x00, unorm5_to_unorm8(0x00));
        assert_eq!(0x18, unorm5_to_unorm8(0x03));
        assert_eq!(0x84, unorm5_to_unorm8(0x10));
        assert_eq!(0xFF, unorm5_to_unorm8(0x1F));
    }

    #[test]
    fn convert_unorm6_to_unorm8() {
        assert_eq!(0x00, unorm6_to_unorm8(0x00));
        assert_eq!(0x2C, unorm6_to_unorm8(0x0B));
        assert_eq!(0x82, unorm6_to_unorm8(0x20));
        assert_eq!(0xFF, unorm6_to_unorm8(0x3F));
    }

    #[test]
    fn expansion_is_within_one_of_rounding() {
        for i in 0..=31 {
            let expected = unorm_to_unorm8_reference(i, 31);
            assert!(unorm5_to_unorm8(i).abs_diff(expected) <= 1);
        }
        for i in 0..=63 {
            let expected = unorm_to_unorm8_reference(i, 63);
            assert!(unorm6_to_unorm8(i).abs_diff(expected) <= 1);
        }
    }

    #[test]
    fn convert_unorm8_to_unorm3() {
        for i in 0..=255 {
            assert_eq!(unorm8_to_unorm3(i), unorm8_to_unorm_reference(i, 7));
        }
    }

    #[test]
    fn convert_unorm8_to_unorm4() {
        for i in 0..=255 {
            assert_eq!(unorm8_to_unorm4(i), unorm8_to_unorm_reference(i, 15));
        }
    }

    #[test]
    fn convert_unorm8_to_unorm5() {
        for i in 0..=255 {
            assert_eq!(unorm8_to_unorm5(i), unorm8_to_unorm_reference(i, 31));
        }
    }

    #[test]
    fn convert_unorm8_to_unorm6() {
        for i in 0..=255 {
            assert_eq!(unorm8_to_unorm6(i), unorm8_to_unorm_reference(i, 63));
        }
    }

    #[test]
    fn expanded_values_convert_back() {
        for i in 0..=7 {
            assert_eq!(i, unorm8_to_unorm3(unorm3_to_unorm8(i)));
        }
        for i in 0..=15 {
            assert_eq!(i, unorm8_to_unorm4(unorm4_to_unorm8(i)));
        }
        for i in 0..=31 {
            assert_eq!(i, unorm8_to_unorm5(unorm5_to_unorm8(i)));
        }
        for i in 0..=63 {
            assert_eq!(i, unorm8_to_unorm6(unorm6_to_unorm8(i)));
        }
    }
}
