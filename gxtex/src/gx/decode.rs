use crate::{
    rgba::{
        rgba8_from_i4, rgba8_from_i8, rgba8_from_ia4, rgba8_from_ia8, rgba8_from_rgb565,
        rgba8_from_rgb5a3,
    },
    Palette, PaletteFormat, SurfaceError,
};

use super::{decode_blocks, BlockLayout};

const RGBA8_SIZE: usize = 4;

pub(crate) const BLOCK_8X8: BlockLayout = BlockLayout {
    width: 8,
    height: 8,
    size_in_bytes: 32,
    bytes_per_pixel: RGBA8_SIZE,
};

pub(crate) const BLOCK_8X4: BlockLayout = BlockLayout {
    width: 8,
    height: 4,
    size_in_bytes: 32,
    bytes_per_pixel: RGBA8_SIZE,
};

pub(crate) const BLOCK_4X4: BlockLayout = BlockLayout {
    width: 4,
    height: 4,
    size_in_bytes: 32,
    bytes_per_pixel: RGBA8_SIZE,
};

pub(crate) const BLOCK_RGBA32: BlockLayout = BlockLayout {
    width: 4,
    height: 4,
    size_in_bytes: 64,
    bytes_per_pixel: RGBA8_SIZE,
};

// Decoded blocks have one RGBA8 pixel for each texel.
fn rgba8_pixels(pixels: &mut [u8]) -> &mut [[u8; 4]] {
    bytemuck::cast_slice_mut(pixels)
}

pub fn decode_i4(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_8X8, |block, pixels| {
        // The left pixel is in the high nibble.
        let intensities = block.iter().flat_map(|b| [b >> 4, b & 0xF]);
        for (pixel, i) in rgba8_pixels(pixels).iter_mut().zip(intensities) {
            *pixel = rgba8_from_i4(i);
        }
        Ok(())
    })
}

pub fn decode_i8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_8X4, |block, pixels| {
        for (pixel, i) in rgba8_pixels(pixels).iter_mut().zip(block) {
            *pixel = rgba8_from_i8(*i);
        }
        Ok(())
    })
}

pub fn decode_ia4(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_8X4, |block, pixels| {
        for (pixel, ia) in rgba8_pixels(pixels).iter_mut().zip(block) {
            *pixel = rgba8_from_ia4(*ia);
        }
        Ok(())
    })
}

pub fn decode_ia8(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_4X4, |block, pixels| {
        for (pixel, ia) in rgba8_pixels(pixels).iter_mut().zip(block.chunks_exact(2)) {
            *pixel = rgba8_from_ia8(ia[0], ia[1]);
        }
        Ok(())
    })
}

pub fn decode_rgb565(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_4X4, |block, pixels| {
        for (pixel, v) in rgba8_pixels(pixels).iter_mut().zip(block.chunks_exact(2)) {
            *pixel = rgba8_from_rgb565(u16::from_be_bytes([v[0], v[1]]));
        }
        Ok(())
    })
}

pub fn decode_rgb5a3(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_4X4, |block, pixels| {
        for (pixel, v) in rgba8_pixels(pixels).iter_mut().zip(block.chunks_exact(2)) {
            *pixel = rgba8_from_rgb5a3(u16::from_be_bytes([v[0], v[1]]));
        }
        Ok(())
    })
}

pub fn decode_rgba32(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_RGBA32, |block, pixels| {
        // Alpha and red for all pixels are stored before green and blue.
        let (ar, gb) = block.split_at(32);
        for ((pixel, ar), gb) in rgba8_pixels(pixels)
            .iter_mut()
            .zip(ar.chunks_exact(2))
            .zip(gb.chunks_exact(2))
        {
            *pixel = [ar[1], gb[0], gb[1], ar[0]];
        }
        Ok(())
    })
}

pub fn decode_c4(
    width: u32,
    height: u32,
    data: &[u8],
    palette: &Palette,
    palette_format: PaletteFormat,
) -> Result<Vec<u8>, SurfaceError> {
    let layout = BlockLayout {
        bytes_per_pixel: palette_format.bytes_per_pixel(),
        ..BLOCK_8X8
    };
    decode_blocks(width, height, data, layout, |block, pixels| {
        let indices = block.iter().flat_map(|b| [b >> 4, b & 0xF]);
        put_palette_entries(pixels, indices, palette, palette_format)
    })
}

pub fn decode_c8(
    width: u32,
    height: u32,
    data: &[u8],
    palette: &Palette,
    palette_format: PaletteFormat,
) -> Result<Vec<u8>, SurfaceError> {
    let layout = BlockLayout {
        bytes_per_pixel: palette_format.bytes_per_pixel(),
        ..BLOCK_8X4
    };
    decode_blocks(width, height, data, layout, |block, pixels| {
        put_palette_entries(pixels, block.iter().copied(), palette, palette_format)
    })
}

fn put_palette_entries(
    pixels: &mut [u8],
    indices: impl Iterator<Item = u8>,
    palette: &Palette,
    palette_format: PaletteFormat,
) -> Result<(), SurfaceError> {
    let pixels = pixels.chunks_exact_mut(palette_format.bytes_per_pixel());
    for (pixel, index) in pixels.zip(indices) {
        let entry = palette.resolve(index as usize, palette_format)?;
        pixel.copy_from_slice(entry.as_bytes());
    }
    Ok(())
}

pub fn decode_cmpr(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, SurfaceError> {
    decode_blocks(width, height, data, BLOCK_8X8, |block, pixels| {
        // The 4x4 blocks are ordered top left, top right, bottom left, bottom right.
        let pitch = BLOCK_8X8.width * RGBA8_SIZE;
        for (i, sub_block) in block
            .chunks_exact(cmpr_rs::BLOCK_SIZE_IN_BYTES)
            .enumerate()
        {
            let x = (i % 2) * 4;
            let y = (i / 2) * 4;
            let start = y * pitch + x * RGBA8_SIZE;
            cmpr_rs::cmpr(sub_block, &mut pixels[start..], pitch);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(data: &[u8], x: usize, y: usize, width: usize) -> [u8; 4] {
        let i = (y * width + x) * 4;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    }

    #[test]
    fn decode_i4_zero_block() {
        let pixels = decode_i4(8, 8, &[0u8; 32]).unwrap();
        assert_eq!(8 * 8 * 4, pixels.len());
        assert!(pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn decode_i4_nibble_order() {
        let mut block = [0u8; 32];
        block[0] = 0xF1;
        let pixels = decode_i4(8, 8, &block).unwrap();
        assert_eq!([255, 255, 255, 255], pixel(&pixels, 0, 0, 8));
        assert_eq!([17, 17, 17, 255], pixel(&pixels, 1, 0, 8));
    }

    #[test]
    fn decode_i8_zero_block() {
        let pixels = decode_i8(8, 4, &[0u8; 32]).unwrap();
        assert_eq!(8 * 4 * 4, pixels.len());
        assert!(pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn decode_ia4_multiple_blocks() {
        // The second block should be placed to the right of the first block.
        let mut data = [0u8; 64];
        data[32] = 0x8F;
        let pixels = decode_ia4(16, 4, &data).unwrap();
        assert_eq!(16 * 4 * 4, pixels.len());
        assert_eq!([0, 0, 0, 0], pixel(&pixels, 0, 0, 16));
        assert_eq!([255, 255, 255, 136], pixel(&pixels, 8, 0, 16));
    }

    #[test]
    fn decode_ia8_alpha_first() {
        let mut block = [0u8; 32];
        block[0] = 0x40;
        block[1] = 0xC0;
        let pixels = decode_ia8(4, 4, &block).unwrap();
        assert_eq!([0xC0, 0xC0, 0xC0, 0x40], pixel(&pixels, 0, 0, 4));
    }

    #[test]
    fn decode_rgb565_big_endian() {
        let mut block = [0u8; 32];
        block[2] = 0x07;
        block[3] = 0xE0;
        let pixels = decode_rgb565(4, 4, &block).unwrap();
        assert_eq!([0, 0, 0, 255], pixel(&pixels, 0, 0, 4));
        assert_eq!([0, 255, 0, 255], pixel(&pixels, 1, 0, 4));
    }

    #[test]
    fn decode_rgb5a3_opaque_black() {
        let block: Vec<u8> = [0x80u8, 0x00].repeat(16);
        let pixels = decode_rgb5a3(4, 4, &block).unwrap();
        assert!(pixels.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn decode_rgba32_split_block() {
        let mut block = [0u8; 64];
        // Pixel 5 is at x=1, y=1.
        block[10] = 0x11;
        block[11] = 0x22;
        block[42] = 0x33;
        block[43] = 0x44;
        let pixels = decode_rgba32(4, 4, &block).unwrap();
        assert_eq!([0x22, 0x33, 0x44, 0x11], pixel(&pixels, 1, 1, 4));
        assert_eq!([0, 0, 0, 0], pixel(&pixels, 0, 0, 4));
    }

    #[test]
    fn decode_c4_rgb565_palette() {
        let palette = Palette::new([[0x00u8, 0x00], [0xF8, 0x00]].repeat(8).concat());
        let mut block = [0u8; 32];
        block[0] = 0x01;
        let pixels = decode_c4(8, 8, &block, &palette, PaletteFormat::Rgb565).unwrap();
        assert_eq!(8 * 8 * 4, pixels.len());
        assert_eq!([0, 0, 0, 255], pixel(&pixels, 0, 0, 8));
        assert_eq!([255, 0, 0, 255], pixel(&pixels, 1, 0, 8));
    }

    #[test]
    fn decode_c8_ia8_palette() {
        let palette = Palette::new(vec![0xAA, 0xBB, 0xCC, 0xDD]);
        let mut block = [0u8; 32];
        block[1] = 1;
        let pixels = decode_c8(8, 4, &block, &palette, PaletteFormat::Ia8).unwrap();
        assert_eq!(8 * 4 * 2, pixels.len());
        assert_eq!([0xAA, 0xBB, 0xCC, 0xDD], pixels[..4]);
    }

    #[test]
    fn decode_c8_index_out_of_range() {
        let palette = Palette::new(vec![0xAA, 0xBB]);
        let mut block = [0u8; 32];
        block[31] = 1;
        let result = decode_c8(8, 4, &block, &palette, PaletteFormat::Rgb5a3);
        assert!(matches!(
            result,
            Err(SurfaceError::MalformedPalette {
                entries: 1,
                required: 2
            })
        ));
    }

    #[test]
    fn decode_c4_empty_palette() {
        let result = decode_c4(8, 8, &[0u8; 32], &Palette::default(), PaletteFormat::Rgb565);
        assert!(matches!(
            result,
            Err(SurfaceError::MalformedPalette {
                entries: 0,
                required: 1
            })
        ));
    }

    #[test]
    fn decode_cmpr_transparent_block() {
        // c0 == c1 with all indices selecting color 3.
        let block: Vec<u8> = [0x12, 0x34, 0x12, 0x34, 0xFF, 0xFF, 0xFF, 0xFF].repeat(4);
        let pixels = decode_cmpr(8, 8, &block).unwrap();
        assert!(pixels.chunks_exact(4).all(|p| p[3] == 0));
    }

    #[test]
    fn decode_cmpr_sub_block_order() {
        let block: Vec<u8> = [0xF800u16, 0x07E0, 0x001F, 0xFFFF]
            .iter()
            .flat_map(|c| {
                let [c0, c1] = c.to_be_bytes();
                [c0, c1, 0, 0, 0, 0, 0, 0]
            })
            .collect();
        let pixels = decode_cmpr(8, 8, &block).unwrap();
        assert_eq!([255, 0, 0, 255], pixel(&pixels, 3, 3, 8));
        assert_eq!([0, 255, 0, 255], pixel(&pixels, 4, 0, 8));
        assert_eq!([0, 0, 255, 255], pixel(&pixels, 0, 7, 8));
        assert_eq!([255, 255, 255, 255], pixel(&pixels, 7, 4, 8));
    }

    #[test]
    fn decode_cmpr_partial_block() {
        let block: Vec<u8> = [0xF8, 0x00, 0, 0, 0, 0, 0, 0].repeat(4);
        let pixels = decode_cmpr(5, 3, &block).unwrap();
        assert_eq!(5 * 3 * 4, pixels.len());
        assert!(pixels.chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
    }
}
