#![no_std]
//! A safe, no_std, pure Rust decoder for GX CMPR blocks.
//!
//! CMPR is BC1 with a different byte order.
//! The two RGB565 reference colors are stored big endian,
//! and each row of 2-bit indices is a single byte with the leftmost pixel in the high bits.
//! Blocks are first converted to BC1 byte order with [bc1_from_cmpr]
//! and then decoded like any other BC1 block.
//!
//! CMPR textures group four of these 4x4 blocks into an 8x8 tile.
//! Walking the tiles is left to the caller.

/// The size of a single 4x4 compressed block in bytes.
pub const BLOCK_SIZE_IN_BYTES: usize = 8;

/// Decompress a single 4x4 CMPR block to RGBA8.
///
/// Each of the 4 rows is written `destination_pitch` bytes apart in `decompressed_block`.
pub fn cmpr(compressed_block: &[u8], decompressed_block: &mut [u8], destination_pitch: usize) {
    let block = bc1_from_cmpr(compressed_block);
    color_block(&block, decompressed_block, destination_pitch);
}

/// Swap the byte order of a CMPR block to match BC1.
///
/// The reference colors are byte swapped and the 2-bit indices in each row are reversed.
/// Applying the conversion twice returns the original block.
pub fn bc1_from_cmpr(block: &[u8]) -> [u8; BLOCK_SIZE_IN_BYTES] {
    [
        block[1],
        block[0],
        block[3],
        block[2],
        reverse_indices(block[4]),
        reverse_indices(block[5]),
        reverse_indices(block[6]),
        reverse_indices(block[7]),
    ]
}

/// Swap the byte order of a BC1 block to match CMPR.
pub fn cmpr_from_bc1(block: &[u8]) -> [u8; BLOCK_SIZE_IN_BYTES] {
    // The conversion is its own inverse.
    bc1_from_cmpr(block)
}

fn reverse_indices(x: u8) -> u8 {
    ((x & 0x03) << 6) | ((x & 0x0C) << 2) | ((x & 0x30) >> 2) | ((x & 0xC0) >> 6)
}

/// Calculate the 4 RGBA8 colors selected by the 2-bit indices
/// for the RGB565 reference colors `c0` and `c1`.
///
/// Blocks with `c0 > c1` use 4 opaque colors.
/// Otherwise, the last color has zero alpha.
/// Unlike BC1, the RGB values of the transparent color are still interpolated.
pub fn color_palette(c0: u16, c1: u16) -> [[u8; 4]; 4] {
    let [r0, g0, b0] = rgb8_from_rgb565(c0);
    let [r1, g1, b1] = rgb8_from_rgb565(c1);

    // color_3 = 1/3*color_0 + 2/3*color_1
    let r3 = (r0 + 2 * r1 + 1) / 3;
    let g3 = (g0 + 2 * g1 + 1) / 3;
    let b3 = (b0 + 2 * b1 + 1) / 3;

    if c0 > c1 {
        // color_2 = 2/3*color_0 + 1/3*color_1
        let r2 = (2 * r0 + r1 + 1) / 3;
        let g2 = (2 * g0 + g1 + 1) / 3;
        let b2 = (2 * b0 + b1 + 1) / 3;

        [
            [r0 as u8, g0 as u8, b0 as u8, 255u8],
            [r1 as u8, g1 as u8, b1 as u8, 255u8],
            [r2 as u8, g2 as u8, b2 as u8, 255u8],
            [r3 as u8, g3 as u8, b3 as u8, 255u8],
        ]
    } else {
        // color_2 = 1/2*color_0 + 1/2*color_1
        let r2 = (r0 + r1 + 1) / 2;
        let g2 = (g0 + g1 + 1) / 2;
        let b2 = (b0 + b1 + 1) / 2;

        [
            [r0 as u8, g0 as u8, b0 as u8, 255u8],
            [r1 as u8, g1 as u8, b1 as u8, 255u8],
            [r2 as u8, g2 as u8, b2 as u8, 255u8],
            [r3 as u8, g3 as u8, b3 as u8, 0u8],
        ]
    }
}

// Expand 565 colors to 888 by replicating the high bits.
fn rgb8_from_rgb565(c: u16) -> [u16; 3] {
    let r = (c >> 11) & 0x1F;
    let g = (c >> 5) & 0x3F;
    let b = c & 0x1F;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

fn color_block(
    compressed_block: &[u8; BLOCK_SIZE_IN_BYTES],
    decompressed_block: &mut [u8],
    destination_pitch: usize,
) {
    let c0 = u16::from_le_bytes([compressed_block[0], compressed_block[1]]);
    let c1 = u16::from_le_bytes([compressed_block[2], compressed_block[3]]);
    let ref_colors = color_palette(c0, c1);

    let mut color_indices = u32::from_le_bytes([
        compressed_block[4],
        compressed_block[5],
        compressed_block[6],
        compressed_block[7],
    ]);

    // Fill out the decompressed color block
    for i in 0..4 {
        for j in 0..4 {
            let idx = color_indices & 0x03;
            let start = i * destination_pitch + j * 4;
            decompressed_block[start..start + 4].copy_from_slice(&ref_colors[idx as usize]);
            color_indices >>= 2;
        }
    }
}
