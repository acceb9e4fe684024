use crate::rgba::{
    convert::unorm8_to_unorm4, intensity_from_rgba8, rgb565_from_rgba8, rgb5a3_from_rgba8,
};

use super::{
    decode::{BLOCK_4X4, BLOCK_8X8, BLOCK_RGBA32},
    encode_blocks,
};

// Pixels with lower alpha use the transparent CMPR color.
const CMPR_ALPHA_THRESHOLD: u8 = 128;

fn rgba8_pixels(pixels: &[u8]) -> &[[u8; 4]] {
    bytemuck::cast_slice(pixels)
}

pub fn i4_from_rgba8(width: u32, height: u32, rgba8: &[u8]) -> Vec<u8> {
    encode_blocks(width, height, rgba8, BLOCK_8X8, |pixels, block| {
        let i4 = |p: [u8; 4]| unorm8_to_unorm4(intensity_from_rgba8(p));
        for (b, pair) in block.iter_mut().zip(rgba8_pixels(pixels).chunks_exact(2)) {
            *b = (i4(pair[0]) << 4) | i4(pair[1]);
        }
    })
}

pub fn rgb5a3_from_rgba8_pixels(width: u32, height: u32, rgba8: &[u8]) -> Vec<u8> {
    encode_blocks(width, height, rgba8, BLOCK_4X4, |pixels, block| {
        for (v, p) in block.chunks_exact_mut(2).zip(rgba8_pixels(pixels)) {
            v.copy_from_slice(&rgb5a3_from_rgba8(*p).to_be_bytes());
        }
    })
}

pub fn rgba32_from_rgba8(width: u32, height: u32, rgba8: &[u8]) -> Vec<u8> {
    encode_blocks(width, height, rgba8, BLOCK_RGBA32, |pixels, block| {
        let (ar, gb) = block.split_at_mut(32);
        for ((ar, gb), [r, g, b, a]) in ar
            .chunks_exact_mut(2)
            .zip(gb.chunks_exact_mut(2))
            .zip(rgba8_pixels(pixels))
        {
            ar.copy_from_slice(&[*a, *r]);
            gb.copy_from_slice(&[*g, *b]);
        }
    })
}

pub fn cmpr_from_rgba8(width: u32, height: u32, rgba8: &[u8]) -> Vec<u8> {
    encode_blocks(width, height, rgba8, BLOCK_8X8, |pixels, block| {
        let pixels = rgba8_pixels(pixels);
        for (i, sub_block) in block
            .chunks_exact_mut(cmpr_rs::BLOCK_SIZE_IN_BYTES)
            .enumerate()
        {
            let x = (i % 2) * 4;
            let y = (i / 2) * 4;

            let mut sub_pixels = [[0u8; 4]; 16];
            for (row, sub_row) in sub_pixels.chunks_exact_mut(4).enumerate() {
                let start = (y + row) * BLOCK_8X8.width + x;
                sub_row.copy_from_slice(&pixels[start..start + 4]);
            }

            sub_block.copy_from_slice(&cmpr_block_from_rgba8(&sub_pixels));
        }
    })
}

fn cmpr_block_from_rgba8(pixels: &[[u8; 4]; 16]) -> [u8; 8] {
    let has_transparency = pixels.iter().any(|p| p[3] < CMPR_ALPHA_THRESHOLD);

    // Transparent pixels don't contribute to the reference colors.
    let mut candidates: Vec<[u8; 4]> = pixels
        .iter()
        .filter(|p| p[3] >= CMPR_ALPHA_THRESHOLD)
        .copied()
        .collect();
    if candidates.is_empty() {
        candidates.extend_from_slice(pixels);
    }

    let (e0, e1) = most_distant_pair(&candidates);
    let mut c0 = rgb565_from_rgba8(e0);
    let mut c1 = rgb565_from_rgba8(e1);

    // The order of the reference colors selects the palette mode.
    if has_transparency == (c0 > c1) {
        std::mem::swap(&mut c0, &mut c1);
    }

    let palette = cmpr_rs::color_palette(c0, c1);
    let opaque_colors = if c0 > c1 { 4 } else { 3 };

    let mut indices = 0u32;
    for (i, p) in pixels.iter().enumerate() {
        let index = if p[3] < CMPR_ALPHA_THRESHOLD {
            3
        } else {
            nearest_color(&palette[..opaque_colors], *p)
        };
        indices |= (index as u32) << (2 * i);
    }

    let [c0_low, c0_high] = c0.to_le_bytes();
    let [c1_low, c1_high] = c1.to_le_bytes();
    let [i0, i1, i2, i3] = indices.to_le_bytes();
    cmpr_rs::cmpr_from_bc1(&[c0_low, c0_high, c1_low, c1_high, i0, i1, i2, i3])
}

fn distance_squared(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(b.iter())
        .take(3)
        .map(|(a, b)| (*a as i32 - *b as i32).pow(2) as u32)
        .sum()
}

fn most_distant_pair(colors: &[[u8; 4]]) -> ([u8; 4], [u8; 4]) {
    let mut pair = (colors[0], colors[0]);
    let mut max_distance = 0;
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            let distance = distance_squared(*a, *b);
            if distance > max_distance {
                max_distance = distance;
                pair = (*a, *b);
            }
        }
    }
    pair
}

fn nearest_color(palette: &[[u8; 4]], color: [u8; 4]) -> usize {
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| distance_squared(**c, color))
        .map(|(i, _)| i)
        .unwrap_or_default()
}
