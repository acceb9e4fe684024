//! Block tiling shared by all GX texture formats.
//!
//! Textures are stored as a grid of fixed size blocks in row-major order.
//! The pixels within each block are also in row-major order.
//! Images with dimensions that are not a multiple of the block size
//! still store complete blocks along the right and bottom edges.
use crate::{div_round_up, SurfaceError};

pub mod decode;
pub mod encode;

/// The tiling of a single block for a format.
#[derive(Debug, Clone, Copy)]
pub struct BlockLayout {
    pub width: usize,
    pub height: usize,
    pub size_in_bytes: usize,
    /// The size of each pixel in the decoded or unencoded data.
    pub bytes_per_pixel: usize,
}

impl BlockLayout {
    fn pixels_size_in_bytes(&self) -> usize {
        self.width * self.height * self.bytes_per_pixel
    }
}

/// Decode each block in `data` with `decode_block`
/// and combine the results into a single row-major image.
///
/// The block decoder writes the pixels for the block in row-major order.
/// Pixels outside the image dimensions are discarded.
/// The length of `data` should already be validated.
pub fn decode_blocks<F>(
    width: u32,
    height: u32,
    data: &[u8],
    layout: BlockLayout,
    mut decode_block: F,
) -> Result<Vec<u8>, SurfaceError>
where
    F: FnMut(&[u8], &mut [u8]) -> Result<(), SurfaceError>,
{
    let width = width as usize;
    let height = height as usize;

    let mut pixels = vec![0u8; width * height * layout.bytes_per_pixel];
    if pixels.is_empty() {
        return Ok(pixels);
    }

    let blocks_x = div_round_up(width, layout.width);
    let blocks_y = div_round_up(height, layout.height);

    let mut block_pixels = vec![0u8; layout.pixels_size_in_bytes()];
    for (i, block) in data
        .chunks_exact(layout.size_in_bytes)
        .take(blocks_x * blocks_y)
        .enumerate()
    {
        decode_block(block, &mut block_pixels)?;

        let x = (i % blocks_x) * layout.width;
        let y = (i / blocks_x) * layout.height;
        put_block(&mut pixels, &block_pixels, x, y, width, height, layout);
    }

    Ok(pixels)
}

/// Encode each block of the row-major `pixels` with `encode_block`.
///
/// Pixels outside the image dimensions are padded with zeros.
pub fn encode_blocks<F>(
    width: u32,
    height: u32,
    pixels: &[u8],
    layout: BlockLayout,
    mut encode_block: F,
) -> Vec<u8>
where
    F: FnMut(&[u8], &mut [u8]),
{
    let width = width as usize;
    let height = height as usize;

    let blocks_x = div_round_up(width, layout.width);
    let blocks_y = div_round_up(height, layout.height);

    let mut data = vec![0u8; blocks_x * blocks_y * layout.size_in_bytes];
    let mut block_pixels = vec![0u8; layout.pixels_size_in_bytes()];
    for (i, block) in data.chunks_exact_mut(layout.size_in_bytes).enumerate() {
        let x = (i % blocks_x) * layout.width;
        let y = (i / blocks_x) * layout.height;
        get_block(&mut block_pixels, pixels, x, y, width, height, layout);

        encode_block(&block_pixels, block);
    }

    data
}

fn put_block(
    surface: &mut [u8],
    block_pixels: &[u8],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    layout: BlockLayout,
) {
    // Each block updates multiple rows of the surface.
    // Blocks on the edges may only be partially visible.
    let visible_width = layout.width.min(width - x);
    let visible_height = layout.height.min(height - y);
    let bytes_per_row = visible_width * layout.bytes_per_pixel;

    for row in 0..visible_height {
        let surface_index = ((y + row) * width + x) * layout.bytes_per_pixel;
        let pixel_index = row * layout.width * layout.bytes_per_pixel;
        surface[surface_index..surface_index + bytes_per_row]
            .copy_from_slice(&block_pixels[pixel_index..pixel_index + bytes_per_row]);
    }
}

fn get_block(
    block_pixels: &mut [u8],
    surface: &[u8],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    layout: BlockLayout,
) {
    block_pixels.fill(0);

    let visible_width = layout.width.min(width - x);
    let visible_height = layout.height.min(height - y);
    let bytes_per_row = visible_width * layout.bytes_per_pixel;

    for row in 0..visible_height {
        let surface_index = ((y + row) * width + x) * layout.bytes_per_pixel;
        let pixel_index = row * layout.width * layout.bytes_per_pixel;
        block_pixels[pixel_index..pixel_index + bytes_per_row]
            .copy_from_slice(&surface[surface_index..surface_index + bytes_per_row]);
    }
}
