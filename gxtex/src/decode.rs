use std::io::Read;

use log::warn;

use crate::{
    error::SurfaceError,
    gx::decode::{
        decode_c4, decode_c8, decode_cmpr, decode_i4, decode_i8, decode_ia4, decode_ia8,
        decode_rgb565, decode_rgb5a3, decode_rgba32,
    },
    InputSection, Palette, PaletteFormat, PixelLayout, Surface, SurfacePixels, TextureFormat,
};

impl<T: AsRef<[u8]>> Surface<T> {
    /// Decode the surface to row-major pixels.
    ///
    /// Paletted formats with a [PaletteFormat::Ia8] palette decode to [PixelLayout::Ia8].
    /// All other formats decode to [PixelLayout::Rgba8].
    /// Formats that do not support decoding return empty data.
    pub fn decode(&self) -> Result<SurfacePixels<Vec<u8>>, SurfaceError> {
        decode_surface(
            self.image_format,
            self.width,
            self.height,
            self.data.as_ref(),
            &self.palette,
            self.palette_format,
        )
    }
}

/// Read and decode the image data for a single texture from `reader`.
///
/// This reads exactly the encoded size of the image and
/// fails with [SurfaceError::TruncatedInput] if the reader ends early.
/// Nothing is read for formats that do not support decoding.
pub fn decode_surface_from_reader<R: Read>(
    reader: &mut R,
    format: TextureFormat,
    width: u32,
    height: u32,
    palette: &Palette,
    palette_format: PaletteFormat,
) -> Result<SurfacePixels<Vec<u8>>, SurfaceError> {
    match format.encoded_size(width, height) {
        Some(size) if is_decodable(format) => {
            let data = read_section(reader, size, image_section(format, width, height))?;
            decode_surface(format, width, height, &data, palette, palette_format)
        }
        _ => Ok(unsupported_surface(format, width, height)),
    }
}

pub(crate) fn decode_surface(
    format: TextureFormat,
    width: u32,
    height: u32,
    data: &[u8],
    palette: &Palette,
    palette_format: PaletteFormat,
) -> Result<SurfacePixels<Vec<u8>>, SurfaceError> {
    if !is_decodable(format) {
        return Ok(unsupported_surface(format, width, height));
    }

    let expected = format
        .encoded_size(width, height)
        .ok_or(SurfaceError::PixelCountWouldOverflow { width, height })?;
    if data.len() < expected {
        return Err(SurfaceError::TruncatedInput {
            section: image_section(format, width, height),
            offset: data.len(),
            expected,
        });
    }

    let mut layout = PixelLayout::Rgba8;

    let data = match format {
        TextureFormat::I4 => decode_i4(width, height, data)?,
        TextureFormat::I8 => decode_i8(width, height, data)?,
        TextureFormat::Ia4 => decode_ia4(width, height, data)?,
        TextureFormat::Ia8 => decode_ia8(width, height, data)?,
        TextureFormat::Rgb565 => decode_rgb565(width, height, data)?,
        TextureFormat::Rgb5a3 => decode_rgb5a3(width, height, data)?,
        TextureFormat::Rgba32 => decode_rgba32(width, height, data)?,
        TextureFormat::C4 => {
            layout = palette_layout(palette_format);
            decode_c4(width, height, data, palette, palette_format)?
        }
        TextureFormat::C8 => {
            layout = palette_layout(palette_format);
            decode_c8(width, height, data, palette, palette_format)?
        }
        TextureFormat::Cmpr => decode_cmpr(width, height, data)?,
        TextureFormat::C14x2 | TextureFormat::Unknown(_) => Vec::new(),
    };

    Ok(SurfacePixels {
        width,
        height,
        layout,
        data,
    })
}

fn is_decodable(format: TextureFormat) -> bool {
    !matches!(format, TextureFormat::C14x2 | TextureFormat::Unknown(_))
}

fn palette_layout(palette_format: PaletteFormat) -> PixelLayout {
    match palette_format {
        PaletteFormat::Ia8 => PixelLayout::Ia8,
        PaletteFormat::Rgb565 | PaletteFormat::Rgb5a3 => PixelLayout::Rgba8,
    }
}

fn image_section(format: TextureFormat, width: u32, height: u32) -> InputSection {
    InputSection::Image {
        format,
        width,
        height,
    }
}

fn unsupported_surface(format: TextureFormat, width: u32, height: u32) -> SurfacePixels<Vec<u8>> {
    warn!("Decoding {format:?} is not supported. Returning empty data for {width}x{height} image.");
    SurfacePixels {
        width,
        height,
        layout: PixelLayout::Rgba8,
        data: Vec::new(),
    }
}

/// Read exactly `size` bytes or fail with [SurfaceError::TruncatedInput].
pub(crate) fn read_section<R: Read>(
    reader: &mut R,
    size: usize,
    section: InputSection,
) -> Result<Vec<u8>, SurfaceError> {
    // Don't preallocate since the size comes from untrusted header values.
    let mut data = Vec::new();
    reader.take(size as u64).read_to_end(&mut data)?;
    if data.len() < size {
        return Err(SurfaceError::TruncatedInput {
            section,
            offset: data.len(),
            expected: size,
        });
    }
    Ok(data)
}
