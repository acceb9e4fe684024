use std::io::{Read, Seek, SeekFrom, Write};

use log::{debug, warn};

use crate::{
    decode::{decode_surface, read_section},
    header::header_position,
    round_up, Header, InputSection, Palette, Surface, SurfaceError,
    SurfacePixels, SurfaceRgba8, TextureFormat, HEADER_SIZE,
};

// Palette and image data start on 32 byte boundaries.
const DATA_ALIGNMENT: usize = 32;

/// A single texture with its header, palette, and encoded image data.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bti {
    pub header: Header,
    pub palette: Palette,
    /// Encoded image data for all mip levels starting with the base level.
    pub data: Vec<u8>,
}

impl Bti {
    /// Read the texture at `index` from a list of headers starting at `base`.
    ///
    /// Use a `base` and `index` of `0` for standalone BTI files.
    pub fn read<R: Read + Seek>(reader: &mut R, base: u64, index: u32) -> Result<Self, SurfaceError> {
        let header_start = header_position(base, index);
        let header = Header::read_at(reader, base, index)?;
        debug!(
            "Reading {:?} {}x{} texture at {header_start:#x} with {} mipmaps",
            header.format, header.width, header.height, header.mipmap_count
        );

        let palette = if header.palette_entry_count > 0 {
            reader.seek(SeekFrom::Start(header_start + header.palette_offset as u64))?;
            Palette::read(reader, header.palette_entry_count)?
        } else {
            Palette::default()
        };

        let data = match image_data_size(&header) {
            Some(size) => {
                reader.seek(SeekFrom::Start(header_start + header.image_offset as u64))?;
                read_section(
                    reader,
                    size,
                    InputSection::Image {
                        format: header.format,
                        width: header.width as u32,
                        height: header.height as u32,
                    },
                )?
            }
            None => {
                warn!(
                    "Unable to calculate the image data size for format {:?}",
                    header.format
                );
                Vec::new()
            }
        };

        Ok(Self {
            header,
            palette,
            data,
        })
    }

    /// Write the header, palette, and image data with updated offsets.
    ///
    /// The palette entry count is set from [palette](#structfield.palette).
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        let palette_size = self.palette.as_bytes().len();
        let palette_offset = if self.palette.is_empty() {
            0
        } else {
            round_up(HEADER_SIZE, DATA_ALIGNMENT)
        };
        let image_offset = round_up(HEADER_SIZE + palette_size, DATA_ALIGNMENT);
        debug!(
            "Writing {:?} {}x{} texture with palette at {palette_offset:#x} and image at {image_offset:#x}",
            self.header.format, self.header.width, self.header.height
        );

        let header = Header {
            palette_entry_count: palette_entry_count(&self.palette)?,
            ..self.header.clone()
        };
        header.write_with_offsets(writer, palette_offset as u32, image_offset as u32)?;

        let mut position = HEADER_SIZE;
        if !self.palette.is_empty() {
            write_padding(writer, palette_offset - position)?;
            self.palette.write(writer)?;
            position = palette_offset + palette_size;
        }
        write_padding(writer, image_offset - position)?;
        writer.write_all(&self.data)?;

        Ok(())
    }

    /// Decode the base mip level.
    ///
    /// See [Surface::decode] for the layout of the returned pixels.
    pub fn decode(&self) -> Result<SurfacePixels<Vec<u8>>, SurfaceError> {
        decode_surface(
            self.header.format,
            self.header.width as u32,
            self.header.height as u32,
            &self.data,
            &self.palette,
            self.header.palette_format,
        )
    }

    /// The encoded base mip level and palette.
    pub fn to_surface(&self) -> Surface<&[u8]> {
        let size = self
            .header
            .format
            .encoded_size(self.header.width as u32, self.header.height as u32)
            .unwrap_or_default()
            .min(self.data.len());

        Surface {
            width: self.header.width as u32,
            height: self.header.height as u32,
            image_format: self.header.format,
            palette_format: self.header.palette_format,
            palette: self.palette.clone(),
            data: &self.data[..size],
        }
    }

    /// Create a texture with a single mip level and default sampler values.
    ///
    /// The palette is only kept for paletted formats.
    pub fn from_surface<T: AsRef<[u8]>>(surface: Surface<T>) -> Result<Self, SurfaceError> {
        let (width, height) = header_dimensions(surface.width, surface.height)?;

        let mut header = Header::new(surface.image_format, width, height);
        let palette = if surface.image_format.is_paletted() {
            header.palette_format = surface.palette_format;
            header.palette_entry_count = palette_entry_count(&surface.palette)?;
            surface.palette
        } else {
            Palette::default()
        };

        Ok(Self {
            header,
            palette,
            data: surface.data.as_ref().to_vec(),
        })
    }

    /// Encode RGBA8 pixels to `format`.
    ///
    /// The alpha flag in the header is set if any pixel is not fully opaque.
    pub fn from_surface_rgba8<T: AsRef<[u8]>>(
        surface: &SurfaceRgba8<T>,
        format: TextureFormat,
    ) -> Result<Self, SurfaceError> {
        header_dimensions(surface.width, surface.height)?;

        let encoded = surface.encode(format)?;
        let mut bti = Self::from_surface(encoded)?;

        let has_alpha = surface
            .data
            .as_ref()
            .chunks_exact(4)
            .any(|pixel| pixel[3] < 255);
        bti.header.alpha = has_alpha as u8;

        Ok(bti)
    }
}

/// Decode the base mip level from `bti` to an RGBA8 image.
///
/// [crate::PaletteFormat::Ia8] palettes are expanded to RGBA8.
#[cfg(feature = "image")]
pub fn image_from_bti(bti: &Bti) -> Result<image::RgbaImage, crate::CreateImageError> {
    let width = bti.header.width as u32;
    let height = bti.header.height as u32;

    let rgba8_data = bti.decode()?.to_rgba8().data;
    let data_length = rgba8_data.len();

    let image = image::RgbaImage::from_raw(width, height, rgba8_data).ok_or(
        crate::CreateImageError::InvalidSurfaceDimensions {
            width,
            height,
            data_length,
        },
    )?;

    Ok(image)
}

/// Encode `image` to a texture with the given `format`.
#[cfg(feature = "image")]
pub fn bti_from_image(image: &image::RgbaImage, format: TextureFormat) -> Result<Bti, SurfaceError> {
    Bti::from_surface_rgba8(
        &SurfaceRgba8 {
            width: image.width(),
            height: image.height(),
            data: image.as_raw(),
        },
        format,
    )
}

/// The size of the image data for all mip levels.
fn image_data_size(header: &Header) -> Option<usize> {
    let width = header.width as u32;
    let height = header.height as u32;

    // Some files store 0 for textures without mipmaps.
    (0..header.mipmap_count.max(1) as u32).try_fold(0usize, |size, mip| {
        // Levels past 32 are still 1x1.
        let mip_width = width.checked_shr(mip).unwrap_or(0).max(1);
        let mip_height = height.checked_shr(mip).unwrap_or(0).max(1);
        size.checked_add(header.format.encoded_size(mip_width, mip_height)?)
    })
}

fn header_dimensions(width: u32, height: u32) -> Result<(u16, u16), SurfaceError> {
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SurfaceError::DimensionsTooLarge { width, height }),
    }
}

fn palette_entry_count(palette: &Palette) -> Result<u16, SurfaceError> {
    let entries = palette.entry_count();
    u16::try_from(entries).map_err(|_| SurfaceError::PaletteTooLarge { entries })
}

fn write_padding<W: Write>(writer: &mut W, count: usize) -> Result<(), SurfaceError> {
    writer.write_all(&vec![0u8; count])?;
    Ok(())
}
