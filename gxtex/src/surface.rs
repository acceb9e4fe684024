use crate::{rgba::rgba8_from_ia8, Palette, PaletteFormat, SurfaceError, TextureFormat};

/// Encoded GX texture data for a single image.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The format of the bytes in [data](#structfield.data).
    pub image_format: TextureFormat,
    /// The format of the entries in [palette](#structfield.palette).
    /// This is only used for paletted formats.
    pub palette_format: PaletteFormat,
    /// The palette for paletted formats or an empty palette.
    pub palette: Palette,
    /// The image data stored in blocks.
    ///
    /// Partial blocks at the right and bottom edges are padded to full blocks.
    pub data: T,
}

/// An uncompressed RGBA8 surface with 4 bytes per pixel.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceRgba8<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The image data in row-major order without padding.
    pub data: T,
}

/// The layout of each pixel in decoded data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelLayout {
    /// 4 bytes per pixel in R, G, B, A order.
    Rgba8,
    /// 2 bytes per pixel with alpha followed by intensity.
    ///
    /// This is only used for [TextureFormat::C4] and [TextureFormat::C8]
    /// with a [PaletteFormat::Ia8] palette.
    Ia8,
}

impl PixelLayout {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelLayout::Rgba8 => 4,
            PixelLayout::Ia8 => 2,
        }
    }
}

/// Decoded pixels in row-major order.
///
/// The data is empty if the format does not support decoding.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfacePixels<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The layout of each pixel in [data](#structfield.data).
    pub layout: PixelLayout,
    pub data: T,
}

impl<T: AsRef<[u8]>> SurfacePixels<T> {
    /// Convert the pixels to RGBA8.
    ///
    /// [PixelLayout::Ia8] pixels are expanded to (I, I, I, A).
    pub fn to_rgba8(&self) -> SurfaceRgba8<Vec<u8>> {
        let data = match self.layout {
            PixelLayout::Rgba8 => self.data.as_ref().to_vec(),
            PixelLayout::Ia8 => self
                .data
                .as_ref()
                .chunks_exact(2)
                .flat_map(|ia| rgba8_from_ia8(ia[0], ia[1]))
                .collect(),
        };

        SurfaceRgba8 {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl<T: AsRef<[u8]>> SurfaceRgba8<T> {
    pub(crate) fn validate(&self) -> Result<(), SurfaceError> {
        let width = self.width;
        let height = self.height;

        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSizedSurface { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SurfaceError::PixelCountWouldOverflow { width, height })?;
        let actual = self.data.as_ref().len();
        if actual < expected {
            return Err(SurfaceError::NotEnoughData { expected, actual });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ia8_pixels_to_rgba8() {
        let pixels = SurfacePixels {
            width: 2,
            height: 1,
            layout: PixelLayout::Ia8,
            data: vec![0x80, 0x10, 0xFF, 0x20],
        };
        assert_eq!(
            SurfaceRgba8 {
                width: 2,
                height: 1,
                data: vec![0x10, 0x10, 0x10, 0x80, 0x20, 0x20, 0x20, 0xFF]
            },
            pixels.to_rgba8()
        );
    }

    #[test]
    fn rgba8_pixels_to_rgba8() {
        let pixels = SurfacePixels {
            width: 1,
            height: 1,
            layout: PixelLayout::Rgba8,
            data: [1u8, 2, 3, 4],
        };
        assert_eq!(vec![1, 2, 3, 4], pixels.to_rgba8().data);
    }

    #[test]
    fn validate_zero_size() {
        let surface = SurfaceRgba8 {
            width: 0,
            height: 4,
            data: &[0u8; 0],
        };
        assert!(matches!(
            surface.validate(),
            Err(SurfaceError::ZeroSizedSurface {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn validate_not_enough_data() {
        let surface = SurfaceRgba8 {
            width: 4,
            height: 4,
            data: &[0u8; 63],
        };
        assert!(matches!(
            surface.validate(),
            Err(SurfaceError::NotEnoughData {
                expected: 64,
                actual: 63
            })
        ));
    }
}
