use crate::{
    error::SurfaceError,
    gx::encode::{cmpr_from_rgba8, i4_from_rgba8, rgb5a3_from_rgba8_pixels, rgba32_from_rgba8},
    Palette, PaletteFormat, Surface, SurfaceRgba8, TextureFormat,
};

impl<T: AsRef<[u8]>> SurfaceRgba8<T> {
    /// Encode an RGBA8 surface to the given `format`.
    ///
    /// Only [TextureFormat::I4], [TextureFormat::Rgb5a3], [TextureFormat::Rgba32],
    /// and [TextureFormat::Cmpr] support encoding.
    /// Dimensions that are not a multiple of the block size are padded with transparent black.
    pub fn encode(&self, format: TextureFormat) -> Result<Surface<Vec<u8>>, SurfaceError> {
        let width = self.width;
        let height = self.height;

        self.validate()?;

        if !format.is_encodable() {
            return Err(SurfaceError::UnsupportedFormat { format });
        }

        // Catch overflow for the padded size before allocating.
        format
            .encoded_size(width, height)
            .ok_or(SurfaceError::PixelCountWouldOverflow { width, height })?;

        let rgba8 = self.data.as_ref();
        let data = match format {
            TextureFormat::I4 => i4_from_rgba8(width, height, rgba8),
            TextureFormat::Rgb5a3 => rgb5a3_from_rgba8_pixels(width, height, rgba8),
            TextureFormat::Rgba32 => rgba32_from_rgba8(width, height, rgba8),
            TextureFormat::Cmpr => cmpr_from_rgba8(width, height, rgba8),
            _ => return Err(SurfaceError::UnsupportedFormat { format }),
        };

        Ok(Surface {
            width,
            height,
            image_format: format,
            palette_format: PaletteFormat::default(),
            palette: Palette::default(),
            data,
        })
    }
}
