//! # gxtex
//! gxtex decodes and encodes the texture formats used by the GX GPU
//! found in the GameCube and Wii and the BTI files that store them.
//!
//! Textures are stored in blocks (tiles) of pixels rather than in row-major order.
//! Decoding converts the tiled data to a row-major RGBA8 buffer.
//! Only [TextureFormat::I4], [TextureFormat::Rgb5a3], [TextureFormat::Rgba32],
//! and [TextureFormat::Cmpr] support encoding.
//!
//! # Getting Started
//! ```rust no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = std::io::BufReader::new(std::fs::File::open("texture.bti")?);
//! let bti = gxtex::Bti::read(&mut reader, 0, 0)?;
//! let pixels = bti.decode()?;
//! println!("{}x{} {:?}", pixels.width, pixels.height, pixels.layout);
//! # Ok(())
//! # }
//! ```
//!
//! # Palettes
//! [TextureFormat::C4] and [TextureFormat::C8] store indices into a [Palette].
//! Palettes using [PaletteFormat::Ia8] decode to 2 bytes per pixel
//! containing the raw palette entry instead of RGBA8.
//! See [SurfacePixels::to_rgba8] for converting the data to RGBA8.
mod bti;
pub use bti::*;

mod decode;
pub use decode::decode_surface_from_reader;

mod encode;

mod error;
pub use error::*;

mod gx;

mod header;
pub use header::*;

mod palette;
pub use palette::*;

mod rgba;

mod surface;
pub use surface::*;

/// A texture format supported by the GX texture units.
///
/// Values not recognized by this library are preserved as [TextureFormat::Unknown]
/// and decode to an empty buffer.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "strum", derive(strum::EnumString))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TextureFormat {
    /// 4-bit intensity in 8x8 blocks.
    I4,
    /// 8-bit intensity in 8x4 blocks.
    I8,
    /// 4-bit intensity and 4-bit alpha in 8x4 blocks.
    Ia4,
    /// 8-bit intensity and 8-bit alpha in 4x4 blocks.
    Ia8,
    /// 16-bit RGB565 in 4x4 blocks.
    Rgb565,
    /// 16-bit RGB555 or ARGB3444 in 4x4 blocks.
    Rgb5a3,
    /// 32-bit ARGB8888 in 4x4 blocks split into AR and GB halves.
    Rgba32,
    /// 4-bit palette indices in 8x8 blocks.
    C4,
    /// 8-bit palette indices in 8x4 blocks.
    C8,
    /// 14-bit palette indices in 4x4 blocks.
    ///
    /// This format is recognized but not supported for decoding or encoding.
    C14x2,
    /// BC1 compressed 4x4 blocks grouped into 8x8 tiles.
    Cmpr,
    /// A format value not defined by the GX texture units.
    #[cfg_attr(feature = "strum", strum(disabled))]
    Unknown(u8),
}

impl From<u8> for TextureFormat {
    fn from(value: u8) -> Self {
        match value {
            0x0 => Self::I4,
            0x1 => Self::I8,
            0x2 => Self::Ia4,
            0x3 => Self::Ia8,
            0x4 => Self::Rgb565,
            0x5 => Self::Rgb5a3,
            0x6 => Self::Rgba32,
            0x8 => Self::C4,
            0x9 => Self::C8,
            0xA => Self::C14x2,
            0xE => Self::Cmpr,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TextureFormat> for u8 {
    fn from(value: TextureFormat) -> Self {
        match value {
            TextureFormat::I4 => 0x0,
            TextureFormat::I8 => 0x1,
            TextureFormat::Ia4 => 0x2,
            TextureFormat::Ia8 => 0x3,
            TextureFormat::Rgb565 => 0x4,
            TextureFormat::Rgb5a3 => 0x5,
            TextureFormat::Rgba32 => 0x6,
            TextureFormat::C4 => 0x8,
            TextureFormat::C8 => 0x9,
            TextureFormat::C14x2 => 0xA,
            TextureFormat::Cmpr => 0xE,
            TextureFormat::Unknown(value) => value,
        }
    }
}

impl TextureFormat {
    /// The number of bits used for each pixel or [None] for [TextureFormat::Unknown].
    pub fn bits_per_pixel(&self) -> Option<u32> {
        match self {
            TextureFormat::I4 => Some(4),
            TextureFormat::I8 => Some(8),
            TextureFormat::Ia4 => Some(8),
            TextureFormat::Ia8 => Some(16),
            TextureFormat::Rgb565 => Some(16),
            TextureFormat::Rgb5a3 => Some(16),
            TextureFormat::Rgba32 => Some(32),
            TextureFormat::C4 => Some(4),
            TextureFormat::C8 => Some(8),
            TextureFormat::C14x2 => Some(16),
            TextureFormat::Cmpr => Some(4),
            TextureFormat::Unknown(_) => None,
        }
    }

    /// The width and height in pixels of a single block or [None] for [TextureFormat::Unknown].
    pub fn block_dimensions(&self) -> Option<(u32, u32)> {
        // Every block except RGBA32 is 32 bytes.
        match self.bits_per_pixel()? {
            4 => Some((8, 8)),
            8 => Some((8, 4)),
            _ => Some((4, 4)),
        }
    }

    /// The size in bytes of a single block or [None] for [TextureFormat::Unknown].
    pub fn block_size_in_bytes(&self) -> Option<usize> {
        match self {
            TextureFormat::Rgba32 => Some(64),
            TextureFormat::Unknown(_) => None,
            _ => Some(32),
        }
    }

    /// The size in bytes of the encoded data for a `width` x `height` image.
    ///
    /// Images are padded to whole blocks.
    /// Returns [None] for [TextureFormat::Unknown] or if the size would overflow.
    pub fn encoded_size(&self, width: u32, height: u32) -> Option<usize> {
        let (block_width, block_height) = self.block_dimensions()?;
        let blocks_x = div_round_up(width as usize, block_width as usize);
        let blocks_y = div_round_up(height as usize, block_height as usize);
        blocks_x
            .checked_mul(blocks_y)?
            .checked_mul(self.block_size_in_bytes()?)
    }

    /// `true` if pixels store indices into a [Palette].
    pub fn is_paletted(&self) -> bool {
        matches!(
            self,
            TextureFormat::C4 | TextureFormat::C8 | TextureFormat::C14x2
        )
    }

    /// `true` if the format can be encoded from RGBA8.
    pub fn is_encodable(&self) -> bool {
        matches!(
            self,
            TextureFormat::I4 | TextureFormat::Rgb5a3 | TextureFormat::Rgba32 | TextureFormat::Cmpr
        )
    }
}

/// The encoding of each 2 byte entry in a [Palette].
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "strum", derive(strum::EnumString))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum PaletteFormat {
    /// 8-bit alpha followed by 8-bit intensity.
    #[default]
    Ia8,
    /// See [TextureFormat::Rgb565].
    Rgb565,
    /// See [TextureFormat::Rgb5a3].
    Rgb5a3,
}

impl PaletteFormat {
    /// Returns [None] if `value` is not a valid palette format.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Ia8),
            1 => Some(Self::Rgb565),
            2 => Some(Self::Rgb5a3),
            _ => None,
        }
    }

    /// The size of each decoded pixel for [TextureFormat::C4] and [TextureFormat::C8].
    pub fn bytes_per_pixel(&self) -> usize {
        // IA8 entries are copied as is without expanding to RGBA8.
        match self {
            PaletteFormat::Ia8 => 2,
            PaletteFormat::Rgb565 => 4,
            PaletteFormat::Rgb5a3 => 4,
        }
    }
}

impl From<PaletteFormat> for u8 {
    fn from(value: PaletteFormat) -> Self {
        match value {
            PaletteFormat::Ia8 => 0,
            PaletteFormat::Rgb565 => 1,
            PaletteFormat::Rgb5a3 => 2,
        }
    }
}

/// Image file formats for exporting decoded textures.
///
/// These have no meaning for the GX hardware and never appear in a [Header].
#[cfg_attr(feature = "strum", derive(strum::EnumString))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Tga,
}

impl ExportFormat {
    /// The file extension without the leading `.`.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Tga => "tga",
        }
    }
}

#[cfg(feature = "image")]
impl From<ExportFormat> for image::ImageFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Tga => image::ImageFormat::Tga,
        }
    }
}

fn div_round_up(x: usize, d: usize) -> usize {
    (x + d - 1) / d
}

fn round_up(x: usize, n: usize) -> usize {
    div_round_up(x, n) * n
}
