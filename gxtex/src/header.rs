use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{decode::read_section, InputSection, PaletteFormat, SurfaceError, TextureFormat};

/// The size in bytes of a [Header].
/// Headers for multiple textures in the same file are stored this many bytes apart.
pub const HEADER_SIZE: usize = 0x20;

/// Texture coordinate wrapping when sampling outside the texture.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl WrapMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::ClampToEdge),
            1 => Some(Self::Repeat),
            2 => Some(Self::MirroredRepeat),
            _ => None,
        }
    }
}

impl From<WrapMode> for u8 {
    fn from(value: WrapMode) -> Self {
        match value {
            WrapMode::ClampToEdge => 0,
            WrapMode::Repeat => 1,
            WrapMode::MirroredRepeat => 2,
        }
    }
}

/// Texture filtering for minification and magnification.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl FilterMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            2 => Some(Self::NearestMipmapNearest),
            3 => Some(Self::LinearMipmapNearest),
            4 => Some(Self::NearestMipmapLinear),
            5 => Some(Self::LinearMipmapLinear),
            _ => None,
        }
    }
}

impl From<FilterMode> for u8 {
    fn from(value: FilterMode) -> Self {
        match value {
            FilterMode::Nearest => 0,
            FilterMode::Linear => 1,
            FilterMode::NearestMipmapNearest => 2,
            FilterMode::LinearMipmapNearest => 3,
            FilterMode::NearestMipmapLinear => 4,
            FilterMode::LinearMipmapLinear => 5,
        }
    }
}

/// The fixed size big endian header describing a single texture.
///
/// The palette and image offsets are relative to the start of the header.
/// Sampler values like wrapping and filtering are only stored
/// and have no effect on decoding or encoding.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Header {
    pub format: TextureFormat,
    /// Nonzero if the texture uses alpha.
    pub alpha: u8,
    pub width: u16,
    pub height: u16,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub reserved0: u8,
    pub palette_format: PaletteFormat,
    pub palette_entry_count: u16,
    pub palette_offset: u32,
    /// RGBA color used when sampling outside the texture.
    pub border_color: [u8; 4],
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub reserved1: u16,
    /// The number of images including the base level.
    pub mipmap_count: u8,
    pub reserved2: u8,
    /// LOD bias in units of 1/100.
    pub lod_bias: i16,
    pub image_offset: u32,
}

impl Header {
    /// Create a header with default sampler values and no palette.
    pub fn new(format: TextureFormat, width: u16, height: u16) -> Self {
        Self {
            format,
            alpha: 0,
            width,
            height,
            wrap_s: WrapMode::default(),
            wrap_t: WrapMode::default(),
            reserved0: 0,
            palette_format: PaletteFormat::default(),
            palette_entry_count: 0,
            palette_offset: 0,
            border_color: [0; 4],
            min_filter: FilterMode::default(),
            mag_filter: FilterMode::default(),
            reserved1: 0,
            mipmap_count: 1,
            reserved2: 0,
            lod_bias: 0,
            image_offset: 0,
        }
    }

    /// Read a header from the current position of `reader`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, SurfaceError> {
        let bytes = read_section(reader, HEADER_SIZE, InputSection::Header)?;
        let mut reader = Cursor::new(bytes);

        Ok(Self {
            format: reader.read_u8()?.into(),
            alpha: reader.read_u8()?,
            width: reader.read_u16::<BigEndian>()?,
            height: reader.read_u16::<BigEndian>()?,
            wrap_s: read_enum(&mut reader, "wrap_s", WrapMode::from_u8)?,
            wrap_t: read_enum(&mut reader, "wrap_t", WrapMode::from_u8)?,
            reserved0: reader.read_u8()?,
            palette_format: read_enum(&mut reader, "palette_format", PaletteFormat::from_u8)?,
            palette_entry_count: reader.read_u16::<BigEndian>()?,
            palette_offset: reader.read_u32::<BigEndian>()?,
            border_color: [
                reader.read_u8()?,
                reader.read_u8()?,
                reader.read_u8()?,
                reader.read_u8()?,
            ],
            min_filter: read_enum(&mut reader, "min_filter", FilterMode::from_u8)?,
            mag_filter: read_enum(&mut reader, "mag_filter", FilterMode::from_u8)?,
            reserved1: reader.read_u16::<BigEndian>()?,
            mipmap_count: reader.read_u8()?,
            reserved2: reader.read_u8()?,
            lod_bias: reader.read_i16::<BigEndian>()?,
            image_offset: reader.read_u32::<BigEndian>()?,
        })
    }

    /// Read the header at index `index` in a list of headers starting at `base`.
    pub fn read_at<R: Read + Seek>(
        reader: &mut R,
        base: u64,
        index: u32,
    ) -> Result<Self, SurfaceError> {
        reader.seek(SeekFrom::Start(header_position(base, index)))?;
        Self::read(reader)
    }

    /// Write the header with the palette and image offsets set to zero.
    ///
    /// The offsets depend on where the data is written and are set by [crate::Bti::write].
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.write_with_offsets(writer, 0, 0)
    }

    pub(crate) fn write_with_offsets<W: Write>(
        &self,
        writer: &mut W,
        palette_offset: u32,
        image_offset: u32,
    ) -> Result<(), SurfaceError> {
        writer.write_u8(self.format.into())?;
        writer.write_u8(self.alpha)?;
        writer.write_u16::<BigEndian>(self.width)?;
        writer.write_u16::<BigEndian>(self.height)?;
        writer.write_u8(self.wrap_s.into())?;
        writer.write_u8(self.wrap_t.into())?;
        writer.write_u8(self.reserved0)?;
        writer.write_u8(self.palette_format.into())?;
        writer.write_u16::<BigEndian>(self.palette_entry_count)?;
        writer.write_u32::<BigEndian>(palette_offset)?;
        writer.write_all(&self.border_color)?;
        writer.write_u8(self.min_filter.into())?;
        writer.write_u8(self.mag_filter.into())?;
        writer.write_u16::<BigEndian>(self.reserved1)?;
        writer.write_u8(self.mipmap_count)?;
        writer.write_u8(self.reserved2)?;
        writer.write_i16::<BigEndian>(self.lod_bias)?;
        writer.write_u32::<BigEndian>(image_offset)?;
        Ok(())
    }

    /// The LOD bias as a floating point value.
    pub fn lod_bias_f32(&self) -> f32 {
        self.lod_bias as f32 / 100.0
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha != 0
    }
}

pub(crate) fn header_position(base: u64, index: u32) -> u64 {
    base + HEADER_SIZE as u64 * index as u64
}

fn read_enum<T>(
    reader: &mut Cursor<Vec<u8>>,
    field: &'static str,
    from_u8: fn(u8) -> Option<T>,
) -> Result<T, SurfaceError> {
    let value = reader.read_u8()?;
    from_u8(value).ok_or(SurfaceError::InvalidHeaderValue { field, value })
}
