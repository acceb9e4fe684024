use thiserror::Error;

use crate::TextureFormat;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("input ended after {offset} of {expected} bytes while reading {section}")]
    TruncatedInput {
        section: InputSection,
        offset: usize,
        expected: usize,
    },

    #[error("encoding data to format {format:?} is not supported")]
    UnsupportedFormat { format: TextureFormat },

    #[error("palette has {entries} entries but at least {required} entries are required")]
    MalformedPalette { entries: usize, required: usize },

    #[error("palette with {entries} entries does not fit in a BTI header")]
    PaletteTooLarge { entries: usize },

    #[error("surface dimensions {width} x {height} contain no pixels")]
    ZeroSizedSurface { width: u32, height: u32 },

    #[error("surface dimensions {width} x {height} do not fit in a BTI header")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("surface pixel count {width} x {height} would overflow")]
    PixelCountWouldOverflow { width: u32, height: u32 },

    #[error("expected surface to have at least {expected} bytes but found {actual}")]
    NotEnoughData { expected: usize, actual: usize },

    #[error("value {value} is not valid for header field {field}")]
    InvalidHeaderValue { field: &'static str, value: u8 },

    #[error("error reading or writing data")]
    Io(#[from] std::io::Error),
}

/// The part of a BTI file being read when the input ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InputSection {
    Header,
    Image {
        format: TextureFormat,
        width: u32,
        height: u32,
    },
}

impl std::fmt::Display for InputSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSection::Header => write!(f, "header"),
            InputSection::Image {
                format,
                width,
                height,
            } => write!(f, "{format:?} image data for {width}x{height} pixels"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateImageError {
    #[error("data length {data_length} is not valid for a {width}x{height} image")]
    InvalidSurfaceDimensions {
        width: u32,
        height: u32,
        data_length: usize,
    },

    #[error("error decoding surface: {0}")]
    DecodeSurface(#[from] SurfaceError),
}
