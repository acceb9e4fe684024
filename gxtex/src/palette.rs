use std::io::{Read, Write};

use crate::{
    rgba::{rgba8_from_rgb565, rgba8_from_rgb5a3},
    PaletteFormat, SurfaceError,
};

/// The size in bytes of each palette entry for all palette formats.
pub const PALETTE_ENTRY_SIZE: usize = 2;

/// Raw 2 byte palette entries for [crate::TextureFormat::C4] and [crate::TextureFormat::C8].
///
/// Entries are interpreted when resolving an index based on the [PaletteFormat].
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Palette {
    data: Vec<u8>,
}

/// A resolved palette color.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PaletteEntry {
    /// A [PaletteFormat::Rgb565] or [PaletteFormat::Rgb5a3] entry expanded to RGBA8.
    Rgba8([u8; 4]),
    /// The alpha and intensity bytes of a [PaletteFormat::Ia8] entry.
    Ia8([u8; 2]),
}

impl PaletteEntry {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PaletteEntry::Rgba8(rgba) => rgba,
            PaletteEntry::Ia8(ia) => ia,
        }
    }
}

impl Palette {
    /// Create a palette from raw big endian entries.
    /// A trailing incomplete entry is ignored.
    pub fn new(mut data: Vec<u8>) -> Self {
        data.truncate(data.len() / PALETTE_ENTRY_SIZE * PALETTE_ENTRY_SIZE);
        Self { data }
    }

    /// Read `entry_count` entries from `reader`.
    ///
    /// Fails with [SurfaceError::MalformedPalette] if the reader ends before all entries are read.
    pub fn read<R: Read>(reader: &mut R, entry_count: u16) -> Result<Self, SurfaceError> {
        let size = entry_count as usize * PALETTE_ENTRY_SIZE;
        let mut data = Vec::new();
        reader.take(size as u64).read_to_end(&mut data)?;
        if data.len() < size {
            return Err(SurfaceError::MalformedPalette {
                entries: data.len() / PALETTE_ENTRY_SIZE,
                required: entry_count as usize,
            });
        }
        Ok(Self { data })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        writer.write_all(&self.data)?;
        Ok(())
    }

    pub fn entry_count(&self) -> usize {
        self.data.len() / PALETTE_ENTRY_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Look up the color for palette index `index`.
    ///
    /// [PaletteFormat::Ia8] entries are returned as is without expanding to RGBA8.
    pub fn resolve(&self, index: usize, format: PaletteFormat) -> Result<PaletteEntry, SurfaceError> {
        let start = index * PALETTE_ENTRY_SIZE;
        let entry = self
            .data
            .get(start..start + PALETTE_ENTRY_SIZE)
            .ok_or(SurfaceError::MalformedPalette {
                entries: self.entry_count(),
                required: index + 1,
            })?;

        Ok(match format {
            PaletteFormat::Ia8 => PaletteEntry::Ia8([entry[0], entry[1]]),
            PaletteFormat::Rgb565 => {
                PaletteEntry::Rgba8(rgba8_from_rgb565(u16::from_be_bytes([entry[0], entry[1]])))
            }
            PaletteFormat::Rgb5a3 => {
                PaletteEntry::Rgba8(rgba8_from_rgb5a3(u16::from_be_bytes([entry[0], entry[1]])))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_empty_palette() {
        let palette = Palette::read(&mut Cursor::new([1u8, 2]), 0).unwrap();
        assert!(palette.is_empty());
        assert_eq!(0, palette.entry_count());
    }

    #[test]
    fn read_palette() {
        let mut reader = Cursor::new([0x80u8, 0x00, 0xF8, 0x00, 0xFF]);
        let palette = Palette::read(&mut reader, 2).unwrap();
        assert_eq!(2, palette.entry_count());
        assert_eq!(&[0x80, 0x00, 0xF8, 0x00], palette.as_bytes());
        assert_eq!(4, reader.position());
    }

    #[test]
    fn read_palette_truncated() {
        let result = Palette::read(&mut Cursor::new([0u8; 5]), 3);
        assert!(matches!(
            result,
            Err(SurfaceError::MalformedPalette {
                entries: 2,
                required: 3
            })
        ));
    }

    #[test]
    fn read_palette_partial_entry() {
        let result = Palette::read(&mut Cursor::new([0u8; 1]), 1);
        assert!(matches!(
            result,
            Err(SurfaceError::MalformedPalette {
                entries: 0,
                required: 1
            })
        ));
    }

    #[test]
    fn resolve_each_format() {
        let palette = Palette::new(vec![0x80, 0x00, 0xF8, 0x00]);
        assert_eq!(
            PaletteEntry::Rgba8([0, 0, 0, 255]),
            palette.resolve(0, PaletteFormat::Rgb5a3).unwrap()
        );
        assert_eq!(
            PaletteEntry::Rgba8([255, 0, 0, 255]),
            palette.resolve(1, PaletteFormat::Rgb565).unwrap()
        );
        assert_eq!(
            PaletteEntry::Ia8([0xF8, 0x00]),
            palette.resolve(1, PaletteFormat::Ia8).unwrap()
        );
    }

    #[test]
    fn resolve_out_of_range() {
        let palette = Palette::new(vec![0x80, 0x00, 0xF8]);
        assert_eq!(1, palette.entry_count());
        assert!(matches!(
            palette.resolve(1, PaletteFormat::Rgb565),
            Err(SurfaceError::MalformedPalette {
                entries: 1,
                required: 2
            })
        ));
    }
}
