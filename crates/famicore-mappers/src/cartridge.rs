//! iNES 1.0 ROM image parsing.
//!
//! ```text
//! Byte 0-3:  Magic "NES" + MS-DOS EOF (4E 45 53 1A)
//! Byte 4:    PRG-ROM size in 16 KiB units
//! Byte 5:    CHR-ROM size in 8 KiB units (0 = board carries CHR-RAM)
//! Byte 6:    Flags: mirroring, battery, trainer, four-screen, mapper low
//! Byte 7:    Flags: mapper high nibble
//! Byte 9:    TV system (bit 0 set = PAL, rejected)
//! Byte 11-15: Must be zero for a clean iNES 1.0 header
//! ```

use crate::mapper::Mirroring;

/// Errors produced while parsing a ROM image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// Leading magic bytes are not `NES<EOF>`.
    #[error("invalid iNES magic: expected [4E 45 53 1A], got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// Image ends before the declared PRG/CHR data (or the header).
    #[error("truncated ROM image: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum size the header promised.
        expected: usize,
        /// Actual image size.
        actual: usize,
    },

    /// Header declares a PAL cartridge.
    #[error("PAL cartridges are not supported")]
    PalRom,

    /// Bytes 11-15 are not zero; the image is not clean iNES 1.0.
    #[error("non-zero padding in header byte {0}")]
    DirtyHeader(usize),

    /// No implementation for the requested mapper id.
    #[error("unsupported mapper id {0}")]
    UnsupportedMapper(u8),
}

/// A parsed cartridge: immutable PRG/CHR data plus board facts.
#[derive(Debug, Clone)]
pub struct Cartridge {
    /// PRG-ROM, a multiple of 16 KiB.
    pub prg: Vec<u8>,
    /// CHR-ROM, a multiple of 8 KiB; empty means the board has CHR-RAM.
    pub chr: Vec<u8>,
    /// iNES mapper id.
    pub mapper_id: u8,
    /// Solder-pad mirroring hint (a mapper may override it).
    pub mirroring: Mirroring,
}

impl Cartridge {
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
    const HEADER_LEN: usize = 16;
    const TRAINER_LEN: usize = 512;

    /// Parse an iNES 1.0 image from raw bytes.
    ///
    /// A 512-byte trainer, if flagged, is skipped. PAL images and images
    /// with non-zero reserved header bytes are rejected.
    pub fn load(data: &[u8]) -> Result<Self, LoadError> {
        if data.len() < Self::HEADER_LEN {
            return Err(LoadError::Truncated {
                expected: Self::HEADER_LEN,
                actual: data.len(),
            });
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != Self::MAGIC {
            return Err(LoadError::InvalidMagic(magic));
        }

        if data[9] & 0x01 != 0 {
            return Err(LoadError::PalRom);
        }
        if let Some(i) = (11..16).find(|&i| data[i] != 0) {
            return Err(LoadError::DirtyHeader(i));
        }

        let prg_len = data[4] as usize * 16 * 1024;
        let chr_len = data[5] as usize * 8 * 1024;
        let mapper_id = (data[7] & 0xF0) | (data[6] >> 4);

        let mirroring = if data[6] & 0x08 != 0 {
            Mirroring::FourScreen
        } else if data[6] & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut offset = Self::HEADER_LEN;
        if data[6] & 0x04 != 0 {
            offset += Self::TRAINER_LEN;
        }

        let expected = offset + prg_len + chr_len;
        if data.len() < expected {
            return Err(LoadError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg = data[offset..offset + prg_len].to_vec();
        let chr = data[offset + prg_len..offset + prg_len + chr_len].to_vec();

        log::info!(
            "loaded cartridge: mapper {mapper_id}, PRG {} KiB, CHR {} KiB, {mirroring:?}",
            prg_len / 1024,
            chr_len / 1024,
        );

        Ok(Self {
            prg,
            chr,
            mapper_id,
            mirroring,
        })
    }

    /// True when the board carries 8 KiB of CHR-RAM instead of CHR-ROM.
    #[must_use]
    pub fn has_chr_ram(&self) -> bool {
        self.chr.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn build_image(prg_banks: u8, chr_banks: u8, flags6: u8) -> Vec<u8> {
        let mut image = vec![0x4E, 0x45, 0x53, 0x1A, prg_banks, chr_banks, flags6, 0x00];
        image.extend_from_slice(&[0; 8]);
        image.extend(std::iter::repeat(0).take(prg_banks as usize * 16384));
        image.extend(std::iter::repeat(0).take(chr_banks as usize * 8192));
        image
    }

    #[test]
    fn parses_minimal_image() {
        let cart = Cartridge::load(&build_image(2, 1, 0x00)).unwrap();
        assert_eq!(cart.prg.len(), 32768);
        assert_eq!(cart.chr.len(), 8192);
        assert_eq!(cart.mapper_id, 0);
        assert_eq!(cart.mirroring, Mirroring::Horizontal);
        assert!(!cart.has_chr_ram());
    }

    #[test]
    fn mapper_id_from_both_nibbles() {
        let mut image = build_image(1, 1, 0x40); // Low nibble 4
        image[7] = 0x40; // High nibble 4 -> mapper 68
        let cart = Cartridge::load(&image).unwrap();
        assert_eq!(cart.mapper_id, 0x44);
    }

    #[test]
    fn mirroring_flags() {
        assert_eq!(
            Cartridge::load(&build_image(1, 1, 0x01)).unwrap().mirroring,
            Mirroring::Vertical
        );
        assert_eq!(
            Cartridge::load(&build_image(1, 1, 0x08)).unwrap().mirroring,
            Mirroring::FourScreen
        );
        // Four-screen wins over the vertical bit.
        assert_eq!(
            Cartridge::load(&build_image(1, 1, 0x09)).unwrap().mirroring,
            Mirroring::FourScreen
        );
    }

    #[test]
    fn trainer_is_skipped() {
        let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0x04, 0x00];
        image.extend_from_slice(&[0; 8]);
        image.extend(std::iter::repeat(0xAA).take(512)); // Trainer
        let mut prg = vec![0u8; 16384];
        prg[0] = 0x42;
        image.extend_from_slice(&prg);

        let cart = Cartridge::load(&image).unwrap();
        assert_eq!(cart.prg[0], 0x42);
        assert!(cart.has_chr_ram());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut image = build_image(1, 1, 0x00);
        image[0] = 0x00;
        assert!(matches!(
            Cartridge::load(&image),
            Err(LoadError::InvalidMagic(_))
        ));
    }

    #[test]
    fn rejects_pal() {
        let mut image = build_image(1, 1, 0x00);
        image[9] = 0x01;
        assert!(matches!(Cartridge::load(&image), Err(LoadError::PalRom)));
    }

    #[test]
    fn rejects_dirty_padding() {
        let mut image = build_image(1, 1, 0x00);
        image[12] = 0x55;
        assert!(matches!(
            Cartridge::load(&image),
            Err(LoadError::DirtyHeader(12))
        ));
    }

    #[test]
    fn rejects_truncated_prg() {
        let mut image = build_image(2, 1, 0x00);
        image.truncate(16 + 1000);
        assert!(matches!(
            Cartridge::load(&image),
            Err(LoadError::Truncated { .. })
        ));
    }
}
