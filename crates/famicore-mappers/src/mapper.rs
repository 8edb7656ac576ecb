//! The mapper sum type and mirroring modes.

use crate::cartridge::{Cartridge, LoadError};
use crate::{Axrom, Cnrom, Gxrom, Mmc1, Mmc3, Nrom, Uxrom};
use famicore_cpu::IrqLine;

/// Nametable mirroring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// $2000/$2400 share, $2800/$2C00 share.
    #[default]
    Horizontal,
    /// $2000/$2800 share, $2400/$2C00 share.
    Vertical,
    /// All four slots map to the first 1 KiB.
    SingleScreenLower,
    /// All four slots map to the second 1 KiB.
    SingleScreenUpper,
    /// Cartridge supplies the extra nametable memory.
    FourScreen,
}

/// A cartridge board, dispatched by mapper id.
///
/// The set of supported boards is closed, so dispatch is a plain match
/// rather than a trait object. Every variant owns its [`Cartridge`] and
/// whatever bank registers and CHR-RAM the board carries.
#[derive(Debug)]
pub enum Mapper {
    /// Mapper 0.
    Nrom(Nrom),
    /// Mapper 1.
    Mmc1(Mmc1),
    /// Mapper 2.
    Uxrom(Uxrom),
    /// Mapper 3.
    Cnrom(Cnrom),
    /// Mapper 4.
    Mmc3(Mmc3),
    /// Mapper 7.
    Axrom(Axrom),
    /// Mapper 66.
    Gxrom(Gxrom),
}

impl Mapper {
    /// Build the board for a cartridge. Unknown mapper ids are fatal.
    ///
    /// `irq` is the shared CPU interrupt line; only MMC3 keeps a handle.
    pub fn new(cart: Cartridge, irq: &IrqLine) -> Result<Self, LoadError> {
        match cart.mapper_id {
            0 => Ok(Self::Nrom(Nrom::new(cart))),
            1 => Ok(Self::Mmc1(Mmc1::new(cart))),
            2 => Ok(Self::Uxrom(Uxrom::new(cart))),
            3 => Ok(Self::Cnrom(Cnrom::new(cart))),
            4 => Ok(Self::Mmc3(Mmc3::new(cart, irq.clone()))),
            7 => Ok(Self::Axrom(Axrom::new(cart))),
            66 => Ok(Self::Gxrom(Gxrom::new(cart))),
            id => Err(LoadError::UnsupportedMapper(id)),
        }
    }

    /// Read from the CPU-visible PRG window ($8000-$FFFF).
    #[must_use]
    pub fn read_prg(&self, addr: u16) -> u8 {
        match self {
            Self::Nrom(m) => m.read_prg(addr),
            Self::Mmc1(m) => m.read_prg(addr),
            Self::Uxrom(m) => m.read_prg(addr),
            Self::Cnrom(m) => m.read_prg(addr),
            Self::Mmc3(m) => m.read_prg(addr),
            Self::Axrom(m) => m.read_prg(addr),
            Self::Gxrom(m) => m.read_prg(addr),
        }
    }

    /// Write to the PRG window; boards treat this as register space.
    pub fn write_prg(&mut self, addr: u16, value: u8) {
        match self {
            Self::Nrom(m) => m.write_prg(addr, value),
            Self::Mmc1(m) => m.write_prg(addr, value),
            Self::Uxrom(m) => m.write_prg(addr, value),
            Self::Cnrom(m) => m.write_prg(addr, value),
            Self::Mmc3(m) => m.write_prg(addr, value),
            Self::Axrom(m) => m.write_prg(addr, value),
            Self::Gxrom(m) => m.write_prg(addr, value),
        }
    }

    /// Read from the PPU-visible CHR window ($0000-$1FFF).
    #[must_use]
    pub fn read_chr(&self, addr: u16) -> u8 {
        match self {
            Self::Nrom(m) => m.read_chr(addr),
            Self::Mmc1(m) => m.read_chr(addr),
            Self::Uxrom(m) => m.read_chr(addr),
            Self::Cnrom(m) => m.read_chr(addr),
            Self::Mmc3(m) => m.read_chr(addr),
            Self::Axrom(m) => m.read_chr(addr),
            Self::Gxrom(m) => m.read_chr(addr),
        }
    }

    /// Write to the CHR window; only boards with CHR-RAM accept it.
    pub fn write_chr(&mut self, addr: u16, value: u8) {
        match self {
            Self::Nrom(m) => m.write_chr(addr, value),
            Self::Mmc1(m) => m.write_chr(addr, value),
            Self::Uxrom(m) => m.write_chr(addr, value),
            Self::Cnrom(m) => m.write_chr(addr, value),
            Self::Mmc3(m) => m.write_chr(addr, value),
            Self::Axrom(m) => m.write_chr(addr, value),
            Self::Gxrom(m) => m.write_chr(addr, value),
        }
    }

    /// Current nametable mirroring (may differ from the cartridge hint).
    #[must_use]
    pub fn mirroring(&self) -> Mirroring {
        match self {
            Self::Nrom(m) => m.mirroring(),
            Self::Mmc1(m) => m.mirroring(),
            Self::Uxrom(m) => m.mirroring(),
            Self::Cnrom(m) => m.mirroring(),
            Self::Mmc3(m) => m.mirroring(),
            Self::Axrom(m) => m.mirroring(),
            Self::Gxrom(m) => m.mirroring(),
        }
    }

    /// Drain the "a write changed the mirroring mode" notification.
    pub fn take_mirroring_changed(&mut self) -> bool {
        match self {
            Self::Mmc1(m) => m.take_mirroring_changed(),
            Self::Mmc3(m) => m.take_mirroring_changed(),
            Self::Axrom(m) => m.take_mirroring_changed(),
            Self::Nrom(_) | Self::Uxrom(_) | Self::Cnrom(_) | Self::Gxrom(_) => false,
        }
    }

    /// Scanline hook, invoked by the PPU at dot 260 of rendering lines.
    pub fn tick_scanline(&mut self) {
        if let Self::Mmc3(m) = self {
            m.tick_scanline();
        }
    }

    /// iNES mapper id.
    #[must_use]
    pub fn id(&self) -> u8 {
        match self {
            Self::Nrom(_) => 0,
            Self::Mmc1(_) => 1,
            Self::Uxrom(_) => 2,
            Self::Cnrom(_) => 3,
            Self::Mmc3(_) => 4,
            Self::Axrom(_) => 7,
            Self::Gxrom(_) => 66,
        }
    }

    /// Board family name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nrom(_) => "NROM",
            Self::Mmc1(_) => "MMC1",
            Self::Uxrom(_) => "UxROM",
            Self::Cnrom(_) => "CNROM",
            Self::Mmc3(_) => "MMC3",
            Self::Axrom(_) => "AxROM",
            Self::Gxrom(_) => "GxROM",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Cartridge with ascending PRG bytes and descending CHR bytes, handy
    /// for checking bank arithmetic.
    pub(crate) fn test_cartridge(
        mapper_id: u8,
        prg_banks: usize,
        chr_banks: usize,
        mirroring: Mirroring,
    ) -> Cartridge {
        let prg = (0..prg_banks * 16384).map(|i| (i / 16384) as u8).collect();
        let chr = (0..chr_banks * 8192).map(|i| (i / 8192) as u8).collect();
        Cartridge {
            prg,
            chr,
            mapper_id,
            mirroring,
        }
    }

    #[test]
    fn dispatch_table_covers_the_family() {
        let irq = IrqLine::new();
        for (id, name) in [
            (0u8, "NROM"),
            (1, "MMC1"),
            (2, "UxROM"),
            (3, "CNROM"),
            (4, "MMC3"),
            (7, "AxROM"),
            (66, "GxROM"),
        ] {
            let cart = test_cartridge(id, 2, 1, Mirroring::Vertical);
            let mapper = Mapper::new(cart, &irq).unwrap();
            assert_eq!(mapper.id(), id);
            assert_eq!(mapper.name(), name);
        }
    }

    #[test]
    fn unknown_mapper_is_fatal() {
        let irq = IrqLine::new();
        let cart = test_cartridge(11, 2, 1, Mirroring::Vertical);
        assert!(matches!(
            Mapper::new(cart, &irq),
            Err(LoadError::UnsupportedMapper(11))
        ));
    }

    #[test]
    fn default_scanline_hook_is_inert() {
        let irq = IrqLine::new();
        let cart = test_cartridge(0, 1, 1, Mirroring::Horizontal);
        let mut mapper = Mapper::new(cart, &irq).unwrap();
        mapper.tick_scanline();
        assert!(!irq.asserted());
    }
}
