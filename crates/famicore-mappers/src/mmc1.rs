//! Mapper 1: MMC1.
//!
//! All registers are written through a 5-bit serial shift register:
//! five writes with the value in bit 0, LSB first, then the address of
//! the fifth write selects the destination. A write with bit 7 set
//! resets the shift register and forces PRG mode 3 (fix-last).
//!
//! Register map (address of the committing write):
//! - $8000-$9FFF control: mirroring, PRG mode, CHR mode
//! - $A000-$BFFF CHR bank 0
//! - $C000-$DFFF CHR bank 1
//! - $E000-$FFFF PRG bank

use crate::cartridge::Cartridge;
use crate::mapper::Mirroring;

/// PRG banking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PrgMode {
    /// Switch 32 KiB at $8000, bank number's low bit ignored.
    Switch32K,
    /// First bank fixed at $8000, 16 KiB switched at $C000.
    FixFirst,
    /// Last bank fixed at $C000, 16 KiB switched at $8000.
    #[default]
    FixLast,
}

/// CHR banking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ChrMode {
    /// One 8 KiB bank, bank number's low bit ignored.
    #[default]
    Switch8K,
    /// Two independent 4 KiB banks.
    Switch4K,
}

/// MMC1 board state.
#[derive(Debug)]
pub struct Mmc1 {
    cart: Cartridge,
    chr_ram: Vec<u8>,

    shift_reg: u8,
    shift_count: u8,

    mirroring: Mirroring,
    mirroring_dirty: bool,
    prg_mode: PrgMode,
    chr_mode: ChrMode,

    chr_bank_0: u8,
    chr_bank_1: u8,
    prg_bank: u8,
}

impl Mmc1 {
    /// Wrap a cartridge on an MMC1 board.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        let chr_ram = if cart.has_chr_ram() {
            vec![0; 8 * 1024]
        } else {
            Vec::new()
        };
        let mirroring = cart.mirroring;
        Self {
            cart,
            chr_ram,
            shift_reg: 0,
            shift_count: 0,
            mirroring,
            mirroring_dirty: false,
            prg_mode: PrgMode::FixLast,
            chr_mode: ChrMode::Switch8K,
            chr_bank_0: 0,
            chr_bank_1: 0,
            prg_bank: 0,
        }
    }

    pub(crate) fn read_prg(&self, addr: u16) -> u8 {
        let offset = self.prg_offset(addr);
        self.cart.prg.get(offset).copied().unwrap_or(0)
    }

    pub(crate) fn write_prg(&mut self, addr: u16, value: u8) {
        if value & 0x80 != 0 {
            self.shift_reg = 0;
            self.shift_count = 0;
            self.prg_mode = PrgMode::FixLast;
            return;
        }

        self.shift_reg |= (value & 1) << self.shift_count;
        self.shift_count += 1;

        if self.shift_count == 5 {
            let assembled = self.shift_reg;
            self.shift_reg = 0;
            self.shift_count = 0;

            match (addr >> 13) & 0x03 {
                0 => self.write_control(assembled),
                1 => self.chr_bank_0 = assembled,
                2 => self.chr_bank_1 = assembled,
                3 => self.prg_bank = assembled & 0x0F,
                _ => unreachable!(),
            }
        }
    }

    fn write_control(&mut self, value: u8) {
        let mirroring = match value & 0x03 {
            0 => Mirroring::SingleScreenLower,
            1 => Mirroring::SingleScreenUpper,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        };
        if mirroring != self.mirroring {
            self.mirroring = mirroring;
            self.mirroring_dirty = true;
        }

        self.prg_mode = match (value >> 2) & 0x03 {
            0 | 1 => PrgMode::Switch32K,
            2 => PrgMode::FixFirst,
            _ => PrgMode::FixLast,
        };

        self.chr_mode = if value & 0x10 != 0 {
            ChrMode::Switch4K
        } else {
            ChrMode::Switch8K
        };
    }

    fn prg_offset(&self, addr: u16) -> usize {
        let banks = (self.cart.prg.len() / 0x4000).max(1);
        let bank = match self.prg_mode {
            PrgMode::Switch32K => {
                let base = (self.prg_bank & 0x0E) as usize;
                if addr < 0xC000 { base } else { base + 1 }
            }
            PrgMode::FixFirst => {
                if addr < 0xC000 {
                    0
                } else {
                    self.prg_bank as usize
                }
            }
            PrgMode::FixLast => {
                if addr < 0xC000 {
                    self.prg_bank as usize
                } else {
                    banks - 1
                }
            }
        };
        (bank % banks) * 0x4000 + (addr & 0x3FFF) as usize
    }

    fn chr_offset(&self, addr: u16) -> usize {
        let len = if self.cart.has_chr_ram() {
            self.chr_ram.len()
        } else {
            self.cart.chr.len()
        };
        let banks = (len / 0x1000).max(1);

        let bank = match self.chr_mode {
            ChrMode::Switch8K => {
                let base = (self.chr_bank_0 & 0x1E) as usize;
                if addr < 0x1000 { base } else { base + 1 }
            }
            ChrMode::Switch4K => {
                if addr < 0x1000 {
                    self.chr_bank_0 as usize
                } else {
                    self.chr_bank_1 as usize
                }
            }
        };
        (bank % banks) * 0x1000 + (addr & 0x0FFF) as usize
    }

    pub(crate) fn read_chr(&self, addr: u16) -> u8 {
        let offset = self.chr_offset(addr);
        if self.cart.has_chr_ram() {
            self.chr_ram.get(offset).copied().unwrap_or(0)
        } else {
            self.cart.chr.get(offset).copied().unwrap_or(0)
        }
    }

    pub(crate) fn write_chr(&mut self, addr: u16, value: u8) {
        if self.cart.has_chr_ram() {
            let offset = self.chr_offset(addr);
            if let Some(byte) = self.chr_ram.get_mut(offset) {
                *byte = value;
            }
        }
    }

    pub(crate) fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub(crate) fn take_mirroring_changed(&mut self) -> bool {
        std::mem::take(&mut self.mirroring_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::tests::test_cartridge;

    /// Serially write a 5-bit value, committing at `addr`.
    fn write_serial(mmc1: &mut Mmc1, addr: u16, value: u8) {
        for bit in 0..5 {
            mmc1.write_prg(addr, (value >> bit) & 1);
        }
    }

    #[test]
    fn reset_bit_clears_shift_and_forces_fix_last() {
        let mut mmc1 = Mmc1::new(test_cartridge(1, 8, 2, Mirroring::Horizontal));
        mmc1.write_prg(0x8000, 0x01);
        mmc1.write_prg(0x8000, 0x00);
        assert_eq!(mmc1.shift_count, 2);

        mmc1.write_prg(0x8000, 0x80);
        assert_eq!(mmc1.shift_count, 0);
        assert_eq!(mmc1.prg_mode, PrgMode::FixLast);
    }

    #[test]
    fn fix_last_banks_prg() {
        // Test cartridge PRG bytes equal their 16 KiB bank number.
        let mut mmc1 = Mmc1::new(test_cartridge(1, 8, 2, Mirroring::Horizontal));
        write_serial(&mut mmc1, 0xE000, 3);

        assert_eq!(mmc1.read_prg(0x8000), 3);
        assert_eq!(mmc1.read_prg(0xC000), 7, "last bank fixed at $C000");
    }

    #[test]
    fn fix_last_selects_bank_14_of_16() {
        // Reset, then bank 14 of a 256 KiB image: $8000 reads bank 14,
        // $FFFC still reads the last bank.
        let mut mmc1 = Mmc1::new(test_cartridge(1, 16, 2, Mirroring::Horizontal));
        mmc1.write_prg(0x8000, 0x80);
        write_serial(&mut mmc1, 0xE000, 0x0E);

        assert_eq!(mmc1.read_prg(0x8000), 14);
        assert_eq!(mmc1.read_prg(0xFFFC), 15);
    }

    #[test]
    fn switch_32k_ignores_low_bit() {
        let mut mmc1 = Mmc1::new(test_cartridge(1, 8, 2, Mirroring::Horizontal));
        write_serial(&mut mmc1, 0x8000, 0x00); // Control: 32K mode
        write_serial(&mut mmc1, 0xE000, 0x05); // Bank 5 -> pair 4/5

        assert_eq!(mmc1.read_prg(0x8000), 4);
        assert_eq!(mmc1.read_prg(0xC000), 5);
    }

    #[test]
    fn mirroring_register_notifies_once() {
        let mut mmc1 = Mmc1::new(test_cartridge(1, 2, 1, Mirroring::Horizontal));
        write_serial(&mut mmc1, 0x8000, 0x0E); // Vertical, fix-last
        assert_eq!(mmc1.mirroring(), Mirroring::Vertical);
        assert!(mmc1.take_mirroring_changed());
        assert!(!mmc1.take_mirroring_changed());

        // Writing the same mode again is not a change.
        write_serial(&mut mmc1, 0x8000, 0x0E);
        assert!(!mmc1.take_mirroring_changed());
    }

    #[test]
    fn chr_4k_banks_are_independent() {
        let mut mmc1 = Mmc1::new(test_cartridge(1, 2, 4, Mirroring::Horizontal));
        write_serial(&mut mmc1, 0x8000, 0x1E); // 4K CHR mode
        write_serial(&mut mmc1, 0xA000, 0x03); // Lower window: 4K bank 3
        write_serial(&mut mmc1, 0xC000, 0x05); // Upper window: 4K bank 5

        // CHR bytes equal their 8 KiB bank number, so 4K bank n reads n/2.
        assert_eq!(mmc1.read_chr(0x0000), 1);
        assert_eq!(mmc1.read_chr(0x1000), 2);
    }
}
