//! PPU-space bus: pattern tables, nametables, palette.

use famicore_mappers::{Mapper, Mirroring};
use famicore_ppu::PpuBus;
use std::cell::RefCell;
use std::rc::Rc;

/// Where one of the four logical nametable slots resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nametable {
    /// Offset into the 2 KiB internal nametable RAM.
    Ram(usize),
    /// Four-screen: the cartridge supplies the memory on its CHR path.
    Cartridge,
}

/// The PPU's view of memory.
///
/// `$0000-$1FFF` is the mapper CHR window; `$2000-$3EFF` maps the four
/// 1 KiB nametable slots through the mirroring table onto 2 KiB of
/// internal RAM (`$3000+` folds down by `$1000`); `$3F00-$3FFF` is the
/// 32-byte palette with `$10/$14/$18/$1C` aliased onto their
/// background counterparts.
#[derive(Debug)]
pub struct PictureBus {
    vram: [u8; 0x800],
    palette: [u8; 32],
    nametables: [Nametable; 4],
    mapper: Rc<RefCell<Mapper>>,
}

impl PictureBus {
    /// Build the bus over a shared mapper handle.
    #[must_use]
    pub fn new(mapper: Rc<RefCell<Mapper>>) -> Self {
        let mut bus = Self {
            vram: [0; 0x800],
            palette: [0; 32],
            nametables: [Nametable::Ram(0); 4],
            mapper,
        };
        bus.update_mirroring();
        bus
    }

    /// Rebuild the nametable map from the mapper's current mode.
    /// Called after any PRG write that changed the mirroring.
    pub fn update_mirroring(&mut self) {
        use Nametable::{Cartridge, Ram};
        self.nametables = match self.mapper.borrow().mirroring() {
            Mirroring::Horizontal => [Ram(0), Ram(0), Ram(0x400), Ram(0x400)],
            Mirroring::Vertical => [Ram(0), Ram(0x400), Ram(0), Ram(0x400)],
            Mirroring::SingleScreenLower => [Ram(0); 4],
            Mirroring::SingleScreenUpper => [Ram(0x400); 4],
            Mirroring::FourScreen => [Cartridge; 4],
        };
    }

    /// Fold `$3000-$3EFF` down and split a nametable address into its
    /// slot and offset.
    fn nametable_slot(addr: u16) -> (usize, usize) {
        let addr = if addr >= 0x3000 { addr - 0x1000 } else { addr };
        (usize::from(addr >> 10 & 3), usize::from(addr & 0x3FF))
    }

    /// Palette index with the sprite-backdrop aliasing applied.
    fn palette_index(index: u8) -> usize {
        let index = index & 0x1F;
        if index >= 0x10 && index % 4 == 0 {
            usize::from(index & 0x0F)
        } else {
            usize::from(index)
        }
    }
}

impl PpuBus for PictureBus {
    fn read(&mut self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.mapper.borrow().read_chr(addr),
            0x2000..=0x3EFF => {
                let (slot, offset) = Self::nametable_slot(addr);
                match self.nametables[slot] {
                    Nametable::Ram(base) => self.vram[base + offset],
                    Nametable::Cartridge => self.mapper.borrow().read_chr(addr),
                }
            }
            _ => self.read_palette(addr as u8),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.mapper.borrow_mut().write_chr(addr, value),
            0x2000..=0x3EFF => {
                let (slot, offset) = Self::nametable_slot(addr);
                match self.nametables[slot] {
                    Nametable::Ram(base) => self.vram[base + offset] = value,
                    Nametable::Cartridge => self.mapper.borrow_mut().write_chr(addr, value),
                }
            }
            _ => self.palette[Self::palette_index(addr as u8)] = value,
        }
    }

    fn read_palette(&self, index: u8) -> u8 {
        self.palette[Self::palette_index(index)]
    }

    fn scanline_tick(&mut self) {
        self.mapper.borrow_mut().tick_scanline();
    }
}
