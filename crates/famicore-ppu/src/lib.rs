//! Ricoh 2C02 PPU emulation.
//!
//! [`Ppu::step`] advances one dot of the 341×262 NTSC frame, composing
//! pixels directly into a double-buffered RGBA framebuffer. Memory
//! accesses go through the [`PpuBus`] trait (pattern tables, nametables
//! and palette live behind it); the CPU-visible register surface is a
//! set of explicit read/write methods the system bus calls.

mod frame;
mod palette;
mod ppu;
mod registers;
mod scroll;

pub use frame::FrameBuffer;
pub use palette::NTSC_PALETTE;
pub use ppu::{Phase, Ppu, FRAME_HEIGHT, FRAME_WIDTH};
pub use registers::{Ctrl, Mask, StatusFlags};
pub use scroll::Scroll;

/// PPU memory as seen from the rendering pipeline.
pub trait PpuBus {
    /// Read from PPU address space ($0000-$3FFF).
    fn read(&mut self, addr: u16) -> u8;

    /// Write to PPU address space.
    fn write(&mut self, addr: u16, value: u8);

    /// Read a palette entry (index 0-31, with hardware aliasing).
    fn read_palette(&self, index: u8) -> u8;

    /// Mapper scanline hook, raised once per rendering line at dot 260.
    fn scanline_tick(&mut self);
}
