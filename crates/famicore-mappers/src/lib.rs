//! Cartridge loading and the NES mapper family.
//!
//! [`Cartridge`] parses an iNES 1.0 image into immutable PRG/CHR buffers
//! plus the mapper id and mirroring hint. [`Mapper`] wraps the seven
//! supported board families behind a closed sum type: address
//! translation for the CPU's PRG window and the PPU's CHR window, the
//! live mirroring mode, and the per-scanline IRQ hook.
//!
//! # Supported mappers
//!
//! | Id | Board | Banking |
//! |----|-------|---------|
//! | 0  | NROM  | none |
//! | 1  | MMC1  | serial register, 16/32 KiB PRG, 4/8 KiB CHR |
//! | 2  | UxROM | 16 KiB PRG at $8000, last fixed |
//! | 3  | CNROM | 8 KiB CHR |
//! | 4  | MMC3  | 8 KiB PRG, 2/1 KiB CHR, scanline IRQ |
//! | 7  | AxROM | 32 KiB PRG, single-screen mirroring |
//! | 66 | GxROM | 32 KiB PRG + 8 KiB CHR |

mod axrom;
mod cartridge;
mod cnrom;
mod gxrom;
mod mapper;
mod mmc1;
mod mmc3;
mod nrom;
mod uxrom;

pub use axrom::Axrom;
pub use cartridge::{Cartridge, LoadError};
pub use cnrom::Cnrom;
pub use gxrom::Gxrom;
pub use mapper::{Mapper, Mirroring};
pub use mmc1::Mmc1;
pub use mmc3::Mmc3;
pub use nrom::Nrom;
pub use uxrom::Uxrom;
