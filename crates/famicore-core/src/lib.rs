//! NES console composition.
//!
//! Wires the CPU, PPU, APU, controllers and a cartridge mapper into a
//! [`Console`] with the canonical tick ratio: three PPU dots, one CPU
//! cycle, one APU cycle per system tick. The front-end drives
//! [`Console::step`] (or [`Console::step_frame`]) and pulls the RGBA
//! framebuffer and the audio sample ring; the core owns no threads,
//! timers or wall clocks.

mod bus;
mod console;
pub mod input;
mod picture;

pub use bus::SystemBus;
pub use console::{Console, ConsoleError, CPU_CLOCK_HZ, CPU_TICK_NANOS};
pub use input::{Buttons, Controller};
pub use picture::PictureBus;

pub use famicore_apu::{Apu, SampleConsumer, NATIVE_SAMPLE_RATE};
pub use famicore_cpu::{Bus, Cpu, IrqLine, IrqSource, Status};
pub use famicore_mappers::{Cartridge, LoadError, Mapper, Mirroring};
pub use famicore_ppu::{Ppu, FRAME_HEIGHT, FRAME_WIDTH};
