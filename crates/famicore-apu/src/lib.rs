//! 2A03 APU emulation: five channels, the frame counter, the nonlinear
//! mixer, and a lock-free sample ring for the audio thread.
//!
//! The APU is clocked once per CPU cycle via [`Apu::clock`]. The pulse
//! channels divide that by two internally; the mixer produces one
//! sample per CPU pair, so the native output rate is half the CPU
//! clock (≈894.9 kHz) and the front-end resamples from there.

mod apu;
mod dmc;
mod envelope;
mod frame_counter;
mod length_counter;
mod mixer;
mod noise;
mod pulse;
mod ring;
mod sweep;
mod timer;
mod triangle;

pub use apu::{Apu, ChannelMask};
pub use dmc::Dmc;
pub use envelope::Envelope;
pub use frame_counter::{FrameCounter, FrameCounterMode, FrameTick};
pub use length_counter::LengthCounter;
pub use mixer::{mix, pulse_out, tnd_out};
pub use noise::Noise;
pub use pulse::{Pulse, PulseChannel};
pub use ring::{sample_ring, SampleConsumer, SampleProducer, DEFAULT_RING_CAPACITY};
pub use sweep::Sweep;
pub use timer::Timer;
pub use triangle::Triangle;

/// NTSC CPU clock rate in Hz.
pub const CPU_CLOCK_NTSC: u32 = 1_789_773;

/// Native sample rate: one mixed sample per CPU pair.
pub const NATIVE_SAMPLE_RATE: u32 = CPU_CLOCK_NTSC / 2;
