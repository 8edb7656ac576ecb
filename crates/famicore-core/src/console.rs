//! Console composition and the system tick.

use crate::bus::SystemBus;
use crate::input::Buttons;
use famicore_apu::{Apu, SampleConsumer};
use famicore_cpu::Cpu;
use famicore_mappers::{Cartridge, LoadError, Mapper};
use std::cell::RefCell;
use std::rc::Rc;

/// NTSC CPU clock in Hz.
pub const CPU_CLOCK_HZ: u32 = 1_789_773;

/// One CPU period in nanoseconds, rounded (≈559 ns); front-ends divide
/// elapsed wall time by this to decide how many ticks to run.
pub const CPU_TICK_NANOS: u64 =
    (1_000_000_000 + CPU_CLOCK_HZ as u64 / 2) / CPU_CLOCK_HZ as u64;

/// Errors surfaced while assembling a console.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The ROM image could not be used.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The assembled machine.
///
/// One [`Console::step`] is one system tick: three PPU dots, one CPU
/// cycle, one APU cycle, in that order. The ordering is observable —
/// a flag the PPU raises on its dot is readable by the CPU in the same
/// tick, and the NMI edge is sampled by the CPU right after the PPU
/// dots that produced it.
#[derive(Debug)]
pub struct Console {
    cpu: Cpu,
    bus: SystemBus,
    paused: bool,
    ticks: u64,
    frames: u64,
}

impl Console {
    /// Build a console from an iNES image and run the RESET sequence.
    pub fn new(rom: &[u8]) -> Result<Self, ConsoleError> {
        let cart = Cartridge::load(rom)?;
        let cpu = Cpu::new();
        let irq = cpu.irq_line();

        let mapper = Rc::new(RefCell::new(Mapper::new(cart, &irq)?));
        log::info!("console up: {} board", mapper.borrow().name());

        let bus = SystemBus::new(mapper, Apu::new(&irq));
        let mut console = Self {
            cpu,
            bus,
            paused: false,
            ticks: 0,
            frames: 0,
        };
        console.reset();
        Ok(console)
    }

    /// Press the reset button: CPU vectors through $FFFC, the PPU
    /// restarts its frame.
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.bus.ppu.reset();
        self.ticks = 0;
    }

    /// One system tick. Returns true when this tick published a frame.
    pub fn step(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.bus.tick_ppu();
        self.bus.tick_ppu();
        self.bus.tick_ppu();

        let frame = self.bus.ppu.take_frame_ready();
        if self.bus.ppu.take_nmi() {
            self.cpu.trigger_nmi();
        }

        self.cpu.step(&mut self.bus);

        // $4014 writes surface here; the stall lands before the CPU's
        // next opcode fetch, +1 cycle on odd cycle parity.
        if let Some(page) = self.bus.take_oam_dma() {
            self.cpu.stall(513 + (self.cpu.cycles() & 1) as u32);
            self.bus.run_oam_dma(page);
        }

        let dmc_stall = self.bus.tick_apu();
        self.cpu.stall(dmc_stall);

        self.ticks += 1;
        if frame {
            self.frames += 1;
        }
        frame
    }

    /// Run ticks until the next frame is published.
    pub fn step_frame(&mut self) {
        if self.paused {
            return;
        }
        while !self.step() {}
    }

    /// The last published 256×240 RGBA frame.
    #[must_use]
    pub fn frame(&self) -> &[u8] {
        self.bus.ppu.frame()
    }

    /// Detach the audio sample consumer for the playback thread.
    pub fn take_audio(&mut self) -> Option<SampleConsumer> {
        self.bus.apu.take_consumer()
    }

    /// Update a controller's live button state (port 0 or 1).
    pub fn set_buttons(&mut self, port: usize, buttons: Buttons) {
        if let Some(pad) = self.bus.controllers.get_mut(port) {
            pad.set_buttons(buttons);
        }
    }

    /// Gate emulation; a paused console ignores `step`.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Pause state.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// System ticks since reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Frames published since power-on.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// CPU view, for tests and debug front-ends.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// System bus view.
    #[must_use]
    pub fn bus(&self) -> &SystemBus {
        &self.bus
    }

    /// Mutable system bus, for debug front-ends that poke registers.
    pub fn bus_mut(&mut self) -> &mut SystemBus {
        &mut self.bus
    }
}
