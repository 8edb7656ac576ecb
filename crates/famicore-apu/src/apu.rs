//! APU register file and per-cycle clocking.

use crate::dmc::Dmc;
use crate::frame_counter::{FrameCounter, FrameTick};
use crate::mixer::mix;
use crate::noise::Noise;
use crate::pulse::{Pulse, PulseChannel};
use crate::ring::{sample_ring, SampleConsumer, SampleProducer, DEFAULT_RING_CAPACITY};
use crate::triangle::Triangle;
use bitflags::bitflags;
use famicore_cpu::IrqLine;

bitflags! {
    /// $4015 channel and interrupt bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelMask: u8 {
        /// Pulse 1 length counter running / enable.
        const PULSE_1 = 0x01;
        /// Pulse 2 length counter running / enable.
        const PULSE_2 = 0x02;
        /// Triangle length counter running / enable.
        const TRIANGLE = 0x04;
        /// Noise length counter running / enable.
        const NOISE = 0x08;
        /// DMC bytes remaining / enable.
        const DMC = 0x10;
        /// Frame counter IRQ flag (status reads only).
        const FRAME_IRQ = 0x40;
        /// DMC IRQ flag (status reads only).
        const DMC_IRQ = 0x80;
    }
}

/// The 2A03 audio unit.
///
/// [`Apu::clock`] runs once per CPU cycle: the triangle, noise and DMC
/// timers every cycle, the pulse timers every other cycle, the frame
/// counter, and one mixed sample into the ring per CPU pair.
#[derive(Debug)]
pub struct Apu {
    pulse1: Pulse,
    pulse2: Pulse,
    triangle: Triangle,
    noise: Noise,
    dmc: Dmc,
    frame_counter: FrameCounter,

    /// Toggles every CPU cycle; pulse timers and the mixer run on the
    /// second half of each pair.
    half_phase: bool,

    samples: SampleProducer,
    consumer: Option<SampleConsumer>,
}

impl Apu {
    /// Create a silent APU wired to the shared IRQ line.
    #[must_use]
    pub fn new(irq: &IrqLine) -> Self {
        let (samples, consumer) = sample_ring(DEFAULT_RING_CAPACITY);
        Self {
            pulse1: Pulse::new(PulseChannel::One),
            pulse2: Pulse::new(PulseChannel::Two),
            triangle: Triangle::new(),
            noise: Noise::new(),
            dmc: Dmc::new(irq.clone()),
            frame_counter: FrameCounter::new(irq.clone()),
            half_phase: false,
            samples,
            consumer: Some(consumer),
        }
    }

    /// Detach the sample consumer for the audio thread. Yields once.
    pub fn take_consumer(&mut self) -> Option<SampleConsumer> {
        self.consumer.take()
    }

    /// Write an APU register ($4000-$4013, $4015, $4017).
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x4000 => self.pulse1.write_ctrl(value),
            0x4001 => self.pulse1.write_sweep(value),
            0x4002 => self.pulse1.write_timer_lo(value),
            0x4003 => self.pulse1.write_timer_hi(value),

            0x4004 => self.pulse2.write_ctrl(value),
            0x4005 => self.pulse2.write_sweep(value),
            0x4006 => self.pulse2.write_timer_lo(value),
            0x4007 => self.pulse2.write_timer_hi(value),

            0x4008 => self.triangle.write_linear(value),
            0x400A => self.triangle.write_timer_lo(value),
            0x400B => self.triangle.write_timer_hi(value),

            0x400C => self.noise.write_ctrl(value),
            0x400E => self.noise.write_period(value),
            0x400F => self.noise.write_length(value),

            0x4010 => self.dmc.write_ctrl(value),
            0x4011 => self.dmc.write_direct_load(value),
            0x4012 => self.dmc.write_sample_address(value),
            0x4013 => self.dmc.write_sample_length(value),

            0x4015 => {
                let mask = ChannelMask::from_bits_truncate(value);
                self.pulse1.set_enabled(mask.contains(ChannelMask::PULSE_1));
                self.pulse2.set_enabled(mask.contains(ChannelMask::PULSE_2));
                self.triangle
                    .set_enabled(mask.contains(ChannelMask::TRIANGLE));
                self.noise.set_enabled(mask.contains(ChannelMask::NOISE));
                self.dmc.set_enabled(mask.contains(ChannelMask::DMC));
                self.dmc.clear_irq();
            }

            0x4017 => {
                let tick = self.frame_counter.write(value);
                self.apply_frame_tick(tick);
            }

            _ => log::debug!("APU write to unhandled register ${addr:04X}"),
        }
    }

    /// Read $4015. Clears the frame IRQ flag, never the DMC flag.
    pub fn read_status(&mut self) -> u8 {
        let status = self.peek_status();
        self.frame_counter.clear_irq();
        status
    }

    /// Status byte without the read side effect.
    #[must_use]
    pub fn peek_status(&self) -> u8 {
        let mut status = ChannelMask::empty();
        status.set(ChannelMask::PULSE_1, self.pulse1.active());
        status.set(ChannelMask::PULSE_2, self.pulse2.active());
        status.set(ChannelMask::TRIANGLE, self.triangle.active());
        status.set(ChannelMask::NOISE, self.noise.active());
        status.set(ChannelMask::DMC, self.dmc.active());
        status.set(ChannelMask::FRAME_IRQ, self.frame_counter.irq_flagged());
        status.set(ChannelMask::DMC_IRQ, self.dmc.irq_flagged());
        status.bits()
    }

    /// Advance one CPU cycle. `dmc_fetch` reads CPU address space for
    /// the DMC; the return value is the DMA stall in CPU cycles.
    pub fn clock<F: FnMut(u16) -> u8>(&mut self, dmc_fetch: F) -> u8 {
        self.triangle.clock_timer();
        self.noise.clock_timer();
        let stall = self.dmc.clock_timer(dmc_fetch);

        if self.half_phase {
            self.pulse1.clock_timer();
            self.pulse2.clock_timer();
        }

        let tick = self.frame_counter.clock();
        self.apply_frame_tick(tick);

        if self.half_phase {
            let sample = self.sample();
            // A full ring means the consumer stalled; dropping here is
            // the documented overflow behavior.
            let _ = self.samples.push(sample);
        }
        self.half_phase = !self.half_phase;

        stall
    }

    fn apply_frame_tick(&mut self, tick: FrameTick) {
        if tick.quarter {
            self.pulse1.clock_quarter_frame();
            self.pulse2.clock_quarter_frame();
            self.triangle.clock_quarter_frame();
            self.noise.clock_quarter_frame();
        }
        if tick.half {
            self.pulse1.clock_half_frame();
            self.pulse2.clock_half_frame();
            self.triangle.clock_half_frame();
            self.noise.clock_half_frame();
        }
    }

    /// Current mixed output in `[0, 1]`.
    #[must_use]
    pub fn sample(&self) -> f32 {
        mix(
            self.pulse1.output(),
            self.pulse2.output(),
            self.triangle.output(),
            self.noise.output(),
            self.dmc.output(),
        )
    }

    /// Samples queued for the consumer.
    #[must_use]
    pub fn queued_samples(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apu() -> Apu {
        Apu::new(&IrqLine::new())
    }

    fn no_fetch(_addr: u16) -> u8 {
        0
    }

    #[test]
    fn status_starts_empty() {
        let mut apu = apu();
        assert_eq!(apu.read_status(), 0);
    }

    #[test]
    fn enabled_channels_show_in_status() {
        let mut apu = apu();
        apu.write(0x4015, 0x0F);
        apu.write(0x4003, 0x08); // Pulse 1 length
        apu.write(0x4007, 0x08); // Pulse 2 length
        apu.write(0x400B, 0x08); // Triangle length
        apu.write(0x400F, 0x08); // Noise length

        assert_eq!(apu.read_status() & 0x0F, 0x0F);

        // Disabling zeroes the length counters.
        apu.write(0x4015, 0x00);
        assert_eq!(apu.read_status() & 0x0F, 0x00);
    }

    #[test]
    fn pulse_sequencer_advances_and_mixes() {
        let mut apu = apu();
        apu.write(0x4015, 0x01);
        apu.write(0x4000, 0xBF); // Duty 2, constant volume 15
        apu.write(0x4002, 0xFE); // Period $FE
        apu.write(0x4003, 0x08); // Length index 1

        for _ in 0..8 {
            apu.clock(no_fetch);
        }

        // Timer reload edge advanced the sequencer off position 0;
        // duty 2 is high there, so the mix is audible.
        assert_eq!(apu.pulse1.sequencer(), 1);
        assert!(apu.sample() > 0.0);
    }

    #[test]
    fn one_sample_per_cpu_pair() {
        let mut apu = apu();
        for _ in 0..100 {
            apu.clock(no_fetch);
        }
        assert_eq!(apu.queued_samples(), 50);
    }

    #[test]
    fn frame_irq_sets_and_clears_via_status() {
        let mut apu = apu();
        for _ in 0..14915 {
            apu.clock(no_fetch);
        }
        let status = apu.read_status();
        assert_ne!(status & 0x40, 0, "frame IRQ flagged");

        let status = apu.read_status();
        assert_eq!(status & 0x40, 0, "reading cleared it");
    }

    #[test]
    fn five_step_mode_suppresses_irq() {
        let mut apu = apu();
        apu.write(0x4017, 0x80);
        for _ in 0..40_000 {
            apu.clock(no_fetch);
        }
        assert_eq!(apu.read_status() & 0x40, 0);
    }

    #[test]
    fn consumer_receives_mixed_samples() {
        let mut apu = apu();
        let mut consumer = apu.take_consumer().unwrap();
        assert!(apu.take_consumer().is_none());

        apu.write(0x4015, 0x04);
        apu.write(0x4008, 0x7F);
        apu.write(0x400A, 0x40);
        apu.write(0x400B, 0x08);
        for _ in 0..2000 {
            apu.clock(no_fetch);
        }

        let mut out = vec![0.0f32; 1000];
        assert_eq!(consumer.pop_slice(&mut out), 1000);
        assert!(out.iter().any(|&s| s > 0.0), "triangle is audible");
        assert!(out.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }
}
