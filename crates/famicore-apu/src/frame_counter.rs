//! APU frame counter.
//!
//! Divides the CPU clock into quarter- and half-frame events for the
//! envelope, linear counter, length counter and sweep units. The
//! hardware steps at half-APU-cycle boundaries; counting in CPU ticks
//! with the positions rounded up lands the events on ticks
//! 3729/7457/11186/14915 (and 18641 in 5-step mode), which puts the
//! frame IRQ at an exact 14915-CPU-cycle period.

use famicore_cpu::{IrqLine, IrqSource};

/// Sequencer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameCounterMode {
    /// 4-step sequence with optional IRQ.
    #[default]
    FourStep,
    /// 5-step sequence, no IRQ.
    FiveStep,
}

/// Events produced by one frame-counter clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTick {
    /// Clock envelopes and the triangle linear counter.
    pub quarter: bool,
    /// Clock length counters and sweeps.
    pub half: bool,
}

impl FrameTick {
    const NONE: Self = Self {
        quarter: false,
        half: false,
    };
    const QUARTER: Self = Self {
        quarter: true,
        half: false,
    };
    const BOTH: Self = Self {
        quarter: true,
        half: true,
    };
}

/// Step positions in CPU ticks.
const STEP_1: u32 = 3729;
const STEP_2: u32 = 7457;
const STEP_3: u32 = 11186;
const STEP_4: u32 = 14915;
const STEP_5: u32 = 18641;

/// Frame counter.
#[derive(Debug)]
pub struct FrameCounter {
    irq: IrqLine,
    counter: u32,
    mode: FrameCounterMode,
    irq_inhibit: bool,
    irq_flag: bool,
}

impl FrameCounter {
    /// Create a 4-step counter with IRQ allowed.
    #[must_use]
    pub fn new(irq: IrqLine) -> Self {
        Self {
            irq,
            counter: 0,
            mode: FrameCounterMode::FourStep,
            irq_inhibit: false,
            irq_flag: false,
        }
    }

    /// $4017 write: `MI-- ----`. Resets the divider. Returns the
    /// immediate quarter+half tick that a 5-step write generates.
    pub fn write(&mut self, value: u8) -> FrameTick {
        self.mode = if value & 0x80 != 0 {
            FrameCounterMode::FiveStep
        } else {
            FrameCounterMode::FourStep
        };
        self.irq_inhibit = value & 0x40 != 0;
        if self.irq_inhibit {
            self.clear_irq();
        }

        self.counter = 0;

        if self.mode == FrameCounterMode::FiveStep {
            FrameTick::BOTH
        } else {
            FrameTick::NONE
        }
    }

    /// Advance one CPU tick.
    pub fn clock(&mut self) -> FrameTick {
        self.counter += 1;

        let tick = match (self.counter, self.mode) {
            (STEP_1 | STEP_3, _) => FrameTick::QUARTER,
            (STEP_2, _) => FrameTick::BOTH,
            (STEP_4, FrameCounterMode::FourStep) => {
                if !self.irq_inhibit {
                    self.irq_flag = true;
                    self.irq.pull(IrqSource::FrameCounter);
                }
                FrameTick::BOTH
            }
            (STEP_5, FrameCounterMode::FiveStep) => FrameTick::BOTH,
            _ => FrameTick::NONE,
        };

        let wrap = match self.mode {
            FrameCounterMode::FourStep => STEP_4,
            FrameCounterMode::FiveStep => STEP_5,
        };
        if self.counter >= wrap {
            self.counter = 0;
        }

        tick
    }

    /// Frame IRQ flag ($4015 bit 6).
    #[must_use]
    pub fn irq_flagged(&self) -> bool {
        self.irq_flag
    }

    /// Clear the frame IRQ (on $4015 read or inhibit).
    pub fn clear_irq(&mut self) {
        if self.irq_flag {
            self.irq_flag = false;
            self.irq.release(IrqSource::FrameCounter);
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> FrameCounterMode {
        self.mode
    }
}
