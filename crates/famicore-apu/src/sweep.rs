//! Sweep unit for the pulse channels.
//!
//! Periodically retargets the pulse period. Pulse 1 negates with one's
//! complement (subtracts one extra), pulse 2 with two's complement.
//! A channel whose period is below 8 or whose target exceeds $7FF is
//! muted, and a muting target is never written back.

use crate::pulse::PulseChannel;

/// Sweep unit.
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    channel: PulseChannel,
    enabled: bool,
    period: u8,
    negate: bool,
    shift: u8,
    reload: bool,
    divider: u8,
}

impl Sweep {
    /// Create an idle sweep for the given pulse channel.
    #[must_use]
    pub const fn new(channel: PulseChannel) -> Self {
        Self {
            channel,
            enabled: false,
            period: 0,
            negate: false,
            shift: 0,
            reload: false,
            divider: 0,
        }
    }

    /// Write the `EPPP NSSS` sweep register.
    pub fn write(&mut self, value: u8) {
        self.enabled = value & 0x80 != 0;
        self.period = (value >> 4) & 0x07;
        self.negate = value & 0x08 != 0;
        self.shift = value & 0x07;
        self.reload = true;
    }

    /// Target period for the current period.
    #[must_use]
    pub fn target(&self, current: u16) -> u16 {
        let change = current >> self.shift;
        if self.negate {
            match self.channel {
                PulseChannel::One => current.saturating_sub(change).saturating_sub(1),
                PulseChannel::Two => current.saturating_sub(change),
            }
        } else {
            current + change
        }
    }

    /// Continuous mute condition: low period or overflowing target.
    #[must_use]
    pub fn muted(&self, current: u16) -> bool {
        current < 8 || self.target(current) > 0x7FF
    }

    /// Half-frame clock. Returns the new period when the divider fires
    /// and the target is in range.
    pub fn clock(&mut self, current: u16) -> Option<u16> {
        let update = if self.divider == 0 && self.enabled && self.shift > 0 && !self.muted(current)
        {
            Some(self.target(current))
        } else {
            None
        };

        if self.divider == 0 || self.reload {
            self.divider = self.period;
            self.reload = false;
        } else {
            self.divider -= 1;
        }

        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_target() {
        let mut sweep = Sweep::new(PulseChannel::One);
        sweep.write(0x01); // shift 1
        assert_eq!(sweep.target(400), 600);
    }

    #[test]
    fn ones_complement_negate_on_pulse_one() {
        let mut sweep = Sweep::new(PulseChannel::One);
        sweep.write(0x09); // negate, shift 1
        assert_eq!(sweep.target(400), 199);
    }

    #[test]
    fn twos_complement_negate_on_pulse_two() {
        let mut sweep = Sweep::new(PulseChannel::Two);
        sweep.write(0x09);
        assert_eq!(sweep.target(400), 200);
    }

    #[test]
    fn mutes_low_periods_and_overflow() {
        let mut sweep = Sweep::new(PulseChannel::One);
        sweep.write(0x01);
        assert!(sweep.muted(7));
        assert!(!sweep.muted(8));
        // $700 + $380 = $A80 > $7FF.
        assert!(sweep.muted(0x700));
    }

    #[test]
    fn divider_fire_updates_period() {
        let mut sweep = Sweep::new(PulseChannel::One);
        sweep.write(0x81); // enabled, divider period 0, shift 1
        assert_eq!(sweep.clock(400), Some(600));
    }

    #[test]
    fn muting_target_is_not_written() {
        let mut sweep = Sweep::new(PulseChannel::One);
        sweep.write(0x81);
        assert_eq!(sweep.clock(0x700), None);
    }
}
