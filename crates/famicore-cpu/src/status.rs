//! CPU status register (P) flags.
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! ```
//!
//! B and U only exist on the stack: B is 1 when pushed by PHP/BRK and 0
//! when pushed by IRQ/NMI, U is always pushed as 1.

use bitflags::bitflags;

bitflags! {
    /// CPU status register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry.
        const C = 1 << 0;
        /// Zero.
        const Z = 1 << 1;
        /// Interrupt disable (masks IRQ, not NMI).
        const I = 1 << 2;
        /// Decimal mode (present but inert on the 2A03).
        const D = 1 << 3;
        /// Break (stack copies only).
        const B = 1 << 4;
        /// Unused, always 1 when pushed.
        const U = 1 << 5;
        /// Overflow.
        const V = 1 << 6;
        /// Negative.
        const N = 1 << 7;
    }
}

impl Status {
    /// Power-on state: I set, U set.
    pub const POWER_ON: Self = Self::I.union(Self::U);

    /// Set Z and N from a result value.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Build the byte pushed on the stack, with B as requested.
    #[must_use]
    #[inline]
    pub fn to_pushed(self, brk: bool) -> u8 {
        let mut bits = self | Self::U;
        bits.set(Self::B, brk);
        bits.bits()
    }

    /// Restore flags from a stack byte. B and U are ignored; U stays set.
    #[inline]
    pub fn from_pulled(&mut self, value: u8) {
        *self = Self::from_bits_truncate(value);
        self.remove(Self::B);
        self.insert(Self::U);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_zn_zero() {
        let mut status = Status::POWER_ON;
        status.set_zn(0);
        assert!(status.contains(Status::Z));
        assert!(!status.contains(Status::N));
    }

    #[test]
    fn set_zn_negative() {
        let mut status = Status::POWER_ON;
        status.set_zn(0x80);
        assert!(!status.contains(Status::Z));
        assert!(status.contains(Status::N));
    }

    #[test]
    fn pushed_byte_sets_b_and_u() {
        let status = Status::C | Status::N;
        assert_eq!(status.to_pushed(true), 0b1011_0001);
        assert_eq!(status.to_pushed(false), 0b1010_0001);
    }

    #[test]
    fn pulled_byte_drops_b() {
        let mut status = Status::default();
        status.from_pulled(0xFF);
        assert!(!status.contains(Status::B));
        assert!(status.contains(Status::U));
        assert!(status.contains(Status::C));
    }
}
