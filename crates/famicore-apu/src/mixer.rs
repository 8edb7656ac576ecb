//! Nonlinear channel mixer.
//!
//! The hardware mixes the channel DACs through two resistor ladders;
//! these are the reference transfer functions, evaluated directly in
//! `f32`.

/// Pulse ladder: `95.88 / (8128 / (p1 + p2) + 100)`, 0 for silence.
#[must_use]
pub fn pulse_out(pulse1: u8, pulse2: u8) -> f32 {
    let sum = u32::from(pulse1) + u32::from(pulse2);
    if sum == 0 {
        return 0.0;
    }
    95.88 / (8128.0 / sum as f32 + 100.0)
}

/// Triangle/noise/DMC ladder:
/// `159.79 / (1 / (t/8227 + n/12241 + d/22638) + 100)`, 0 for silence.
#[must_use]
pub fn tnd_out(triangle: u8, noise: u8, dmc: u8) -> f32 {
    if triangle == 0 && noise == 0 && dmc == 0 {
        return 0.0;
    }
    let group = f32::from(triangle) / 8227.0 + f32::from(noise) / 12241.0 + f32::from(dmc) / 22638.0;
    159.79 / (1.0 / group + 100.0)
}

/// Full mix of the five channel outputs.
#[must_use]
pub fn mix(pulse1: u8, pulse2: u8, triangle: u8, noise: u8, dmc: u8) -> f32 {
    pulse_out(pulse1, pulse2) + tnd_out(triangle, noise, dmc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_exactly_zero() {
        assert_eq!(mix(0, 0, 0, 0, 0), 0.0);
        assert_eq!(pulse_out(0, 0), 0.0);
        assert_eq!(tnd_out(0, 0, 0), 0.0);
    }

    #[test]
    fn output_is_monotonic_in_pulse_sum() {
        let mut last = 0.0;
        for level in 1..=30u8 {
            let out = pulse_out(level.min(15), level.saturating_sub(15));
            assert!(out > last);
            last = out;
        }
    }

    #[test]
    fn full_scale_stays_in_unit_range() {
        let out = mix(15, 15, 15, 15, 127);
        assert!(out > 0.0 && out <= 1.0);
    }

    #[test]
    fn known_reference_point() {
        // Two full pulses: 95.88 / (8128/30 + 100) ≈ 0.25848.
        let out = pulse_out(15, 15);
        assert!((out - 0.25848).abs() < 1e-4);
    }
}
