// src/pose.rs - Fixed-size per-channel pulse width vector
use std::ops::{Index, IndexMut};

/// Number of independently addressable PWM channels on the arm.
pub const CHANNEL_COUNT: usize = 6;

/// Ordered per-channel pulse widths in milliseconds of PWM high time.
///
/// Index 0..5 maps to a fixed physical channel. Values may transiently move
/// outside the configured limits while a pose is being edited; they are
/// clamped at the emission boundary before anything reaches hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose([f64; CHANNEL_COUNT]);

impl Pose {
    pub fn new(values: [f64; CHANNEL_COUNT]) -> Self {
        Self(values)
    }

    /// All channels at the same pulse width.
    pub fn uniform(value: f64) -> Self {
        Self([value; CHANNEL_COUNT])
    }

    pub fn values(&self) -> &[f64; CHANNEL_COUNT] {
        &self.0
    }

    /// Copy with every channel clamped into [min, max].
    pub fn clamped(&self, min: f64, max: f64) -> Self {
        let mut out = self.0;
        for value in &mut out {
            *value = value.clamp(min, max);
        }
        Self(out)
    }
}

impl Index<usize> for Pose {
    type Output = f64;

    fn index(&self, channel: usize) -> &f64 {
        &self.0[channel]
    }
}

impl IndexMut<usize> for Pose {
    fn index_mut(&mut self, channel: usize) -> &mut f64 {
        &mut self.0[channel]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_limits_every_channel() {
        let pose = Pose::new([0.1, 3.0, 1.5, 0.4, 2.5, -1.0]);
        let clamped = pose.clamped(0.4, 2.5);
        assert_eq!(clamped.values(), &[0.4, 2.5, 1.5, 0.4, 2.5, 0.4]);
    }

    #[test]
    fn test_index_round_trip() {
        let mut pose = Pose::uniform(1.5);
        pose[3] = 2.0;
        assert_eq!(pose[3], 2.0);
        assert_eq!(pose[0], 1.5);
    }
}
