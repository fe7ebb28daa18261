// src/motion/easing.rs - Velocity-shaping profiles
use std::f64::consts::PI;

/// Monotonic map from normalized progress in [0, 1] to eased progress in
/// [0, 1], shaping acceleration and deceleration across a transition.
///
/// Every profile satisfies `ease(0) == 0`, `ease(1) == 1` and is
/// non-decreasing over the whole interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EasingProfile {
    /// Cosine ease: `(1 - cos(x·π)) / 2`. Symmetric acceleration and
    /// deceleration.
    #[default]
    Cosine,
}

impl EasingProfile {
    pub fn ease(&self, x: f64) -> f64 {
        match self {
            EasingProfile::Cosine => (1.0 - (x * PI).cos()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_values() {
        let ease = EasingProfile::Cosine;
        assert_eq!(ease.ease(0.0), 0.0);
        assert!((ease.ease(1.0) - 1.0).abs() < 1e-12);
        assert!((ease.ease(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotone_non_decreasing() {
        let ease = EasingProfile::Cosine;
        let mut previous = ease.ease(0.0);
        for i in 1..=1000 {
            let current = ease.ease(i as f64 / 1000.0);
            assert!(
                current >= previous,
                "ease decreased between samples {} and {}",
                i - 1,
                i
            );
            previous = current;
        }
    }
}
