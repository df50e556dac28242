//! Hue sweep coloring for the trail.
//!
//! Each trail vertex gets a fully saturated, fully bright color whose hue
//! advances slowly every tick: red → yellow → green → cyan → blue → magenta →
//! red.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Hue increment applied once per tick.
pub const DEFAULT_HUE_STEP: f64 = 0.0002;

/// Convert HSV to RGB.
///
/// * `h` - hue in [0, 1)
/// * `s` - saturation, 0.0 (gray) to 1.0 (vivid)
/// * `v` - value, 0.0 (black) to 1.0 (bright)
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Vec3 {
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Vec3::new(r as f32, g as f32, b as f32)
}

/// Fully saturated, fully bright color for hue `h`.
#[inline]
pub fn hue_to_rgb(h: f64) -> Vec3 {
    hsv_to_rgb(h, 1.0, 1.0)
}

/// Slowly rotating hue, kept in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueSweep {
    hue: f64,
    step: f64,
}

impl HueSweep {
    /// Start at red with the default step.
    pub fn new() -> Self {
        Self::with_step(DEFAULT_HUE_STEP)
    }

    pub fn with_step(step: f64) -> Self {
        Self { hue: 0.0, step }
    }

    /// Current hue.
    #[inline]
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Color for the current hue.
    #[inline]
    pub fn color(&self) -> Vec3 {
        hue_to_rgb(self.hue)
    }

    /// Move the hue forward one step, wrapping to 0 at 1.
    pub fn advance(&mut self) {
        self.hue += self.step;
        if self.hue >= 1.0 {
            self.hue = 0.0;
        }
    }
}

impl Default for HueSweep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(actual: Vec3, expected: (f32, f32, f32)) {
        let expected = Vec3::new(expected.0, expected.1, expected.2);
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_primary_hues() {
        assert_rgb(hue_to_rgb(0.0), (1.0, 0.0, 0.0));
        assert_rgb(hue_to_rgb(1.0 / 6.0), (1.0, 1.0, 0.0));
        assert_rgb(hue_to_rgb(1.0 / 3.0), (0.0, 1.0, 0.0));
        assert_rgb(hue_to_rgb(0.5), (0.0, 1.0, 1.0));
        assert_rgb(hue_to_rgb(2.0 / 3.0), (0.0, 0.0, 1.0));
        assert_rgb(hue_to_rgb(5.0 / 6.0), (1.0, 0.0, 1.0));
    }

    #[test]
    fn test_hue_one_matches_zero_after_normalizing() {
        assert_eq!(hue_to_rgb(1.0_f64 % 1.0), hue_to_rgb(0.0));
    }

    #[test]
    fn test_sector_interpolation() {
        // Halfway through sector 0: green ramps up.
        assert_rgb(hue_to_rgb(1.0 / 12.0), (1.0, 0.5, 0.0));
        // Halfway through sector 5: blue ramps down.
        assert_rgb(hue_to_rgb(11.0 / 12.0), (1.0, 0.0, 0.5));
    }

    #[test]
    fn test_components_in_unit_range() {
        for i in 0..1000 {
            let c = hue_to_rgb(i as f64 / 1000.0);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_saturation_and_value() {
        assert_rgb(hsv_to_rgb(0.3, 0.0, 0.5), (0.5, 0.5, 0.5));
        assert_rgb(hsv_to_rgb(0.0, 1.0, 0.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_sweep_wraps_to_zero() {
        let mut sweep = HueSweep::with_step(0.25);
        sweep.advance();
        sweep.advance();
        sweep.advance();
        assert!((sweep.hue() - 0.75).abs() < 1e-12);
        sweep.advance();
        assert_eq!(sweep.hue(), 0.0);
    }

    #[test]
    fn test_default_sweep_stays_in_range() {
        let mut sweep = HueSweep::new();
        for _ in 0..20_000 {
            sweep.advance();
            assert!((0.0..1.0).contains(&sweep.hue()));
        }
    }
}
