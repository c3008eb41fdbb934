//! Mapping from window size to a single UI scale factor.
//!
//! The launcher is designed for a reference window of
//! [`ScaleConfig::base_width`] × [`ScaleConfig::base_height`].  Smaller
//! windows shrink everything by one factor `s`; larger ones never grow past
//! `1.0`.  Labels disappear entirely once they would become unreadable.

use serde::{Deserialize, Serialize};

/// Scale mapping constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Reference window width.  Default: `1400`.
    pub base_width: f64,
    /// Reference window height.  Default: `800`.
    pub base_height: f64,
    /// Lower bound for `s`.  Default: `0.35`.
    pub min_scale: f64,
    /// Labels need at least this window height.  Default: `480`.
    pub label_min_height: f64,
    /// Labels need at least this scale.  Default: `0.55`.
    pub label_min_scale: f64,
    /// Scale changes smaller than this are ignored.  Default: `0.02`.
    pub epsilon: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            base_width: 1400.0,
            base_height: 800.0,
            min_scale: 0.35,
            label_min_height: 480.0,
            label_min_scale: 0.55,
            epsilon: 0.02,
        }
    }
}

impl ScaleConfig {
    /// Reject values that would make the scale meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_width > 0.0 && self.base_height > 0.0) {
            return Err(format!(
                "scale.base_width and scale.base_height must be positive (got {} x {})",
                self.base_width, self.base_height
            ));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            return Err(format!("scale.min_scale must be in (0, 1] (got {})", self.min_scale));
        }
        Ok(())
    }
}

/// Derived sizing state for the current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiScale {
    pub s: f64,
    pub show_labels: bool,
}

impl UiScale {
    /// Full size with labels, used before the first resize arrives.
    pub const FULL: UiScale = UiScale {
        s: 1.0,
        show_labels: true,
    };

    /// Compute the scale for a `width` × `height` window.
    pub fn for_window(config: &ScaleConfig, width: f64, height: f64) -> Self {
        let s = scale_factor(config, width, height);
        Self {
            s,
            show_labels: labels_visible(config, height, s),
        }
    }

    /// `base` pixels at this scale, never below `floor`.
    pub fn px(&self, base: i32, floor: i32) -> i32 {
        scaled_px(base, self.s, floor)
    }
}

/// `clamp(min(w / base_w, h / base_h), min_scale, 1.0)`.
///
/// Non-finite or non-positive sizes give `min_scale`.  The upper bound
/// wins if `min_scale` exceeds `1.0`.
pub fn scale_factor(config: &ScaleConfig, width: f64, height: f64) -> f64 {
    if !(width > 0.0 && height > 0.0) {
        return config.min_scale;
    }
    let raw = (width / config.base_width).min(height / config.base_height);
    if raw.is_finite() && raw > 0.0 {
        raw.max(config.min_scale).min(1.0)
    } else {
        config.min_scale
    }
}

/// Whether labels are shown for a window `height` at scale `s`.
pub fn labels_visible(config: &ScaleConfig, height: f64, s: f64) -> bool {
    height >= config.label_min_height && s >= config.label_min_scale
}

/// `max(floor, round(base · s))`.
pub fn scaled_px(base: i32, s: f64, floor: i32) -> i32 {
    let v = (base as f64 * s).round();
    if v.is_finite() {
        (v as i32).max(floor)
    } else {
        floor
    }
}

/// Remembers the last applied scale so drags of the window edge don't
/// trigger a relayout on every pixel.
#[derive(Debug)]
pub struct Rescaler {
    config: ScaleConfig,
    current: Option<UiScale>,
}

impl Rescaler {
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// The last applied scale, or [`UiScale::FULL`] before the first update.
    pub fn current(&self) -> UiScale {
        self.current.unwrap_or(UiScale::FULL)
    }

    /// Recompute for a new window size.
    ///
    /// Returns the new scale when it should be applied, `None` when the
    /// change is within [`ScaleConfig::epsilon`] and label visibility is
    /// unchanged.  The first call always returns a value.
    pub fn update(&mut self, width: f64, height: f64) -> Option<UiScale> {
        let next = UiScale::for_window(&self.config, width, height);
        if let Some(prev) = self.current {
            if (next.s - prev.s).abs() < self.config.epsilon && next.show_labels == prev.show_labels {
                return None;
            }
        }
        self.current = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_size_is_full_scale() {
        let cfg = ScaleConfig::default();
        let ui = UiScale::for_window(&cfg, 1400.0, 800.0);
        assert_eq!(ui.s, 1.0);
        assert!(ui.show_labels);
    }

    #[test]
    fn large_windows_cap_at_one() {
        let cfg = ScaleConfig::default();
        assert_eq!(scale_factor(&cfg, 3840.0, 2160.0), 1.0);
    }

    #[test]
    fn limiting_axis_wins() {
        let cfg = ScaleConfig::default();
        // Width allows 1.0, height only 0.6.
        assert!((scale_factor(&cfg, 2000.0, 480.0) - 0.6).abs() < 1e-9);
        // Height allows 1.0, width only 0.5.
        assert!((scale_factor(&cfg, 700.0, 1200.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tiny_and_degenerate_windows_clamp_to_min() {
        let cfg = ScaleConfig::default();
        assert_eq!(scale_factor(&cfg, 10.0, 10.0), cfg.min_scale);
        assert_eq!(scale_factor(&cfg, 0.0, 800.0), cfg.min_scale);
        assert_eq!(scale_factor(&cfg, -5.0, 800.0), cfg.min_scale);
        assert_eq!(scale_factor(&cfg, f64::NAN, 800.0), cfg.min_scale);
    }

    #[test]
    fn scale_is_monotonic_and_bounded() {
        let cfg = ScaleConfig::default();
        let mut prev = 0.0;
        for step in 0..=60 {
            let w = 100.0 + step as f64 * 40.0;
            let h = 60.0 + step as f64 * 25.0;
            let s = scale_factor(&cfg, w, h);
            assert!(s >= cfg.min_scale && s <= 1.0, "s={} out of range", s);
            assert!(s >= prev, "s decreased at {}x{}", w, h);
            prev = s;
        }
        // Growing one axis alone never shrinks s either.
        let mut prev = 0.0;
        for w in (200..3000).step_by(50) {
            let s = scale_factor(&cfg, w as f64, 600.0);
            assert!(s >= prev);
            prev = s;
        }
    }

    #[test]
    fn label_rule() {
        let cfg = ScaleConfig::default();
        assert!(labels_visible(&cfg, 480.0, 0.55));
        assert!(!labels_visible(&cfg, 479.0, 0.9));
        assert!(!labels_visible(&cfg, 900.0, 0.5));
        // Pure function of (height, s): a wide short window hides labels.
        let ui = UiScale::for_window(&cfg, 2000.0, 470.0);
        assert!(!ui.show_labels);
    }

    #[test]
    fn scaled_px_rounds_and_floors() {
        assert_eq!(scaled_px(56, 1.0, 8), 56);
        assert_eq!(scaled_px(56, 0.5, 8), 28);
        assert_eq!(scaled_px(55, 0.5, 1), 28);
        assert_eq!(scaled_px(10, 0.01, 1), 1);
        assert_eq!(scaled_px(10, f64::NAN, 3), 3);
    }

    #[test]
    fn rescaler_first_update_always_applies() {
        let mut r = Rescaler::new(ScaleConfig::default());
        assert_eq!(r.current(), UiScale::FULL);
        assert_eq!(r.update(1400.0, 800.0), Some(UiScale::FULL));
    }

    #[test]
    fn rescaler_ignores_small_changes() {
        let mut r = Rescaler::new(ScaleConfig::default());
        r.update(1000.0, 800.0).unwrap();
        // 1000/1400 = 0.714; 1010/1400 = 0.721 → below epsilon.
        assert_eq!(r.update(1010.0, 800.0), None);
        // A real change goes through.
        let ui = r.update(1200.0, 800.0).unwrap();
        assert!((ui.s - 1200.0 / 1400.0).abs() < 1e-9);
        assert_eq!(r.current(), ui);
    }

    #[test]
    fn rescaler_applies_label_flip_even_within_epsilon() {
        let mut r = Rescaler::new(ScaleConfig::default());
        let a = r.update(2000.0, 481.0).unwrap();
        assert!(a.show_labels);
        let b = r.update(2000.0, 479.0).unwrap();
        assert!(!b.show_labels);
        assert!((a.s - b.s).abs() < 0.02);
    }

    #[test]
    fn min_scale_above_one_does_not_panic() {
        let cfg: ScaleConfig = serde_json::from_str(r#"{ "min_scale": 1.5 }"#).unwrap();
        assert_eq!(scale_factor(&cfg, 700.0, 400.0), 1.0);
        let mut r = Rescaler::new(cfg);
        assert_eq!(r.update(1400.0, 800.0).map(|ui| ui.s), Some(1.0));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        assert!(ScaleConfig::default().validate().is_ok());
        let bad = [
            r#"{ "min_scale": 1.5 }"#,
            r#"{ "min_scale": 0 }"#,
            r#"{ "min_scale": -0.2 }"#,
            r#"{ "base_width": 0 }"#,
            r#"{ "base_height": -800 }"#,
        ];
        for json in bad {
            let cfg: ScaleConfig = serde_json::from_str(json).unwrap();
            assert!(cfg.validate().is_err(), "{} should be rejected", json);
        }
    }

    #[test]
    fn partial_config_deserializes() {
        let cfg: ScaleConfig = serde_json::from_str(r#"{ "base_width": 1920 }"#).unwrap();
        assert_eq!(cfg.base_width, 1920.0);
        assert_eq!(cfg.base_height, ScaleConfig::default().base_height);
    }
}
