//! Tunable gesture-timing and threshold constants.
//!
//! Deployed devices differ in touch-sample density and DPI, so the movement
//! threshold and send intervals are configuration, not code.  The defaults
//! below are the values the reference client ships with; the client
//! application embeds this struct in its TOML config file, and any field left
//! out of the file falls back to its default.

use serde::{Deserialize, Serialize};

/// Thresholds and timing constants for gesture classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Per-axis movement noise floor in pixels.  A Move sample is suppressed
    /// only when *both* |dx| and |dy| fall below this value.
    #[serde(default = "default_movement_threshold")]
    pub movement_threshold: f32,

    /// Minimum interval between Pan commands while not dragging, in ms.
    #[serde(default = "default_normal_interval_ms")]
    pub normal_interval_ms: i64,

    /// Minimum interval between DragMove commands while dragging, in ms.
    /// Shorter than `normal_interval_ms` to keep drags responsive.
    #[serde(default = "default_drag_interval_ms")]
    pub drag_interval_ms: i64,

    /// How long the second tap of a double tap must be held before it is
    /// promoted to a drag instead of a double click, in ms.
    #[serde(default = "default_drag_delay_ms")]
    pub drag_delay_ms: i64,

    /// How long after a tap's Up the classifier waits for a second Down
    /// before confirming a single tap, in ms.
    #[serde(default = "default_tap_timeout_ms")]
    pub tap_timeout_ms: i64,

    /// How long a motionless press must be held to count as a long press
    /// (right click), in ms.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: i64,

    /// Minimum per-sample |delta-y| on the scroll surface before a scroll
    /// command is emitted, in pixels.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f32,

    /// Multiplier applied to scroll deltas for perceived scroll speed.
    #[serde(default = "default_scroll_scale")]
    pub scroll_scale: f32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_movement_threshold() -> f32 {
    5.0
}
fn default_normal_interval_ms() -> i64 {
    35
}
fn default_drag_interval_ms() -> i64 {
    25
}
fn default_drag_delay_ms() -> i64 {
    150
}
fn default_tap_timeout_ms() -> i64 {
    300
}
fn default_long_press_ms() -> i64 {
    500
}
fn default_scroll_threshold() -> f32 {
    7.0
}
fn default_scroll_scale() -> f32 {
    1.5
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            movement_threshold: default_movement_threshold(),
            normal_interval_ms: default_normal_interval_ms(),
            drag_interval_ms: default_drag_interval_ms(),
            drag_delay_ms: default_drag_delay_ms(),
            tap_timeout_ms: default_tap_timeout_ms(),
            long_press_ms: default_long_press_ms(),
            scroll_threshold: default_scroll_threshold(),
            scroll_scale: default_scroll_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals_keep_drag_faster_than_pan() {
        // Arrange / Act
        let cfg = GestureConfig::default();

        // Assert – dragging must be throttled less aggressively than panning
        assert!(cfg.drag_interval_ms < cfg.normal_interval_ms);
    }

    #[test]
    fn test_default_drag_delay_is_150_ms() {
        let cfg = GestureConfig::default();
        assert_eq!(cfg.drag_delay_ms, 150);
    }

    #[test]
    fn test_default_scroll_tuning() {
        let cfg = GestureConfig::default();
        assert_eq!(cfg.scroll_threshold, 7.0);
        assert_eq!(cfg.scroll_scale, 1.5);
    }
}
