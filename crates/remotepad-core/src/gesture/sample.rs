//! Raw touch sample types produced by the input surface.

use serde::{Deserialize, Serialize};

/// Phase of a touch contact, as reported by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// A finger made contact with the surface.
    Down,
    /// The finger moved while in contact.
    Move,
    /// The finger lifted, ending the contact normally.
    Up,
    /// The platform aborted the contact (e.g. the surface lost focus).
    Cancel,
}

/// One raw sample from the touch surface.
///
/// `previous_x` / `previous_y` are the coordinates of the *immediately
/// preceding* sample in the same contact, so `dx()` / `dy()` yield an
/// incremental per-sample delta rather than an accumulated total.  For a
/// `Down` sample (the first of a contact) the previous coordinates equal the
/// current ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    /// What the finger did.
    pub phase: TouchPhase,
    /// X position on the surface in pixels.
    pub x: f32,
    /// Y position on the surface in pixels.
    pub y: f32,
    /// X position of the immediately preceding sample in this contact.
    pub previous_x: f32,
    /// Y position of the immediately preceding sample in this contact.
    pub previous_y: f32,
    /// Client-local clock, milliseconds since the Unix epoch.
    ///
    /// All timing decisions (tap confirmation, the 150 ms drag-vs-double-tap
    /// hold check, send-rate throttling) are made against this clock; the
    /// server's clock is never consulted.
    pub timestamp_ms: i64,
}

impl TouchSample {
    /// Horizontal delta against the preceding sample of this contact.
    pub fn dx(&self) -> f32 {
        self.x - self.previous_x
    }

    /// Vertical delta against the preceding sample of this contact.
    pub fn dy(&self) -> f32 {
        self.y - self.previous_y
    }

    /// Builds a `Down` sample.  The previous coordinates of a contact's first
    /// sample are defined to equal its own, so the initial delta is zero.
    pub fn down(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Down,
            x,
            y,
            previous_x: x,
            previous_y: y,
            timestamp_ms,
        }
    }

    /// Builds a `Move` sample with an explicit preceding position.
    pub fn moved(x: f32, y: f32, previous_x: f32, previous_y: f32, timestamp_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Move,
            x,
            y,
            previous_x,
            previous_y,
            timestamp_ms,
        }
    }

    /// Builds an `Up` sample at the lift position.
    pub fn up(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Up,
            x,
            y,
            previous_x: x,
            previous_y: y,
            timestamp_ms,
        }
    }

    /// Builds a `Cancel` sample at the last known position.
    pub fn cancel(x: f32, y: f32, timestamp_ms: i64) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            x,
            y,
            previous_x: x,
            previous_y: y,
            timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_sample_has_zero_delta() {
        // Arrange / Act
        let sample = TouchSample::down(10.0, 20.0, 1_000);

        // Assert
        assert_eq!(sample.dx(), 0.0);
        assert_eq!(sample.dy(), 0.0);
    }

    #[test]
    fn test_move_sample_delta_is_against_previous_sample() {
        // Arrange
        let sample = TouchSample::moved(15.0, 18.0, 10.0, 20.0, 1_016);

        // Act / Assert – delta is incremental, not relative to the Down position
        assert_eq!(sample.dx(), 5.0);
        assert_eq!(sample.dy(), -2.0);
    }

    #[test]
    fn test_negative_deltas_are_preserved() {
        let sample = TouchSample::moved(4.0, 4.0, 10.0, 10.0, 1_032);
        assert_eq!(sample.dx(), -6.0);
        assert_eq!(sample.dy(), -6.0);
    }
}
