//! Motion and scroll filters: noise suppression and send-rate throttling.
//!
//! Both filters drop suppressed samples outright — there is no queuing and no
//! catch-up, so a burst of sub-threshold or too-frequent samples simply never
//! reaches the wire.

use crate::gesture::config::GestureConfig;
use crate::gesture::event::GestureEvent;
use crate::gesture::sample::{TouchPhase, TouchSample};

/// Threshold-plus-cooldown filter for Pan and DragMove candidates.
///
/// A candidate `(dx, dy)` at time `now` is emitted iff at least one axis
/// reaches the movement threshold AND the wall-clock interval since the last
/// emission exceeds the pan or drag interval (whichever mode is active).
/// The cooldown clock advances only on emission.
#[derive(Debug, Clone)]
pub struct MotionFilter {
    movement_threshold: f32,
    normal_interval_ms: i64,
    drag_interval_ms: i64,
    last_send_ms: i64,
}

impl MotionFilter {
    /// Creates a filter that has never emitted (the first qualifying sample
    /// passes immediately).
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            movement_threshold: config.movement_threshold,
            normal_interval_ms: config.normal_interval_ms,
            drag_interval_ms: config.drag_interval_ms,
            last_send_ms: 0,
        }
    }

    /// Returns `true` if the candidate motion should be emitted, advancing
    /// the cooldown clock when it does.
    ///
    /// The axes are tested independently: only when *both* |dx| and |dy| are
    /// below the threshold is the sample treated as noise, so a large
    /// horizontal swipe with a tiny vertical component still emits.
    pub fn should_emit(&mut self, dx: f32, dy: f32, now_ms: i64, dragging: bool) -> bool {
        if dx.abs() < self.movement_threshold && dy.abs() < self.movement_threshold {
            return false;
        }

        let interval = if dragging {
            self.drag_interval_ms
        } else {
            self.normal_interval_ms
        };
        if now_ms - self.last_send_ms <= interval {
            return false;
        }

        self.last_send_ms = now_ms;
        true
    }
}

/// Magnitude-gated filter for the dedicated scroll surface.
///
/// Scroll is not time-throttled; instead each Move is compared against the
/// *immediately preceding* sample.  The anchor is re-set on every Move
/// whether or not the threshold was met, so direction changes take effect on
/// the very next sample.
#[derive(Debug, Clone)]
pub struct ScrollFilter {
    scroll_threshold: f32,
    scroll_scale: f32,
    last_y: Option<f32>,
}

impl ScrollFilter {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            scroll_threshold: config.scroll_threshold,
            scroll_scale: config.scroll_scale,
            last_y: None,
        }
    }

    /// Feeds one sample from the scroll surface, producing a scaled
    /// [`GestureEvent::Scroll`] when the per-sample delta clears the gate.
    pub fn handle_sample(&mut self, sample: &TouchSample) -> Option<GestureEvent> {
        match sample.phase {
            TouchPhase::Down => {
                self.last_y = Some(sample.y);
                None
            }
            TouchPhase::Move => {
                let Some(last_y) = self.last_y else {
                    // Move without a Down: adopt the position and wait.
                    self.last_y = Some(sample.y);
                    return None;
                };
                let dy = sample.y - last_y;
                self.last_y = Some(sample.y);

                if dy.abs() > self.scroll_threshold {
                    Some(GestureEvent::Scroll {
                        delta_y: dy * self.scroll_scale,
                    })
                } else {
                    None
                }
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                self.last_y = None;
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_motion_filter() -> MotionFilter {
        MotionFilter::new(&GestureConfig::default())
    }

    // ── MotionFilter: threshold gating ────────────────────────────────────────

    #[test]
    fn test_motion_below_threshold_on_both_axes_is_suppressed() {
        // Arrange
        let mut filter = make_motion_filter();

        // Act / Assert – default threshold is 5.0 px
        assert!(!filter.should_emit(4.0, 4.0, 1_000, false));
        assert!(!filter.should_emit(-4.9, 0.0, 2_000, false));
    }

    #[test]
    fn test_motion_above_threshold_on_one_axis_emits() {
        // Arrange
        let mut filter = make_motion_filter();

        // Act / Assert – axes are tested independently
        assert!(filter.should_emit(12.0, 1.0, 1_000, false));
    }

    #[test]
    fn test_negative_deltas_are_compared_by_magnitude() {
        let mut filter = make_motion_filter();
        assert!(filter.should_emit(-12.0, -1.0, 1_000, false));
    }

    // ── MotionFilter: cooldown ────────────────────────────────────────────────

    #[test]
    fn test_pan_within_normal_interval_is_suppressed() {
        // Arrange
        let mut filter = make_motion_filter();
        assert!(filter.should_emit(10.0, 0.0, 1_000, false));

        // Act / Assert – 35 ms floor, strictly greater-than required
        assert!(!filter.should_emit(10.0, 0.0, 1_020, false));
        assert!(!filter.should_emit(10.0, 0.0, 1_035, false));
        assert!(filter.should_emit(10.0, 0.0, 1_036, false));
    }

    #[test]
    fn test_drag_interval_is_shorter_than_pan_interval() {
        // Arrange
        let mut filter = make_motion_filter();
        assert!(filter.should_emit(10.0, 0.0, 1_000, true));

        // Act / Assert – 26 ms after the last send passes the 25 ms drag
        // floor but would fail the 35 ms pan floor
        assert!(filter.should_emit(10.0, 0.0, 1_026, true));
    }

    #[test]
    fn test_suppressed_samples_do_not_advance_the_cooldown() {
        // Arrange
        let mut filter = make_motion_filter();
        assert!(filter.should_emit(10.0, 0.0, 1_000, false));

        // Act – a suppressed sample at 1_030 must not reset the clock
        assert!(!filter.should_emit(10.0, 0.0, 1_030, false));

        // Assert – 1_036 is 36 ms after the last *emission* at 1_000
        assert!(filter.should_emit(10.0, 0.0, 1_036, false));
    }

    // ── ScrollFilter ──────────────────────────────────────────────────────────

    fn scroll_move(y: f32, previous_y: f32, ts: i64) -> TouchSample {
        TouchSample::moved(0.0, y, 0.0, previous_y, ts)
    }

    #[test]
    fn test_scroll_sequence_from_reference_client() {
        // Arrange – delta sequence [0, 10, -2, 12] with threshold 7, scale 1.5
        let mut filter = ScrollFilter::new(&GestureConfig::default());
        filter.handle_sample(&TouchSample::down(0.0, 100.0, 1_000));

        // Act
        let first = filter.handle_sample(&scroll_move(100.0, 100.0, 1_010)); // +0
        let second = filter.handle_sample(&scroll_move(110.0, 100.0, 1_020)); // +10
        let third = filter.handle_sample(&scroll_move(108.0, 110.0, 1_030)); // -2
        let fourth = filter.handle_sample(&scroll_move(120.0, 108.0, 1_040)); // +12

        // Assert – only the 10 and 12 steps clear the 7 px gate
        assert_eq!(first, None);
        assert_eq!(second, Some(GestureEvent::Scroll { delta_y: 15.0 }));
        assert_eq!(third, None);
        assert_eq!(fourth, Some(GestureEvent::Scroll { delta_y: 18.0 }));
    }

    #[test]
    fn test_scroll_anchor_resets_even_when_suppressed() {
        // Arrange
        let mut filter = ScrollFilter::new(&GestureConfig::default());
        filter.handle_sample(&TouchSample::down(0.0, 100.0, 1_000));

        // Act – two consecutive 6 px steps; 12 px total, but each individual
        // step is below the 7 px gate
        let a = filter.handle_sample(&scroll_move(106.0, 100.0, 1_010));
        let b = filter.handle_sample(&scroll_move(112.0, 106.0, 1_020));

        // Assert – no accumulation across suppressed samples
        assert_eq!(a, None);
        assert_eq!(b, None);
    }

    #[test]
    fn test_scroll_downward_delta_keeps_its_sign() {
        let mut filter = ScrollFilter::new(&GestureConfig::default());
        filter.handle_sample(&TouchSample::down(0.0, 100.0, 1_000));

        let event = filter.handle_sample(&scroll_move(80.0, 100.0, 1_010));
        assert_eq!(event, Some(GestureEvent::Scroll { delta_y: -30.0 }));
    }

    #[test]
    fn test_scroll_anchor_clears_on_up() {
        // Arrange
        let mut filter = ScrollFilter::new(&GestureConfig::default());
        filter.handle_sample(&TouchSample::down(0.0, 100.0, 1_000));
        filter.handle_sample(&TouchSample::up(0.0, 100.0, 1_050));

        // Act – a new contact far from the old one must not scroll on Down
        let event = filter.handle_sample(&TouchSample::down(0.0, 400.0, 2_000));

        // Assert
        assert_eq!(event, None);
    }
}
