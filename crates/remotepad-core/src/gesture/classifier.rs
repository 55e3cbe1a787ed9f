//! The gesture classifier: a timed state machine over one touch stream.
//!
//! The hard part of a single-finger trackpad is disambiguation.  A Down can
//! begin a tap, a long press, a pan, or the second half of a double tap — and
//! a second tap that is *held* for 150 ms becomes a drag instead of a double
//! click.  The classifier resolves these with three explicit deadlines:
//!
//! - **tap confirmation** — `tap_timeout_ms` after an Up with no second Down,
//!   the tap is confirmed as a single tap.
//! - **long press** — `long_press_ms` after a Down with no qualifying motion,
//!   the press becomes a right click.
//! - **drag decision** — `drag_delay_ms` after the second tap's Down, a
//!   finger that is still on the surface starts a drag.
//!
//! The classifier never owns a timer.  It reports the earliest pending
//! deadline through [`GestureClassifier::next_deadline`], and the session
//! loop delivers the expiry as a message on the same queue as touch samples,
//! so "was the finger still down when the timer fired" is resolved purely by
//! message order.  As a belt against late wakeups, [`handle_sample`] first
//! fires any deadline that expired at or before the sample's own timestamp —
//! a decision can therefore never be reordered past a later sample.
//!
//! [`handle_sample`]: GestureClassifier::handle_sample

use tracing::debug;

use crate::gesture::config::GestureConfig;
use crate::gesture::event::GestureEvent;
use crate::gesture::filter::MotionFilter;
use crate::gesture::sample::{TouchPhase, TouchSample};

/// Where the classifier is in the lifecycle of (at most) one contact.
///
/// Modelled as a tagged enum rather than boolean flags so that invalid
/// combinations — dragging without a prior `DragStart`, a pending second tap
/// with no first tap — cannot be represented at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactPhase {
    /// No finger on the surface, nothing pending.
    Idle,
    /// A first (possibly only) contact is in progress.
    FirstContact {
        down_at: i64,
        /// At least one qualifying Move was seen; disqualifies tap and long press.
        moved: bool,
        /// A `LongPress` was already emitted for this contact.
        long_press_fired: bool,
    },
    /// A clean tap ended; waiting out the tap timeout for a second Down.
    TapPending { up_at: i64 },
    /// The second tap of a double tap is down; the drag decision is pending.
    SecondContact { down_at: i64 },
    /// A drag is active: exactly one `DragStart` has been emitted and its
    /// `DragEnd` has not.
    Dragging,
}

/// Classifies raw touch samples into semantic gesture events.
///
/// Single-threaded by design: the session feeds it samples and timer expiries
/// from one ordered queue, and it is never shared across tasks.
pub struct GestureClassifier {
    config: GestureConfig,
    phase: ContactPhase,
    filter: MotionFilter,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        let filter = MotionFilter::new(&config);
        Self {
            config,
            phase: ContactPhase::Idle,
            filter,
        }
    }

    /// Returns `true` while a drag is active (a `DragStart` has been emitted
    /// with no matching `DragEnd` yet).
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, ContactPhase::Dragging)
    }

    /// The earliest pending deadline in epoch milliseconds, if any.
    ///
    /// The session loop sleeps until this instant and then calls
    /// [`handle_timer`](Self::handle_timer).  At most one deadline is pending
    /// at a time; each phase owns its own.
    pub fn next_deadline(&self) -> Option<i64> {
        match self.phase {
            ContactPhase::FirstContact {
                down_at,
                moved: false,
                long_press_fired: false,
            } => Some(down_at + self.config.long_press_ms),
            ContactPhase::TapPending { up_at } => Some(up_at + self.config.tap_timeout_ms),
            ContactPhase::SecondContact { down_at } => Some(down_at + self.config.drag_delay_ms),
            _ => None,
        }
    }

    /// Fires any deadline that has expired by `now_ms`.
    pub fn handle_timer(&mut self, now_ms: i64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.fire_expired(now_ms, &mut events);
        events
    }

    /// Feeds one touch sample, returning zero or more gesture events.
    ///
    /// Most Move samples return nothing: sub-threshold deltas are noise and
    /// qualifying deltas are still throttled to the pan/drag send interval.
    pub fn handle_sample(&mut self, sample: &TouchSample) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        // A sample stamped past a pending deadline means the deadline's
        // decision comes first, regardless of how late the wakeup runs.
        self.fire_expired(sample.timestamp_ms, &mut events);

        match sample.phase {
            TouchPhase::Down => self.on_down(sample.timestamp_ms, &mut events),
            TouchPhase::Move => self.on_move(sample, &mut events),
            TouchPhase::Up => self.on_up(sample.timestamp_ms, &mut events),
            TouchPhase::Cancel => self.on_cancel(&mut events),
        }

        events
    }

    fn fire_expired(&mut self, now_ms: i64, events: &mut Vec<GestureEvent>) {
        let Some(deadline) = self.next_deadline() else {
            return;
        };
        if now_ms < deadline {
            return;
        }

        match self.phase {
            ContactPhase::FirstContact {
                down_at, moved, ..
            } => {
                // Motionless hold crossed the long-press duration.
                debug_assert!(!moved);
                debug!(down_at, "long press");
                events.push(GestureEvent::LongPress);
                self.phase = ContactPhase::FirstContact {
                    down_at,
                    moved,
                    long_press_fired: true,
                };
            }
            ContactPhase::TapPending { .. } => {
                // No second Down arrived: the tap stands alone.
                debug!("single tap confirmed");
                events.push(GestureEvent::Tap);
                self.phase = ContactPhase::Idle;
            }
            ContactPhase::SecondContact { .. } => {
                // Finger still down when the drag-decision delay elapsed.
                debug!("drag started");
                events.push(GestureEvent::DragStart);
                self.phase = ContactPhase::Dragging;
            }
            ContactPhase::Idle | ContactPhase::Dragging => unreachable!("phases without deadlines"),
        }
    }

    fn on_down(&mut self, now_ms: i64, _events: &mut Vec<GestureEvent>) {
        match self.phase {
            ContactPhase::Idle => {
                self.phase = ContactPhase::FirstContact {
                    down_at: now_ms,
                    moved: false,
                    long_press_fired: false,
                };
            }
            ContactPhase::TapPending { .. } => {
                // Within the tap timeout (an expired one was already fired
                // above), so this Down is the second tap of a double tap.
                debug!(down_at = now_ms, "second tap down");
                self.phase = ContactPhase::SecondContact { down_at: now_ms };
            }
            ContactPhase::FirstContact { .. } | ContactPhase::SecondContact { .. } => {
                // A Down without a matching Up is an input-surface glitch;
                // restart the contact.
                self.phase = ContactPhase::FirstContact {
                    down_at: now_ms,
                    moved: false,
                    long_press_fired: false,
                };
            }
            ContactPhase::Dragging => {
                // Spurious: single-contact surface. The drag stays active.
            }
        }
    }

    fn on_move(&mut self, sample: &TouchSample, events: &mut Vec<GestureEvent>) {
        let (dx, dy) = (sample.dx(), sample.dy());
        let now_ms = sample.timestamp_ms;

        match self.phase {
            ContactPhase::FirstContact {
                down_at,
                moved,
                long_press_fired,
            } => {
                let qualifying = dx.abs() >= self.config.movement_threshold
                    || dy.abs() >= self.config.movement_threshold;
                if qualifying && !moved {
                    // Disarms the long-press deadline and disqualifies the tap.
                    self.phase = ContactPhase::FirstContact {
                        down_at,
                        moved: true,
                        long_press_fired,
                    };
                }
                if self.filter.should_emit(dx, dy, now_ms, false) {
                    events.push(GestureEvent::Pan { dx, dy });
                }
            }
            ContactPhase::SecondContact { .. } => {
                // Movement while the drag decision is pending pans at the
                // normal rate; it does not cancel the decision.
                if self.filter.should_emit(dx, dy, now_ms, false) {
                    events.push(GestureEvent::Pan { dx, dy });
                }
            }
            ContactPhase::Dragging => {
                if self.filter.should_emit(dx, dy, now_ms, true) {
                    events.push(GestureEvent::DragMove { dx, dy });
                }
            }
            ContactPhase::Idle | ContactPhase::TapPending { .. } => {
                // Move with no finger down: ignore.
            }
        }
    }

    fn on_up(&mut self, now_ms: i64, events: &mut Vec<GestureEvent>) {
        match self.phase {
            ContactPhase::FirstContact {
                moved,
                long_press_fired,
                ..
            } => {
                if !moved && !long_press_fired {
                    // Clean press-and-release: hold the tap until the timeout
                    // rules out a double tap.  `up_at` anchors that deadline.
                    self.phase = ContactPhase::TapPending { up_at: now_ms };
                } else {
                    self.phase = ContactPhase::Idle;
                }
            }
            ContactPhase::SecondContact { .. } => {
                // The drag decision had not fired yet (an expired one was
                // handled before this Up), so this is a completed double tap.
                debug!("double tap");
                events.push(GestureEvent::DoubleTap);
                self.phase = ContactPhase::Idle;
            }
            ContactPhase::Dragging => {
                debug!("drag ended");
                events.push(GestureEvent::DragEnd);
                self.phase = ContactPhase::Idle;
            }
            ContactPhase::Idle | ContactPhase::TapPending { .. } => {}
        }
    }

    fn on_cancel(&mut self, events: &mut Vec<GestureEvent>) {
        // The server must never be left holding the button across contacts.
        if matches!(self.phase, ContactPhase::Dragging) {
            events.push(GestureEvent::DragEnd);
        }
        self.phase = ContactPhase::Idle;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::sample::TouchSample;

    fn make_classifier() -> GestureClassifier {
        GestureClassifier::new(GestureConfig::default())
    }

    /// Drives a full sample sequence and collects every emitted event.
    fn run(classifier: &mut GestureClassifier, samples: &[TouchSample]) -> Vec<GestureEvent> {
        samples
            .iter()
            .flat_map(|s| classifier.handle_sample(s))
            .collect()
    }

    // ── Single tap ────────────────────────────────────────────────────────────

    #[test]
    fn test_down_up_emits_nothing_until_tap_timeout_confirms() {
        // Arrange
        let mut c = make_classifier();

        // Act – press and release cleanly
        let during = run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
            ],
        );

        // Assert – the tap is withheld while a double tap is still possible
        assert!(during.is_empty());
        assert_eq!(c.next_deadline(), Some(1_040 + 300));

        // Act – the confirmation deadline fires with no second Down
        let confirmed = c.handle_timer(1_340);

        // Assert – exactly one Tap
        assert_eq!(confirmed, vec![GestureEvent::Tap]);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_tap_with_subthreshold_jitter_still_confirms() {
        // Arrange – 2 px of jitter is below the 5 px movement threshold
        let mut c = make_classifier();

        // Act
        let during = run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::moved(52.0, 51.0, 50.0, 50.0, 1_020),
                TouchSample::up(52.0, 51.0, 1_040),
            ],
        );
        let confirmed = c.handle_timer(1_340);

        // Assert
        assert!(during.is_empty());
        assert_eq!(confirmed, vec![GestureEvent::Tap]);
    }

    #[test]
    fn test_qualifying_move_disqualifies_the_tap() {
        // Arrange
        let mut c = make_classifier();

        // Act – a 20 px move turns the contact into a pan
        let events = run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::moved(70.0, 50.0, 50.0, 50.0, 1_040),
                TouchSample::up(70.0, 50.0, 1_080),
            ],
        );

        // Assert – one Pan, no tap pending afterwards
        assert_eq!(events, vec![GestureEvent::Pan { dx: 20.0, dy: 0.0 }]);
        assert_eq!(c.next_deadline(), None);
    }

    // ── Double tap ────────────────────────────────────────────────────────────

    #[test]
    fn test_quick_second_tap_emits_exactly_one_double_tap() {
        // Arrange
        let mut c = make_classifier();

        // Act – second Up arrives 80 ms after the second Down (< 150 ms)
        let events = run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
                TouchSample::down(50.0, 50.0, 1_120),
                TouchSample::up(50.0, 50.0, 1_200),
            ],
        );

        // Assert – one DoubleTap; no Tap, no DragStart, no DragEnd
        assert_eq!(events, vec![GestureEvent::DoubleTap]);
        assert_eq!(c.next_deadline(), None, "no stale tap confirmation remains");
    }

    #[test]
    fn test_second_down_after_tap_timeout_is_a_new_first_contact() {
        // Arrange
        let mut c = make_classifier();
        run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
            ],
        );

        // Act – the next Down arrives past the 300 ms tap timeout, so the
        // expired confirmation fires first and the Down starts over
        let events = c.handle_sample(&TouchSample::down(50.0, 50.0, 1_500));

        // Assert
        assert_eq!(events, vec![GestureEvent::Tap]);
        assert!(!c.is_dragging());
        assert_eq!(c.next_deadline(), Some(1_500 + 500), "long press armed");
    }

    // ── Double-tap-hold drag ──────────────────────────────────────────────────

    #[test]
    fn test_held_second_tap_becomes_a_drag() {
        // Arrange – down, up, down … hold
        let mut c = make_classifier();
        let during = run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
                TouchSample::down(50.0, 50.0, 1_120),
            ],
        );
        assert!(during.is_empty());
        assert_eq!(c.next_deadline(), Some(1_120 + 150));

        // Act – the hold deadline fires while the finger is still down
        let started = c.handle_timer(1_270);

        // Assert
        assert_eq!(started, vec![GestureEvent::DragStart]);
        assert!(c.is_dragging());

        // Act – drag motion, then lift
        let moved = c.handle_sample(&TouchSample::moved(80.0, 60.0, 50.0, 50.0, 1_310));
        let ended = c.handle_sample(&TouchSample::up(80.0, 60.0, 1_400));

        // Assert – exactly one DragMove and one DragEnd; never a DoubleTap
        assert_eq!(moved, vec![GestureEvent::DragMove { dx: 30.0, dy: 10.0 }]);
        assert_eq!(ended, vec![GestureEvent::DragEnd]);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_late_up_sample_fires_the_drag_decision_first() {
        // Arrange – the Up is stamped past the 150 ms hold deadline, but the
        // timer message never arrived (late wakeup)
        let mut c = make_classifier();
        run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
                TouchSample::down(50.0, 50.0, 1_120),
            ],
        );

        // Act
        let events = c.handle_sample(&TouchSample::up(50.0, 50.0, 1_350));

        // Assert – decision order is preserved: the drag starts, then ends
        assert_eq!(events, vec![GestureEvent::DragStart, GestureEvent::DragEnd]);
    }

    #[test]
    fn test_motion_during_hold_window_pans_without_cancelling_the_drag() {
        // Arrange
        let mut c = make_classifier();
        run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
                TouchSample::down(50.0, 50.0, 1_120),
            ],
        );

        // Act – a qualifying move inside the 150 ms window
        let moved = c.handle_sample(&TouchSample::moved(60.0, 50.0, 50.0, 50.0, 1_160));
        let started = c.handle_timer(1_270);

        // Assert – the move pans; the hold decision still promotes to a drag
        assert_eq!(moved, vec![GestureEvent::Pan { dx: 10.0, dy: 0.0 }]);
        assert_eq!(started, vec![GestureEvent::DragStart]);
    }

    // ── Long press ────────────────────────────────────────────────────────────

    #[test]
    fn test_motionless_hold_emits_long_press_once() {
        // Arrange
        let mut c = make_classifier();
        assert!(c.handle_sample(&TouchSample::down(50.0, 50.0, 1_000)).is_empty());
        assert_eq!(c.next_deadline(), Some(1_500));

        // Act
        let fired = c.handle_timer(1_500);
        let lifted = c.handle_sample(&TouchSample::up(50.0, 50.0, 1_800));

        // Assert – LongPress once; the Up emits nothing and arms no tap
        assert_eq!(fired, vec![GestureEvent::LongPress]);
        assert!(lifted.is_empty());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_qualifying_move_disarms_the_long_press() {
        // Arrange
        let mut c = make_classifier();
        c.handle_sample(&TouchSample::down(50.0, 50.0, 1_000));

        // Act – real motion before the 500 ms mark
        c.handle_sample(&TouchSample::moved(80.0, 50.0, 50.0, 50.0, 1_100));

        // Assert – no deadline remains, so no LongPress can fire
        assert_eq!(c.next_deadline(), None);
        assert!(c.handle_timer(2_000).is_empty());
    }

    // ── Pan throttling ────────────────────────────────────────────────────────

    #[test]
    fn test_subthreshold_move_stream_emits_nothing() {
        // Arrange – every sample moves 3 px per axis, under the 5 px floor
        let mut c = make_classifier();
        c.handle_sample(&TouchSample::down(50.0, 50.0, 1_000));

        // Act
        let mut events = Vec::new();
        let mut pos = 50.0;
        for i in 0..50 {
            let next = pos + 3.0;
            events.extend(c.handle_sample(&TouchSample::moved(
                next,
                next,
                pos,
                pos,
                1_010 + i * 10,
            )));
            pos = next;
        }

        // Assert
        assert!(events.is_empty(), "noise must never reach the wire");
    }

    #[test]
    fn test_pan_stream_respects_the_send_interval() {
        // Arrange – qualifying 10 px moves every 10 ms
        let mut c = make_classifier();
        c.handle_sample(&TouchSample::down(0.0, 0.0, 1_000));

        // Act
        let mut emitted_at = Vec::new();
        let mut x = 0.0;
        for i in 0..40 {
            let ts = 1_010 + i * 10;
            let next = x + 10.0;
            if !c
                .handle_sample(&TouchSample::moved(next, 0.0, x, 0.0, ts))
                .is_empty()
            {
                emitted_at.push(ts);
            }
            x = next;
        }

        // Assert – consecutive Pans are at least 35 ms apart
        assert!(emitted_at.len() >= 2, "stream must emit more than once");
        for pair in emitted_at.windows(2) {
            assert!(
                pair[1] - pair[0] > 35,
                "emissions at {} and {} violate the pan interval",
                pair[0],
                pair[1]
            );
        }
    }

    // ── Cancel ────────────────────────────────────────────────────────────────

    #[test]
    fn test_cancel_during_drag_releases_the_button() {
        // Arrange – enter a drag
        let mut c = make_classifier();
        run(
            &mut c,
            &[
                TouchSample::down(50.0, 50.0, 1_000),
                TouchSample::up(50.0, 50.0, 1_040),
                TouchSample::down(50.0, 50.0, 1_120),
            ],
        );
        c.handle_timer(1_270);
        assert!(c.is_dragging());

        // Act
        let events = c.handle_sample(&TouchSample::cancel(50.0, 50.0, 1_300));

        // Assert
        assert_eq!(events, vec![GestureEvent::DragEnd]);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_cancel_outside_a_drag_emits_nothing() {
        let mut c = make_classifier();
        c.handle_sample(&TouchSample::down(50.0, 50.0, 1_000));

        let events = c.handle_sample(&TouchSample::cancel(50.0, 50.0, 1_050));
        assert!(events.is_empty());
        assert_eq!(c.next_deadline(), None);
    }
}
