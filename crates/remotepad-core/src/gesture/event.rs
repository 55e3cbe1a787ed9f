//! Semantic gesture events produced by the classifier.

use serde::{Deserialize, Serialize};

/// A classified gesture, ready to be encoded as a wire command.
///
/// Each value is immutable once constructed and is handed off by value to the
/// transport side.  Motion deltas are kept as `f32` here; truncation to the
/// integer wire fields happens at encoding time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// A single confirmed tap (no second tap followed within the tap timeout).
    Tap,
    /// A completed double tap: the second tap lifted before the drag-decision
    /// delay elapsed.
    DoubleTap,
    /// A double-tap-and-hold crossed the drag-decision delay; the server
    /// presses and holds the left button.
    DragStart,
    /// Incremental cursor movement while dragging.
    DragMove { dx: f32, dy: f32 },
    /// The dragging finger lifted; the server releases the left button.
    DragEnd,
    /// Incremental cursor movement while not dragging.
    Pan { dx: f32, dy: f32 },
    /// A press held in place long enough to count as a right click.
    LongPress,
    /// Vertical scroll, already scaled for perceived speed.
    Scroll { delta_y: f32 },
}
