//! The fixed vocabulary of text commands and its encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gesture::event::GestureEvent;

/// One command of the wire vocabulary.
///
/// Constructed once, handed to the transport by value, written as a single
/// line, and discarded.  Motion deltas are truncated to integers on the wire;
/// scroll deltas keep their fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// `LCLICK` — left click.
    LeftClick,
    /// `RCLICK` — right click.
    RightClick,
    /// `DCLICK` — left double click.
    DoubleClick,
    /// `DRAG_START` — press and hold the left button.
    DragStart,
    /// `DRAG_MOVE,<dx>,<dy>` — relative cursor move while the button is held.
    DragMove { dx: i32, dy: i32 },
    /// `DRAG_END` — release the left button.
    DragEnd,
    /// `M,<dx>,<dy>` — relative cursor move.
    Move { dx: i32, dy: i32 },
    /// `SCROLL,<delta_y>` — vertical scroll, fractional delta permitted.
    Scroll { delta_y: f32 },
}

impl Command {
    /// Renders the command as its wire line, without the line terminator.
    /// The transport appends the newline when writing.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::LeftClick => write!(f, "LCLICK"),
            Command::RightClick => write!(f, "RCLICK"),
            Command::DoubleClick => write!(f, "DCLICK"),
            Command::DragStart => write!(f, "DRAG_START"),
            Command::DragMove { dx, dy } => write!(f, "DRAG_MOVE,{dx},{dy}"),
            Command::DragEnd => write!(f, "DRAG_END"),
            Command::Move { dx, dy } => write!(f, "M,{dx},{dy}"),
            // `{:?}` keeps a fractional digit on whole values ("15.0", not
            // "15"), which is the float formatting the server parses.
            Command::Scroll { delta_y } => write!(f, "SCROLL,{delta_y:?}"),
        }
    }
}

impl From<&GestureEvent> for Command {
    fn from(event: &GestureEvent) -> Self {
        match *event {
            GestureEvent::Tap => Command::LeftClick,
            GestureEvent::DoubleTap => Command::DoubleClick,
            GestureEvent::LongPress => Command::RightClick,
            GestureEvent::DragStart => Command::DragStart,
            GestureEvent::DragMove { dx, dy } => Command::DragMove {
                dx: dx as i32,
                dy: dy as i32,
            },
            GestureEvent::DragEnd => Command::DragEnd,
            GestureEvent::Pan { dx, dy } => Command::Move {
                dx: dx as i32,
                dy: dy as i32,
            },
            GestureEvent::Scroll { delta_y } => Command::Scroll { delta_y },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
