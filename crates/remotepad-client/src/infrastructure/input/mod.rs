//! Scripted touch input: replays a gesture script as timed touch samples.
//!
//! The binary in this repository has no touch hardware behind it, so the
//! input surfaces are driven from a script — either a TOML file passed on the
//! command line or the built-in demo.  Replay stamps each sample with the
//! real wall clock at the moment it is sent, so the classifier's deadlines
//! behave exactly as they would under a finger.
//!
//! Script format:
//!
//! ```toml
//! [[step]]
//! action = "down"
//! x = 100.0
//! y = 100.0
//!
//! [[step]]
//! action = "wait"
//! ms = 60
//!
//! [[step]]
//! action = "up"
//! ```
//!
//! `surface = "scroll"` routes a touch step to the scroll strip; the default
//! surface is the touchpad.  `move` and `up` reuse the previous point of
//! their surface as the sample's origin.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use remotepad_core::TouchSample;

use crate::application::session::{epoch_millis, PadButton, SessionInput};

/// Error type for gesture-script loading.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Script schema ─────────────────────────────────────────────────────────────

/// Which input surface a touch step lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Touchpad,
    Scroll,
}

/// One step of a gesture script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Finger down at `(x, y)`.
    Down {
        #[serde(default)]
        surface: Surface,
        x: f32,
        y: f32,
    },
    /// Finger moves to `(x, y)`; the previous point becomes the sample origin.
    Move {
        #[serde(default)]
        surface: Surface,
        x: f32,
        y: f32,
    },
    /// Finger lifts at the surface's last known point.
    Up {
        #[serde(default)]
        surface: Surface,
    },
    /// Pause replay; this is where taps, holds, and drag delays come from.
    Wait { ms: u64 },
    /// Press a dedicated click button.
    Button { button: ScriptButton },
}

/// Script-level spelling of the dedicated buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    Left,
    Right,
}

/// A parsed gesture script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    #[serde(rename = "step", default)]
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Loads a script from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// The demo played when no script is given: a tap, a pan swipe, a
    /// double-tap-hold drag, and a scroll.
    pub fn builtin_demo() -> Self {
        let mut steps = Vec::new();

        // Single tap.
        steps.push(ScriptStep::Down {
            surface: Surface::Touchpad,
            x: 100.0,
            y: 100.0,
        });
        steps.push(ScriptStep::Wait { ms: 60 });
        steps.push(ScriptStep::Up {
            surface: Surface::Touchpad,
        });
        steps.push(ScriptStep::Wait { ms: 400 });

        // Pan swipe to the right.
        steps.push(ScriptStep::Down {
            surface: Surface::Touchpad,
            x: 100.0,
            y: 100.0,
        });
        for i in 1..=8 {
            steps.push(ScriptStep::Wait { ms: 40 });
            steps.push(ScriptStep::Move {
                surface: Surface::Touchpad,
                x: 100.0 + (i as f32) * 12.0,
                y: 100.0,
            });
        }
        steps.push(ScriptStep::Up {
            surface: Surface::Touchpad,
        });
        steps.push(ScriptStep::Wait { ms: 400 });

        // Double-tap-hold drag: tap, second tap held past the drag delay,
        // then a short pull down and to the right.
        steps.push(ScriptStep::Down {
            surface: Surface::Touchpad,
            x: 200.0,
            y: 200.0,
        });
        steps.push(ScriptStep::Wait { ms: 50 });
        steps.push(ScriptStep::Up {
            surface: Surface::Touchpad,
        });
        steps.push(ScriptStep::Wait { ms: 100 });
        steps.push(ScriptStep::Down {
            surface: Surface::Touchpad,
            x: 200.0,
            y: 200.0,
        });
        steps.push(ScriptStep::Wait { ms: 220 });
        for i in 1..=6 {
            steps.push(ScriptStep::Move {
                surface: Surface::Touchpad,
                x: 200.0 + (i as f32) * 10.0,
                y: 200.0 + (i as f32) * 6.0,
            });
            steps.push(ScriptStep::Wait { ms: 40 });
        }
        steps.push(ScriptStep::Up {
            surface: Surface::Touchpad,
        });
        steps.push(ScriptStep::Wait { ms: 400 });

        // Scroll down on the strip.
        steps.push(ScriptStep::Down {
            surface: Surface::Scroll,
            x: 10.0,
            y: 0.0,
        });
        for i in 1..=4 {
            steps.push(ScriptStep::Wait { ms: 40 });
            steps.push(ScriptStep::Move {
                surface: Surface::Scroll,
                x: 10.0,
                y: (i as f32) * 12.0,
            });
        }
        steps.push(ScriptStep::Up {
            surface: Surface::Scroll,
        });

        Self { steps }
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

/// A producer of session inputs.  The scripted source below is the only
/// implementation in this repository; a native touch surface would implement
/// the same trait and feed the same queue.
pub trait TouchSource {
    /// Runs the source to completion, sending inputs into the session queue.
    fn run(self, tx: mpsc::Sender<SessionInput>) -> impl std::future::Future<Output = ()> + Send;
}

/// Replays a [`GestureScript`] into the session queue in real time.
///
/// Tracks the last point of each surface independently so interleaved
/// touchpad and scroll steps produce correct per-surface deltas.
pub struct ScriptedTouchSource {
    script: GestureScript,
}

impl TouchSource for ScriptedTouchSource {
    fn run(self, tx: mpsc::Sender<SessionInput>) -> impl std::future::Future<Output = ()> + Send {
        self.replay(tx)
    }
}

impl ScriptedTouchSource {
    pub fn new(script: GestureScript) -> Self {
        Self { script }
    }

    /// Plays the script to completion, stamping samples with the wall clock
    /// as each is sent.  Returns early if the session queue has closed.
    pub async fn replay(self, tx: mpsc::Sender<SessionInput>) {
        info!(steps = self.script.steps.len(), "replaying gesture script");
        let mut last_touchpad: Option<(f32, f32)> = None;
        let mut last_scroll: Option<(f32, f32)> = None;

        for step in self.script.steps {
            let input = match step {
                ScriptStep::Wait { ms } => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    continue;
                }
                ScriptStep::Down { surface, x, y } => {
                    *last_point(surface, &mut last_touchpad, &mut last_scroll) = Some((x, y));
                    wrap(surface, TouchSample::down(x, y, epoch_millis()))
                }
                ScriptStep::Move { surface, x, y } => {
                    let last = last_point(surface, &mut last_touchpad, &mut last_scroll);
                    let Some((prev_x, prev_y)) = *last else {
                        warn!(?step, "move before down, skipped");
                        continue;
                    };
                    *last = Some((x, y));
                    wrap(
                        surface,
                        TouchSample::moved(x, y, prev_x, prev_y, epoch_millis()),
                    )
                }
                ScriptStep::Up { surface } => {
                    let last = last_point(surface, &mut last_touchpad, &mut last_scroll);
                    let Some((x, y)) = last.take() else {
                        warn!(?step, "up before down, skipped");
                        continue;
                    };
                    wrap(surface, TouchSample::up(x, y, epoch_millis()))
                }
                ScriptStep::Button { button } => SessionInput::Button(match button {
                    ScriptButton::Left => PadButton::Left,
                    ScriptButton::Right => PadButton::Right,
                }),
            };

            debug!(?input, "script input");
            if tx.send(input).await.is_err() {
                debug!("session queue closed, stopping replay");
                return;
            }
        }
    }
}

fn last_point<'a>(
    surface: Surface,
    touchpad: &'a mut Option<(f32, f32)>,
    scroll: &'a mut Option<(f32, f32)>,
) -> &'a mut Option<(f32, f32)> {
    match surface {
        Surface::Touchpad => touchpad,
        Surface::Scroll => scroll,
    }
}

fn wrap(surface: Surface, sample: TouchSample) -> SessionInput {
    match surface {
        Surface::Touchpad => SessionInput::Touchpad(sample),
        Surface::Scroll => SessionInput::Scroll(sample),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
