//! Gesture classification for hardware volume buttons.
//!
//! Pure state-machine logic - no I/O, no timers, no platform hooks.
//! The classifier consumes raw key transitions for the two volume buttons
//! and resolves them into semantic gestures (double-press, simultaneous
//! dual-press). Resolution is driven entirely by the timestamps of
//! observed events; nothing fires asynchronously, so an isolated press
//! resolves to "no gesture" and is left to the host's default handling.

mod classifier;

pub use classifier::{Classification, GestureClassifier, DOUBLE_PRESS_WINDOW_MS};

use serde::{Deserialize, Serialize};

/// One of the two tracked hardware buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Volume-up / increase button.
    Increase,
    /// Volume-down / decrease button.
    Decrease,
}

impl Button {
    /// The opposite button.
    pub fn other(self) -> Self {
        match self {
            Button::Increase => Button::Decrease,
            Button::Decrease => Button::Increase,
        }
    }

    /// Human-readable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Button::Increase => "increase",
            Button::Decrease => "decrease",
        }
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Physical transition of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Button pressed.
    Down,
    /// Button released.
    Up,
}

/// A raw key transition as delivered by the host.
///
/// `ts_ms` must be non-decreasing across the event stream for one
/// classifier instance; ties are allowed. Out-of-order delivery is a
/// caller contract violation, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub button: Button,
    pub phase: Phase,
    /// Monotonic timestamp in milliseconds.
    pub ts_ms: i64,
}

impl KeyEvent {
    pub fn down(button: Button, ts_ms: i64) -> Self {
        Self {
            button,
            phase: Phase::Down,
            ts_ms,
        }
    }

    pub fn up(button: Button, ts_ms: i64) -> Self {
        Self {
            button,
            phase: Phase::Up,
            ts_ms,
        }
    }
}

/// A resolved semantic gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// A single press, reported per-press by hosts that opt into the
    /// eager notification protocol. The classifier itself resolves a
    /// lone press as pass-through instead of emitting this.
    Single(Button),
    /// Two presses of the same button within the double-press window.
    Double(Button),
    /// Both buttons pressed at the same time (second down while the
    /// first is still held).
    Both,
}

/// What the host must do with the raw event that was just classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the host's default handling run (native volume adjustment).
    PassThrough,
    /// The event is fully consumed; suppress default handling.
    Consumed,
}
