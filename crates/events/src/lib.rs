//! Shared notification contracts for the gesture pipeline.
//!
//! This crate defines the named notifications the listener forwards to
//! the application layer, and the `EventBus` trait that decouples the
//! listener from whatever transport actually carries them. Gesture
//! notifications are argument-less by contract; only session-state
//! changes carry a payload.

mod bus;

pub use bus::{ChannelEventBus, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use keychord_gestures::{Button, Gesture};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification topics as constants to prevent typos.
pub mod topics {
    /// Single press of the increase button (eager per-press protocol).
    pub const SINGLE_UP: &str = "volume:single_up";
    /// Single press of the decrease button (eager per-press protocol).
    pub const SINGLE_DOWN: &str = "volume:single_down";
    /// Double press of the increase button.
    pub const DOUBLE_UP: &str = "volume:double_up";
    /// Double press of the decrease button.
    pub const DOUBLE_DOWN: &str = "volume:double_down";
    /// Both buttons pressed simultaneously.
    pub const BOTH: &str = "volume:both";
    /// Listening session started or stopped.
    pub const LISTENING_CHANGED: &str = "volume:listening_changed";
}

/// Map a resolved gesture to its notification topic.
pub fn topic(gesture: Gesture) -> &'static str {
    match gesture {
        Gesture::Single(Button::Increase) => topics::SINGLE_UP,
        Gesture::Single(Button::Decrease) => topics::SINGLE_DOWN,
        Gesture::Double(Button::Increase) => topics::DOUBLE_UP,
        Gesture::Double(Button::Decrease) => topics::DOUBLE_DOWN,
        Gesture::Both => topics::BOTH,
    }
}

/// Event emitted when a listening session starts or stops.
///
/// Producers: listener session layer
/// Consumers: application layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningChangedEvent {
    /// Whether a session is now active.
    pub active: bool,
    /// Id of the session that changed state.
    pub session_id: Uuid,
}

impl ListeningChangedEvent {
    /// Serialize for bus emission.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
