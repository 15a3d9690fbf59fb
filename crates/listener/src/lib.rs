//! Listening-session layer for volume-button gestures.
//!
//! Sits between the host's raw key-event feed and the application layer:
//! one `GestureListener` per listening session owns a fresh classifier,
//! forwards resolved gestures to an `EventBus`, and tells the host per
//! event whether to suppress its default volume handling.
//!
//! # Example
//!
//! ```ignore
//! use keychord_events::{EventBusRef, InMemoryEventBus};
//! use keychord_gestures::{Button, KeyEvent};
//! use keychord_listener::GestureListener;
//! use std::sync::Arc;
//!
//! let bus: EventBusRef = Arc::new(InMemoryEventBus::new());
//! let mut listener = GestureListener::start(bus);
//!
//! // Host key hook, per physical transition:
//! let disposition = listener.on_key_event(KeyEvent::down(Button::Increase, 0));
//!
//! // Session teardown:
//! listener.stop();
//! ```

mod error;
mod session;

pub use error::ListenerError;
pub use session::{GestureListener, ListenerConfig};

/// Listener wrapped for multi-threaded hosts.
///
/// The classifier performs no internal synchronization; hosts that
/// deliver key events from more than one thread serialize access
/// through this.
pub type SharedListener = std::sync::Mutex<GestureListener>;
