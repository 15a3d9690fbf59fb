//! One listening session: classifier ownership plus bus forwarding.

use keychord_events::{topic, topics, EventBusRef, ListeningChangedEvent};
use keychord_gestures::{Classification, Disposition, Gesture, GestureClassifier, KeyEvent, Phase};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ListenerError;

/// Options for a listening session.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Window within which a second press counts as a double-press.
    pub double_press_window_ms: i64,
    /// Also notify each unresolved first click as a single-press
    /// notification while it passes through (the original per-press
    /// protocol). With this on, the first press of what later becomes a
    /// double is still reported as a single first.
    pub notify_single_presses: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            double_press_window_ms: keychord_gestures::DOUBLE_PRESS_WINDOW_MS,
            notify_single_presses: false,
        }
    }
}

/// An active listening session.
///
/// Created by "start listening", discarded by "stop listening". Owns
/// exactly one classifier; no state survives the session.
pub struct GestureListener {
    session_id: Uuid,
    classifier: GestureClassifier,
    bus: EventBusRef,
    notify_single_presses: bool,
}

impl GestureListener {
    /// Start a session with default options.
    pub fn start(bus: EventBusRef) -> Self {
        Self::new(bus, ListenerConfig::default())
    }

    /// Start a session with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ListenerError::InvalidWindow` if the double-press window
    /// is not positive.
    pub fn start_with_config(
        bus: EventBusRef,
        config: ListenerConfig,
    ) -> Result<Self, ListenerError> {
        if config.double_press_window_ms <= 0 {
            return Err(ListenerError::InvalidWindow {
                window_ms: config.double_press_window_ms,
            });
        }
        Ok(Self::new(bus, config))
    }

    fn new(bus: EventBusRef, config: ListenerConfig) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(
            session = %session_id,
            window_ms = config.double_press_window_ms,
            eager_singles = config.notify_single_presses,
            "listening session started"
        );

        let listener = Self {
            session_id,
            classifier: GestureClassifier::with_window(config.double_press_window_ms),
            bus,
            notify_single_presses: config.notify_single_presses,
        };
        listener.emit_listening_changed(true);
        listener
    }

    /// Id of this session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Feed one raw key transition from the host.
    ///
    /// Forwards any resolved gesture to the bus as an argument-less
    /// notification and returns the disposition the host must honor:
    /// doubles, dual-presses and all release events are consumed, while
    /// an unresolved first click passes through so the native volume
    /// adjustment still happens.
    pub fn on_key_event(&mut self, event: KeyEvent) -> Disposition {
        let Classification {
            gesture,
            disposition,
        } = self.classifier.on_event(event);

        if let Some(gesture) = gesture {
            tracing::debug!(session = %self.session_id, topic = topic(gesture), "gesture resolved");
            self.bus.emit(topic(gesture), Value::Null);
        } else if self.notify_single_presses
            && event.phase == Phase::Down
            && disposition == Disposition::PassThrough
        {
            self.bus
                .emit(topic(Gesture::Single(event.button)), Value::Null);
        }

        disposition
    }

    /// Stop the session, discarding all classifier state.
    pub fn stop(self) {
        tracing::info!(session = %self.session_id, "listening session stopped");
        self.emit_listening_changed(false);
    }

    fn emit_listening_changed(&self, active: bool) {
        let event = ListeningChangedEvent {
            active,
            session_id: self.session_id,
        };
        self.bus.emit(topics::LISTENING_CHANGED, event.to_payload());
    }
}
