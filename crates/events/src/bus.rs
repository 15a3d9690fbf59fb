//! Emission-sink abstraction for gesture notifications.
//!
//! The listener emits named notifications through an `EventBus` without
//! knowing what carries them. A disconnected or saturated sink is never
//! an error for the producer: emissions degrade to no-ops, because the
//! classifier's behavior must not depend on delivery.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Trait for forwarding named notifications to the application layer.
pub trait EventBus: Send + Sync {
    /// Emit a notification.
    ///
    /// # Arguments
    /// * `topic` - Notification name (e.g. "volume:double_up")
    /// * `payload` - JSON payload; `Value::Null` for argument-less
    ///   gesture notifications
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// A captured notification.
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// In-memory bus for tests; captures everything it is handed.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured notifications, in emission order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Topics of all captured notifications, in emission order.
    ///
    /// Gesture notifications are argument-less, so most assertions only
    /// need the topic sequence.
    pub fn topics(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.topic.clone())
            .collect()
    }

    /// Captured notifications for one topic.
    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Discard all captured notifications.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.events.lock().unwrap().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Bus that discards every notification.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {
        // Intentionally empty
    }
}

/// Bus that forwards notifications over a bounded channel to a consumer
/// thread (typically the bridge to the application layer).
///
/// Emission never blocks the key-event path: when the channel is full
/// the notification is dropped and counted, and when the consumer has
/// gone away emissions become silent no-ops.
pub struct ChannelEventBus {
    tx: crossbeam_channel::Sender<EmittedEvent>,
    dropped: AtomicU64,
}

impl ChannelEventBus {
    /// Create a bus and the receiver the consumer thread reads from.
    pub fn bounded(capacity: usize) -> (Self, crossbeam_channel::Receiver<EmittedEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (
            Self {
                tx,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    /// Number of notifications dropped because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl EventBus for ChannelEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        let event = EmittedEvent {
            topic: topic.to_string(),
            payload,
        };

        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(crossbeam_channel::TrySendError::Full(event)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                // Rate-limit logging: only log every 10th drop to avoid spam
                if dropped % 10 == 1 {
                    tracing::warn!(dropped, topic = %event.topic, "notification channel full, dropping");
                }
            }
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => {
                tracing::debug!(topic, "notification channel closed");
            }
        }
    }
}
