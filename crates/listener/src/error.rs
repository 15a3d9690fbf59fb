//! Error types for the listening-session layer.

use thiserror::Error;

/// Errors that can occur when configuring a listening session.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured double-press window is unusable.
    #[error("double-press window must be positive, got {window_ms}ms")]
    InvalidWindow { window_ms: i64 },
}
