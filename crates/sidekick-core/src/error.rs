//! Error types for configuration and completion calls.

use thiserror::Error;

/// Errors that can occur while reading startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Telegram bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN environment variable.")]
    MissingToken,
}

/// Errors that can occur during a completion call.
///
/// Every variant is recoverable from the router's point of view: the call is
/// one-shot, the failure is reported to the user, and the chat's session mode
/// is cleared regardless.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key configured; the backend was never constructed and no
    /// network call was attempted.
    #[error("model backend is not configured (OPENAI_API_KEY not set)")]
    NotConfigured,

    /// The HTTP request itself failed (connection, TLS, timeout).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status code.
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the backend.
        body: String,
    },
}

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;
