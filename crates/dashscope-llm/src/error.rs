use thiserror::Error;

/// Errors surfaced by the chat adapter
///
/// The adapter never retries and never rewrites upstream failures: transport
/// errors keep their original message text so callers can branch on
/// vendor-specific causes.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Caller passed a malformed or missing argument; raised before any
    /// transport work happens
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream `DashScope` call failed
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Error while reading the streaming response
    #[error("streaming error: {0}")]
    Streaming(String),
}
