// Error handling module
// Defines the typed errors surfaced by the portal API client

use thiserror::Error;

/// Errors that can occur while talking to the TVU portal API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (connect failure, timeout, bad body)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Portal answered with a non-success status
    #[error("TVU API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Login call failed or the response carried no token
    #[error("Authentication failed: {0}")]
    Auth(String),
}
