//! # Chat API
//!
//! HTTP surface of the EDDI assistant backend: send a message, list, fetch,
//! and delete conversations. [`ApiClient`] is the single entry point; each
//! endpoint returns an explicit typed response.
//!
//! Failure taxonomy:
//! - [`ApiError::Transport`] — no response at all (DNS, refused, timeout).
//! - [`ApiError::Status`] — non-2xx; message taken from the body's `detail`
//!   field when present, otherwise a fixed fallback.
//! - [`ApiError::Decode`] — a 2xx body that doesn't match the expected shape.

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    Button, Conversation, ConversationHistory, ConversationId, Message, Role, SendResponse,
};

use std::fmt;

/// Message used when an error response carries no usable `detail` field.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Errors produced by [`ApiClient`] operations.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure with no HTTP response. The underlying transport
    /// error is propagated unchanged.
    Transport(reqwest::Error),
    /// The server answered with a non-success status.
    Status { status: u16, message: String },
    /// A success response whose body failed to decode into the endpoint's
    /// result type.
    Decode(String),
}

impl ApiError {
    /// Human-readable message for inline display.
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(e) => e.to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "{e}"),
            // The status line is logged at the call site; display carries
            // just the normalized message so it can be shown to the user.
            ApiError::Status { message, .. } => f.write_str(message),
            ApiError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}
