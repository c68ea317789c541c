//! HTTP client for the chat backend.
//!
//! One `reqwest::Client` shared across all endpoints. Each request carries
//! `Content-Type: application/json` and, when a token is known, an
//! `Authorization: Bearer <token>` header. No caching, retrying, or
//! request deduplication happens here — callers own that policy.

use std::time::Duration;

use log::{debug, warn};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    Conversation, ConversationHistory, ConversationId, NewConversationRequest, SendRequest,
    SendResponse,
};
use super::{ApiError, UNKNOWN_ERROR};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client against `base_url` (no trailing slash needed).
    ///
    /// `token` is the bearer token read from persistent storage at startup,
    /// or an in-memory override; `None` sends unauthenticated requests.
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Sends `message` into an existing conversation, or starts a new one
    /// when `conversation_id` is `None` (the server assigns the id).
    pub async fn send_message(
        &self,
        conversation_id: Option<&ConversationId>,
        message: &str,
    ) -> Result<SendResponse, ApiError> {
        match conversation_id {
            Some(_) => {
                let body = SendRequest {
                    conversation_id,
                    message,
                };
                self.request(Method::POST, "/api/chat/send", Some(&body))
                    .await
            }
            None => {
                let body = NewConversationRequest { message };
                self.request(Method::POST, "/api/chat/new", Some(&body))
                    .await
            }
        }
    }

    /// Fetches all conversations for the sidebar.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.request(Method::GET, "/api/chat/conversations", None::<&()>)
            .await
    }

    /// Fetches the full message history of one conversation.
    pub async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationHistory, ApiError> {
        let path = format!("/api/chat/conversations/{id}");
        self.request(Method::GET, &path, None::<&()>).await
    }

    /// Deletes a conversation. The success body is arbitrary and ignored.
    pub async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        let path = format!("/api/chat/conversations/{id}");
        self.request::<serde_json::Value, ()>(Method::DELETE, &path, None)
            .await
            .map(|_| ())
    }

    /// Issues one request and decodes the JSON response.
    ///
    /// Non-2xx statuses become [`ApiError::Status`] with the message pulled
    /// from the error body's `detail` field; an unparsable body or a missing
    /// or null `detail` falls back to [`UNKNOWN_ERROR`]. Every failure is
    /// logged here so callers surface a single normalized error while the
    /// log keeps the full trace.
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            Some(b) => builder.json(b),
            // reqwest only sets Content-Type when a body is attached
            None => builder.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };

        let response = builder.send().await.map_err(|e| {
            warn!("{method} {url} transport failure: {e}");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_detail(response).await;
            warn!("{method} {url} failed: HTTP {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            warn!("{method} {url} returned an undecodable body: {e}");
            ApiError::Decode(e.to_string())
        })
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// The backend reports errors as `{"detail": "..."}`. A body that isn't
/// JSON, has no `detail`, or has a null `detail` yields the fixed fallback
/// rather than an error of its own.
async fn extract_detail(response: reqwest::Response) -> String {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
