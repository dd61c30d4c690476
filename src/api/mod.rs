/// Session API for the chat widget
///
/// This module provides the three calls the widget makes against the chat
/// backend, behind the [`ChatApi`] trait so the controller can be driven by a
/// scripted implementation in tests.
///
/// # Architecture
///
/// - `client` - reqwest-backed [`HttpChatApi`] and the [`ApiError`] taxonomy
///
/// # Usage
///
/// ```rust,no_run
/// use foundry_chat::api::{ChatApi, HttpChatApi};
///
/// # async fn example() -> foundry_chat::api::ApiResult<()> {
/// let api = HttpChatApi::new("http://127.0.0.1:8000/api");
/// let session = api.create_session().await?;
/// let _reply = api.send_message(&session.session_id, "Hello!").await?;
/// # Ok(())
/// # }
/// ```
mod client;

use crate::types::{ChatReply, SessionPayload};
use async_trait::async_trait;

// Re-export main types
pub use client::{ApiError, ApiResult, HttpChatApi};

/// The backend calls the session controller depends on.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatApi {
    /// `POST /session`
    async fn create_session(&self) -> ApiResult<SessionPayload>;

    /// `POST /session/{id}/reset`
    async fn reset_session(&self, session_id: &str) -> ApiResult<SessionPayload>;

    /// `POST /chat`
    async fn send_message(&self, session_id: &str, message: &str) -> ApiResult<ChatReply>;
}
