use super::ChatApi;
use crate::config::ClientConfig;
use crate::types::{ChatReply, ChatRequest, SessionPayload};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat backend error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// HTTP Client
// ============================================

/// Talks to the chat backend over JSON/HTTP.
#[derive(Clone, Debug)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatApi for HttpChatApi {
    async fn create_session(&self) -> ApiResult<SessionPayload> {
        let url = self.url("/session");
        debug!(%url, "creating chat session");
        self.execute(self.client.post(url)).await
    }

    async fn reset_session(&self, session_id: &str) -> ApiResult<SessionPayload> {
        let url = self.url(&format!("/session/{session_id}/reset"));
        debug!(%url, "resetting chat session");
        self.execute(self.client.post(url)).await
    }

    async fn send_message(&self, session_id: &str, message: &str) -> ApiResult<ChatReply> {
        let url = self.url("/chat");
        debug!(%url, session_id, "sending chat message");
        let request = self.client.post(url).json(&ChatRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
        });
        self.execute(request).await
    }
}
