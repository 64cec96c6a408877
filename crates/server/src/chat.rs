//! External conversational-reply integration.
//!
//! The tutor UI has a small helper chat. Replies come from an external
//! service behind [`ReplyProvider`]; the server only relays messages and
//! never depends on the provider for scoring.

use crate::error::{ServerError, ServerResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Produces a reply for a free-form user message.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(&self, message: &str) -> ServerResult<String>;
}

/// Provider used when no chat backend is configured. Always 503s.
pub struct DisabledReplyProvider;

#[async_trait]
impl ReplyProvider for DisabledReplyProvider {
    async fn reply(&self, _message: &str) -> ServerResult<String> {
        Err(ServerError::ChatUnavailable)
    }
}

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct UpstreamResponse {
    reply: String,
}

/// HTTP provider posting `{"message"}` and expecting `{"reply"}` back.
pub struct HttpReplyProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpReplyProvider {
    pub fn new(url: String, api_key: Option<String>) -> ServerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| ServerError::Config(format!("chat client: {e}")))?;
        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl ReplyProvider for HttpReplyProvider {
    async fn reply(&self, message: &str) -> ServerResult<String> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&UpstreamRequest { message });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServerError::ChatUpstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServerError::ChatUpstream(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        let body: UpstreamResponse = response
            .json()
            .await
            .map_err(|e| ServerError::ChatUpstream(format!("malformed reply: {e}")))?;
        Ok(body.reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_provider_reports_unavailable() {
        let provider = DisabledReplyProvider;
        let err = provider.reply("hello").await.unwrap_err();
        assert!(matches!(err, ServerError::ChatUnavailable));
    }
}
