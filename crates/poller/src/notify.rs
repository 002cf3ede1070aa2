use async_trait::async_trait;
use gridwatch_core::errors::{EngineError, EngineResult};
use mockall::automock;
use reqwest::{Client, StatusCode};
use tracing::warn;

/// What became of one outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    /// The destination is gone for good (subscriber blocked the bot); the
    /// orchestrator deletes the subscription.
    PermanentlyRejected,
    /// Worth logging, not worth retrying this cycle.
    TransientFailure,
}

/// Delivery capability consumed by the poll orchestrator.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> EngineResult<SendOutcome>;
}

/// Telegram Bot API notifier over plain HTTP.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_api_base("https://api.telegram.org", token)
    }

    pub fn with_api_base(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> EngineResult<SendOutcome> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EngineError::Delivery(format!("sendMessage transport error: {e}")))?;

        match response.status() {
            StatusCode::OK => Ok(SendOutcome::Delivered),
            // The subscriber blocked the bot or deleted their account.
            StatusCode::FORBIDDEN => Ok(SendOutcome::PermanentlyRejected),
            status => {
                warn!("sendMessage to chat {} returned {}", chat_id, status);
                Ok(SendOutcome::TransientFailure)
            }
        }
    }
}
