use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

/// Pings a chat channel through an incoming webhook when a submission arrives.
pub struct ChatClient {
    http_client: Client,
    // The webhook URL embeds its own token.
    webhook_url: Secret<String>,
    role_id: String,
}

#[derive(serde::Serialize)]
struct WebhookMessage {
    content: String,
}

impl ChatClient {
    pub fn new(
        webhook_url: Secret<String>,
        role_id: String,
        timeout: Duration,
    ) -> Result<Self, String> {
        if reqwest::Url::parse(webhook_url.expose_secret()).is_err() {
            return Err("The chat webhook URL is missing or invalid".into());
        }
        if role_id.trim().is_empty() {
            return Err("The chat role id to mention is missing".into());
        }
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build the chat webhook client: {}", e))?;
        Ok(Self {
            http_client,
            webhook_url,
            role_id,
        })
    }

    fn announcement(&self) -> WebhookMessage {
        WebhookMessage {
            content: format!(
                "<@&{}> A job offer has arrived, take a look at it!",
                self.role_id
            ),
        }
    }

    /// Returns `true` only when the webhook answers `204 No Content`.
    #[tracing::instrument(name = "Notifying the chat channel", skip(self))]
    pub async fn notify_new_submission(&self) -> bool {
        let outcome = self
            .http_client
            .post(self.webhook_url.expose_secret())
            .json(&self.announcement())
            .send()
            .await;

        match outcome {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => true,
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "The chat webhook did not acknowledge the notification"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    error.message = %e,
                    error.cause_chain = ?e,
                    "Failed to reach the chat webhook"
                );
                false
            }
        }
    }
}
