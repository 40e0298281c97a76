use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for a Resend-compatible email delivery API.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    receiver: String,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Acknowledgment returned by the provider for an accepted email.
#[derive(serde::Deserialize, Debug)]
pub struct SendEmailReceipt {
    pub id: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        receiver: String,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, String> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to build the email delivery client: {}", e))?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            receiver,
            authorization_token,
        })
    }

    #[tracing::instrument(name = "Calling the email delivery API", skip(self, text_content))]
    pub async fn send_email(
        &self,
        subject: &str,
        text_content: &str,
    ) -> Result<SendEmailReceipt, reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: &self.receiver,
            subject,
            text: text_content,
        };
        self.http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json::<SendEmailReceipt>()
            .await
    }
}
