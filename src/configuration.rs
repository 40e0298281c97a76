use std::time::Duration;

use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::chat_client::ChatClient;
use crate::email_client::EmailClient;

/// Variables documented for deployments, applied after every other source.
const ENVIRONMENT_OVERRIDES: [(&str, &str); 5] = [
    ("EMAIL_API_KEY", "email_client.authorization_token"),
    ("SENDER_MAIL", "email_client.sender_email"),
    ("RECEIVER_MAIL", "email_client.receiver_email"),
    ("WH_URL", "chat_webhook.url"),
    ("ROLE_ID", "chat_webhook.role_id"),
];

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub chat_webhook: ChatWebhookSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    /// Answer notifier failures with 405 instead of 502.
    pub legacy_failure_status: bool,
    pub cors: CorsSettings,
    pub static_files: StaticFilesSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CorsSettings {
    pub allow_credentials: bool,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StaticFilesSettings {
    pub mount_path: String,
    pub directory: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub receiver_email: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<EmailClient, String> {
        let timeout = self.timeout();
        EmailClient::new(
            self.base_url,
            self.sender_email,
            self.receiver_email,
            self.authorization_token,
            timeout,
        )
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ChatWebhookSettings {
    pub url: Secret<String>,
    pub role_id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ChatWebhookSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<ChatClient, String> {
        let timeout = self.timeout();
        ChatClient::new(self.url, self.role_id, timeout)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Read the shared defaults
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_APPLICATION__PORT=5001` sets `Settings.application.port`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    apply_overrides(&mut settings, |variable| std::env::var(variable).ok())?;

    settings.try_into()
}

/// Apply the documented deployment variables found by `lookup`.
fn apply_overrides(
    settings: &mut config::Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), config::ConfigError> {
    for (variable, key) in ENVIRONMENT_OVERRIDES {
        if let Some(value) = lookup(variable) {
            settings.set(key, value)?;
        }
    }
    Ok(())
}
