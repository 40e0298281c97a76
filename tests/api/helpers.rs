use contact_relay::configuration::{get_configuration, Settings};
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const WEBHOOK_PATH: &str = "/api/webhooks/1/token";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub email_server: MockServer,
    pub chat_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_send_email(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send_email", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_send_email_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/send_email", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Ursula",
        "mail": "ursula_le_guin@gmail.com",
        "issue": "Job offer",
        "message": "We read your portfolio. We would like to talk."
    })
}

/// Configuration pointing both notifiers at the given mock servers.
pub fn test_configuration(email_server: &MockServer, chat_server: &MockServer) -> Settings {
    let mut config = get_configuration().expect("Failed to read configuration");
    // Use a random OS port
    config.application.port = 0;
    config.email_client.base_url = email_server.uri();
    config.email_client.sender_email = "relay@example.com".into();
    config.email_client.receiver_email = "inbox@example.com".into();
    config.email_client.authorization_token = Secret::new("re_test_token".into());
    config.email_client.timeout_milliseconds = 500;
    config.chat_webhook.url = Secret::new(format!("{}{}", chat_server.uri(), WEBHOOK_PATH));
    config.chat_webhook.role_id = "1234".into();
    config.chat_webhook.timeout_milliseconds = 500;
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with<F>(customise: F) -> TestApp
where
    F: FnOnce(&mut Settings),
{
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let chat_server = MockServer::start().await;
    let mut config = test_configuration(&email_server, &chat_server);
    customise(&mut config);

    let application = Application::build(config).expect("Failed to build application");
    let port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        port,
        email_server,
        chat_server,
        api_client: reqwest::Client::new(),
    }
}
