use crate::helpers::{spawn_app, spawn_app_with};

const ORIGIN: &str = "https://portfolio.example.com";

#[tokio::test]
async fn any_origin_is_allowed_with_credentials() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/", &app.address))
        .header("Origin", ORIGIN)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ORIGIN);
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn preflight_requests_for_the_relay_are_accepted() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .request(reqwest::Method::OPTIONS, &format!("{}/send_email", &app.address))
        .header("Origin", ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);
}

#[tokio::test]
async fn credentials_can_be_disallowed() {
    let app = spawn_app_with(|config| config.application.cors.allow_credentials = false).await;

    let response = app
        .api_client
        .get(&format!("{}/", &app.address))
        .header("Origin", ORIGIN)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.headers()["access-control-allow-origin"], ORIGIN);
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}
