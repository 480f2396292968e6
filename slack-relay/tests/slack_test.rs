mod common;

use common::{TestApp, WEBHOOK_PATH};
use serde_json::json;
use slack_relay::startup::Application;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

// =============================================================================
// Forwarding
// =============================================================================

#[tokio::test]
async fn forwards_message_to_webhook() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(body_json(json!({ "text": "Standup done" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&app.webhook)
        .await;

    let response = app.post_message(&json!({ "text": "Standup done" })).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "success": true, "message": "Message sent to Slack" })
    );
}

#[tokio::test]
async fn any_2xx_counts_as_delivered() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.webhook)
        .await;

    let response = app.post_message(&json!({ "text": "no content is fine" })).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn repeated_messages_are_each_forwarded() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(body_json(json!({ "text": "same text" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.webhook)
        .await;

    for _ in 0..2 {
        let response = app.post_message(&json!({ "text": "same text" })).await;
        assert_eq!(response.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn only_text_is_forwarded() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.webhook)
        .await;

    let response = app
        .post_message(&json!({ "text": "hello", "channel": "#random", "username": "bot" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let received = app.webhook.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
    let forwarded: serde_json::Value =
        serde_json::from_slice(&received[0].body).expect("Invalid JSON forwarded");
    assert_eq!(forwarded, json!({ "text": "hello" }));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn missing_text_is_rejected_without_calling_webhook() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.webhook)
        .await;

    for body in [json!({}), json!({ "text": "" }), json!({ "text": null })] {
        let response = app.post_message(&body).await;

        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "error": "Message text is required" }));
    }
}

#[tokio::test]
async fn non_json_body_is_treated_as_missing_text() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.webhook)
        .await;

    let response = app
        .client
        .post(format!("{}/api/slack/send", app.address))
        .header("content-type", "text/plain")
        .body("Standup done")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Message text is required");
}

#[tokio::test]
async fn non_string_text_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_message(&json!({ "text": 42 })).await;

    assert_eq!(response.status().as_u16(), 400);
    let received = app.webhook.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn upstream_error_status_maps_to_500() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
        .expect(1)
        .mount(&app.webhook)
        .await;

    let response = app.post_message(&json!({ "text": "Standup done" })).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send message to Slack");
    assert_eq!(body["details"], "Request failed with status code 404");
}

#[tokio::test]
async fn upstream_server_error_is_not_retried() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&app.webhook)
        .await;

    let response = app.post_message(&json!({ "text": "try once" })).await;

    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn upstream_timeout_maps_to_500() {
    let app = TestApp::spawn_with_timeout(Duration::from_millis(250)).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&app.webhook)
        .await;

    let response = app.post_message(&json!({ "text": "slow" })).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["details"], "timeout of 250ms exceeded");
}

#[tokio::test]
async fn unreachable_webhook_maps_to_500() {
    // Nothing listens on port 1.
    let config = common::test_config(
        format!("http://127.0.0.1:1{}", WEBHOOK_PATH),
        Duration::from_secs(2),
    );
    let relay = Application::build(config)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", relay.port());
    tokio::spawn(async move {
        relay.run_until_stopped().await.ok();
    });

    let response = reqwest::Client::new()
        .post(format!("{}/api/slack/send", address))
        .json(&json!({ "text": "anyone there?" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    let details = body["details"].as_str().unwrap_or_default();
    assert!(!details.is_empty());
    assert!(!details.contains("XXXXXXXX"));
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/slack/send", app.address),
        )
        .header("origin", "https://standup.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
