//! Webhook delivery tests against a mock HTTP server.

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use runbeacon_config::DeliveryConfig;
use runbeacon_report::{DeliveryError, SlackNotifier, SlackPayload};

fn config_for(server: &MockServer) -> DeliveryConfig {
    DeliveryConfig {
        webhook_url: format!("{}/services/T0/B0/XX", server.uri()).parse().unwrap(),
        channel: Some("#ops".to_string()),
        botname: Some("puppet".to_string()),
        icon_url: None,
        puppetboard_url: None,
    }
}

fn payload(config: &DeliveryConfig) -> SlackPayload {
    SlackPayload::new(config, ":sparkles: Puppet run by node1 changed.".to_string())
}

#[tokio::test]
async fn delivery_posts_one_urlencoded_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/T0/B0/XX"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("payload="))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    SlackNotifier::new()
        .deliver(&config, &payload(&config))
        .await
        .unwrap();
}

#[tokio::test]
async fn form_payload_field_carries_the_json_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    SlackNotifier::new()
        .deliver(&config, &payload(&config))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let (_, json) = url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "payload")
        .unwrap();

    let document: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(document["channel"], "#ops");
    assert_eq!(document["username"], "puppet");
    assert_eq!(document["icon_url"], serde_json::Value::Null);
    assert_eq!(
        document["text"],
        ":sparkles: Puppet run by node1 changed."
    );
}

#[tokio::test]
async fn non_success_status_surfaces_after_exactly_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let err = SlackNotifier::new()
        .deliver(&config, &payload(&config))
        .await
        .unwrap_err();

    match err {
        DeliveryError::Api { status } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
}
