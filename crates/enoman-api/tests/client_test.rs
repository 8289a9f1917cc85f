#![allow(clippy::unwrap_used)]
// Integration tests for `ManagerClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use enoman_api::types::{ChannelRecord, DeviceRecord, EmitterRecord};
use enoman_api::{Error, ManagerClient};

// ── Helpers ─────────────────────────────────────────────────────────

const PREFIX: &str = "/api/hassio_ingress/abc";

/// Client mounted behind an ingress-style prefix, addressed through its
/// index page the way a browser would land on it.
async fn setup() -> (MockServer, ManagerClient) {
    let server = MockServer::start().await;
    let base = format!("{}{PREFIX}/index.html", server.uri());
    let client = ManagerClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("{PREFIX}/api/{suffix}")
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_under_prefix() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("devices")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": {
                "FFAABBCC": {
                    "id_hex": "FFAABBCC",
                    "label": "Kitchen",
                    "ha_type": "light",
                    "eep": "A5-38-08",
                    "channels": [{ "channel": 0, "label": "Ceiling" }],
                    "light_sender": { "sender_id": "FF000001" }
                },
                "01020304": {
                    "id_hex": "01020304",
                    "label": "Hall",
                    "ha_type": "switch"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.list_devices().await.unwrap();
    let keys: Vec<_> = resp.devices.keys().map(String::as_str).collect();
    assert_eq!(keys, ["FFAABBCC", "01020304"]);

    let kitchen = &resp.devices["FFAABBCC"];
    assert_eq!(kitchen.ha_type, "light");
    assert_eq!(kitchen.channels.len(), 1);
    assert_eq!(
        kitchen.light_sender.as_ref().map(|s| s.sender_id.as_str()),
        Some("FF000001")
    );
}

#[tokio::test]
async fn test_get_device_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("devices/DEADBEEF")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Device not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_device("DEADBEEF").await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got: {err:?}");
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Device not found"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_upsert_posts_device_body() {
    let (server, client) = setup().await;

    let record = DeviceRecord {
        id_hex: "FFAABBCC".into(),
        label: "Panel".into(),
        ha_type: "switch".into(),
        eep: Some("F6-02-01".into()),
        channels: vec![ChannelRecord {
            channel: 1,
            label: "Left".into(),
            emitter: Some(EmitterRecord {
                id: "FFAABBCD".into(),
                kind: Some("binary_sensor".into()),
                label: None,
            }),
        }],
        ..DeviceRecord::default()
    };

    Mock::given(method("POST"))
        .and(path(api_path("devices")))
        .and(body_json(json!({
            "id_hex": "FFAABBCC",
            "label": "Panel",
            "ha_type": "switch",
            "eep": "F6-02-01",
            "channels": [{
                "channel": 1,
                "label": "Left",
                "emitter": { "id": "FFAABBCD", "kind": "binary_sensor" }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.upsert_device(&record).await.unwrap();
}

#[tokio::test]
async fn test_upsert_validation_error_keeps_body() {
    let (server, client) = setup().await;

    let body = r#"{"detail":[{"loc":["body","id_hex"],"msg":"field required"}]}"#;
    Mock::given(method("POST"))
        .and(path(api_path("devices")))
        .respond_with(ResponseTemplate::new(422).set_body_string(body))
        .mount(&server)
        .await;

    let err = client
        .upsert_device(&DeviceRecord::default())
        .await
        .unwrap_err();
    match err {
        Error::Api { status, body: got } => {
            assert_eq!(status, 422);
            assert_eq!(got, body);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_device() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("devices/FFAABBCC")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_device("FFAABBCC").await.unwrap();
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(api_path("devices/FFAABBCC")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.delete_device("FFAABBCC").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    match err {
        Error::Api { body, .. } => assert!(body.starts_with("503"), "body: {body}"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Profiles ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_profiles() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("eep")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": [
                { "eep": "F6-02-01", "title": "Rocker switch", "channel_min": 0, "channel_max": 3 },
                { "eep": "A5-02-05" }
            ]
        })))
        .mount(&server)
        .await;

    let resp = client.list_profiles().await.unwrap();
    assert_eq!(resp.profiles.len(), 2);
    assert_eq!(resp.profiles[0].channel_max, Some(3));
    assert_eq!(resp.profiles[1].title, None);
}

#[tokio::test]
async fn test_suggest_channels_sends_eep_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("suggest/channels")))
        .and(query_param("eep", "F6-02-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "eep": "F6-02-01",
            "channels": [0, 1, 2, 3]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.suggest_channels("F6-02-01").await.unwrap();
    assert_eq!(resp.channels, [0, 1, 2, 3]);
}

// ── Import / export ─────────────────────────────────────────────────

#[tokio::test]
async fn test_export_and_import() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("export")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "auto_output": "/config/packages/enocean_auto.yaml",
            "config_output": "/config/enocean_yaml_config.yaml"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("import")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "imported": 4 })))
        .mount(&server)
        .await;

    let export = client.export().await.unwrap();
    assert!(export.ok);
    assert_eq!(
        export.auto_output.as_deref(),
        Some("/config/packages/enocean_auto.yaml")
    );

    let import = client.import().await.unwrap();
    assert!(import.ok);
    assert_eq!(import.imported, Some(4));
}

#[tokio::test]
async fn test_paths() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("paths")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "auto_output_path": "/config/packages/enocean_auto.yaml",
            "config_output_path": "/config/enocean_yaml_config.yaml"
        })))
        .mount(&server)
        .await;

    let paths = client.paths().await.unwrap();
    assert_eq!(paths.config_output_path, "/config/enocean_yaml_config.yaml");
    assert!(paths.auto_backup_path.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("devices")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client.list_devices().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>login</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_multibyte_body_is_deserialization_error() {
    let (server, client) = setup().await;

    // `é` straddles the 200-byte mark.
    let page = format!("{}é{}", "a".repeat(199), "x".repeat(50));
    Mock::given(method("GET"))
        .and(path(api_path("devices")))
        .respond_with(ResponseTemplate::new(200).set_body_string(page.clone()))
        .mount(&server)
        .await;

    let err = client.list_devices().await.unwrap_err();
    match err {
        Error::Deserialization { message, body } => {
            assert_eq!(body, page);
            assert!(message.contains("body preview"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
