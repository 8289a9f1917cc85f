#![allow(clippy::unwrap_used)]
// Integration tests for `RegistryClient` against a mocked add-on.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use enoman_api::{ManagerClient, TransportConfig};
use enoman_core::{
    CoreError, Device, DeviceKey, EditorState, EmitterKind, FormFields, HaType, LightSender,
    OutputPaths, RegistryClient, suggest_channels,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RegistryClient) {
    let server = MockServer::start().await;
    let api = ManagerClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, RegistryClient::with_api(api))
}

fn device_json(id: &str, label: &str) -> serde_json::Value {
    json!({ "id_hex": id, "label": label, "ha_type": "switch", "channels": [] })
}

async fn mount_devices(server: &MockServer, devices: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })))
        .mount(server)
        .await;
}

// ── list / get ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_replaces_cache() {
    let (server, client) = setup().await;
    mount_devices(
        &server,
        json!({ "FFAABBCC": device_json("FFAABBCC", "Panel") }),
    )
    .await;

    let registry = client.list().await.unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(client.cache().version(), 1);
    assert!(client.snapshot().contains(&DeviceKey::new("ffaabbcc")));
}

#[tokio::test]
async fn test_empty_registry_is_not_an_error() {
    let (server, client) = setup().await;
    mount_devices(&server, json!({})).await;

    let registry = client.list().await.unwrap();
    assert!(registry.is_empty());
    assert_eq!(client.cache().version(), 1);
}

#[tokio::test]
async fn test_failed_list_leaves_cache_untouched() {
    let (server, client) = setup().await;
    mount_devices(&server, json!({ "01020304": device_json("01020304", "Hall") })).await;
    client.list().await.unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    assert!(client.list().await.is_err());
    assert_eq!(client.snapshot().len(), 1);
    assert_eq!(client.cache().version(), 1);
}

#[tokio::test]
async fn test_get_missing_device_is_not_found() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/devices/DEADBEEF"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found" })))
        .mount(&server)
        .await;

    let err = client.get(&DeviceKey::new(" deadbeef ")).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { key } if key == "DEADBEEF"));
}

#[tokio::test]
async fn test_get_loads_editor() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/devices/FFAABBCC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_hex": "FFAABBCC",
            "label": "Panel",
            "ha_type": "switch",
            "eep": "D2-01-12",
            "channels": [
                { "channel": 0, "label": "" },
                { "channel": 1, "label": "Right", "emitter": { "id": "FFC43886" } }
            ]
        })))
        .mount(&server)
        .await;

    let device = client.get(&DeviceKey::new("FFAABBCC")).await.unwrap();
    assert_eq!(
        device.channels[1].emitter.as_ref().map(|e| e.kind),
        Some(EmitterKind::BinarySensor)
    );

    let editor = EditorState::load(&device);
    assert_eq!(editor.target(), Some(&DeviceKey::new("FFAABBCC")));
    assert_eq!(editor.fields().get("channels.0.label"), Some("Channel 0"));
}

// ── upsert ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upsert_from_form_posts_and_refreshes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .and(body_partial_json(json!({
            "id_hex": "FFAABBCC",
            "ha_type": "switch",
            "channels": [
                { "channel": 0, "label": "Canal 0" },
                { "channel": 1, "label": "", "emitter": { "id": "abc", "kind": "binary_sensor" } }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": {} })))
        .expect(1)
        .mount(&server)
        .await;
    mount_devices(&server, json!({ "FFAABBCC": device_json("FFAABBCC", "Panel") })).await;

    let fields: FormFields = [
        ("id_hex", "ffaabbcc"),
        ("label", "Panel"),
        ("channels.0.channel", "0"),
        ("channels.0.label", "Canal 0"),
        ("channels.1.channel", "1"),
        ("channels.1.emitter.id", "abc"),
    ]
    .into_iter()
    .collect();
    let mut editor = EditorState::new();
    editor.overlay(&fields);
    let device = editor.submit().unwrap();

    let registry = client.upsert(&device).await.unwrap();
    assert!(registry.contains(&DeviceKey::new("FFAABBCC")));
}

#[tokio::test]
async fn test_invalid_device_is_never_sent() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let device = EditorState::new().submit().unwrap();
    let err = client.upsert(&device).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { field, .. } if field == "id_hex"));
}

#[tokio::test]
async fn test_device_with_foreign_substructure_is_never_sent() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let device = Device {
        id_hex: "FFAABBCC".into(),
        ha_type: HaType::Switch,
        light_sender: Some(LightSender {
            sender_id: "FF000001".into(),
        }),
        ..Device::default()
    };
    let err = client.upsert(&device).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { field, .. } if field == "light_sender"));
}

#[tokio::test]
async fn test_save_persisted_but_refresh_failed_is_success() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let device = Device {
        id_hex: "FFAABBCC".into(),
        ..Device::default()
    };
    let registry = client.upsert(&device).await.unwrap();
    assert!(registry.is_empty());
    assert_eq!(client.cache().version(), 0);
}

#[tokio::test]
async fn test_rejected_save_surfaces_body_and_keeps_cache() {
    let (server, client) = setup().await;
    mount_devices(&server, json!({ "01020304": device_json("01020304", "Hall") })).await;
    client.list().await.unwrap();

    let body = r#"{"detail":"registry is read-only"}"#;
    Mock::given(method("POST"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string(body))
        .mount(&server)
        .await;

    let snapshot = client.snapshot();
    let (_, stored) = snapshot.iter().next().unwrap();
    let device = EditorState::load(stored).submit().unwrap();
    let err = client.upsert(&device).await.unwrap_err();
    match err {
        CoreError::RemoteFailure {
            operation,
            status,
            detail,
        } => {
            assert_eq!(operation, "save");
            assert_eq!(status, Some(500));
            assert_eq!(detail, body);
        }
        other => panic!("expected RemoteFailure, got {other:?}"),
    }
    assert_eq!(client.cache().version(), 1);
}

// ── delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_unknown_key_succeeds() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/devices/NOPE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_devices(&server, json!({ "01020304": device_json("01020304", "Hall") })).await;

    let registry = client.delete(&DeviceKey::new("nope")).await.unwrap();
    assert!(!registry.contains(&DeviceKey::new("NOPE")));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_delete_refreshes_cache() {
    let (server, client) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/devices/01020304"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": {} })))
        .expect(1)
        .mount(&server)
        .await;
    mount_devices(&server, json!({})).await;

    let registry = client.delete(&DeviceKey::new("01020304")).await.unwrap();
    assert!(registry.is_empty());
}

// ── import / export ─────────────────────────────────────────────────

#[tokio::test]
async fn test_import_then_list_reflects_post_import_store() {
    let (server, client) = setup().await;

    mount_devices(
        &server,
        json!({
            "AAAAAAAA": device_json("AAAAAAAA", "Old"),
            "BBBBBBBB": device_json("BBBBBBBB", "Kept")
        }),
    )
    .await;
    client.list().await.unwrap();
    assert_eq!(client.snapshot().len(), 2);

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "imported": 2 })))
        .expect(1)
        .mount(&server)
        .await;
    mount_devices(
        &server,
        json!({
            "BBBBBBBB": device_json("BBBBBBBB", "Kept"),
            "CCCCCCCC": device_json("CCCCCCCC", "New")
        }),
    )
    .await;

    let outcome = client.import_all().await.unwrap();
    assert_eq!(outcome.imported_count, 2);

    let registry = client.list().await.unwrap();
    let keys: Vec<_> = registry.keys().map(DeviceKey::as_str).collect();
    assert_eq!(keys, ["BBBBBBBB", "CCCCCCCC"]);
}

#[tokio::test]
async fn test_import_not_ok_is_remote_failure() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": false })))
        .mount(&server)
        .await;

    let err = client.import_all().await.unwrap_err();
    assert!(matches!(err, CoreError::RemoteFailure { operation, .. } if operation == "import"));
    assert_eq!(client.cache().version(), 0);
}

#[tokio::test]
async fn test_export_returns_paths() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "auto_output": "/config/packages/enocean_auto.yaml",
            "config_output": "/config/enocean_yaml_config.yaml"
        })))
        .mount(&server)
        .await;

    let outcome = client.export_all().await.unwrap();
    assert_eq!(outcome.auto_output_path, "/config/packages/enocean_auto.yaml");
    assert_eq!(outcome.config_output_path, "/config/enocean_yaml_config.yaml");
}

// ── Degraded lookups ────────────────────────────────────────────────

#[tokio::test]
async fn test_paths_fall_back_to_defaults() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/paths"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    assert_eq!(client.paths().await, OutputPaths::default());
}

#[tokio::test]
async fn test_profiles_feed_local_suggestions() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/eep"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": [
                { "eep": "F6-02-01", "title": "Rocker", "channel_min": 1, "channel_max": 4 },
                { "eep": "A5-02-05" }
            ]
        })))
        .mount(&server)
        .await;

    let catalog = client.profiles().await;
    assert_eq!(catalog.len(), 2);
    assert_eq!(suggest_channels(&catalog, "F6-02-01").numbers(), [1, 2, 3, 4]);
    assert!(suggest_channels(&catalog, "A5-02-05").is_empty());
}

#[tokio::test]
async fn test_profiles_degrade_to_empty() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/eep"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(client.profiles().await.is_empty());
}

#[tokio::test]
async fn test_remote_suggestion() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/suggest/channels"))
        .and(query_param("eep", "D2-01-12"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "eep": "D2-01-12", "channels": [0, 1] })),
        )
        .mount(&server)
        .await;

    let suggestion = client.suggest_channels_remote("D2-01-12").await.unwrap();
    assert_eq!(suggestion.numbers(), [0, 1]);
    assert_eq!(suggestion.channels[1].label, "Channel 1");
}
