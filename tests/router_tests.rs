use serde_json::json;
use std::sync::Arc;

use medclarify::core::models::{Outcome, Request, Response, Settings, Tag, Tone};
use medclarify::core::settings::MemorySettingsStore;
use medclarify::surfaces::background_router;
use medclarify::transport::{LocalTransport, Transport};

fn router() -> medclarify::Router {
    background_router(Arc::new(MemorySettingsStore::new())).unwrap()
}

#[test]
fn test_background_table_covers_its_tags_once() {
    let router = router();
    for tag in [
        Tag::GetSettings,
        Tag::SaveSettings,
        Tag::ProcessSimplify,
        Tag::ProcessSummarize,
        Tag::ProcessExplain,
    ] {
        assert!(router.handles(tag), "missing {tag}");
    }
    assert!(!router.handles(Tag::GetSelectedText));
    assert!(!router.handles(Tag::SimplifyText));
}

#[tokio::test]
async fn test_get_settings_without_save_returns_defaults() {
    let reply = router()
        .route_json(json!({ "action": "getSettings" }))
        .await
        .unwrap();
    assert_eq!(
        reply,
        json!({
            "enableContextMenu": true,
            "defaultAction": "simplify",
            "tone": "casual",
            "summaryLength": "short"
        })
    );
}

#[tokio::test]
async fn test_save_then_get_merges_untouched_fields() {
    let router = router();

    let ack = router
        .route_json(json!({
            "action": "saveSettings",
            "settings": { "summaryLength": "long" }
        }))
        .await
        .unwrap();
    assert_eq!(ack, json!({ "success": true }));

    router
        .route_json(json!({
            "action": "saveSettings",
            "settings": { "tone": "formal" }
        }))
        .await
        .unwrap();

    let reply = router
        .route_json(json!({ "action": "getSettings" }))
        .await
        .unwrap();
    assert_eq!(reply["tone"], "formal");
    assert_eq!(reply["summaryLength"], "long");
    assert_eq!(reply["defaultAction"], "simplify");
    assert_eq!(reply["enableContextMenu"], true);
}

#[tokio::test]
async fn test_save_with_invalid_field_still_succeeds_and_keeps_valid_ones() {
    let router = router();

    let ack = router
        .route_json(json!({
            "action": "saveSettings",
            "settings": { "tone": "shouty", "summaryLength": "long" }
        }))
        .await;
    assert_eq!(ack, Some(json!({ "success": true })));

    let reply = router
        .route_json(json!({ "action": "getSettings" }))
        .await
        .unwrap();
    assert_eq!(reply["tone"], "casual");
    assert_eq!(reply["summaryLength"], "long");
}

#[tokio::test]
async fn test_save_with_non_object_settings_writes_nothing() {
    let store = Arc::new(MemorySettingsStore::new());
    let router = background_router(store.clone()).unwrap();

    let ack = router
        .route_json(json!({ "action": "saveSettings", "settings": "everything" }))
        .await;
    assert_eq!(ack, Some(json!({ "success": true })));
    assert!(store.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_acknowledgement_tags_reply_success_only() {
    let router = router();
    for action in ["processSimplify", "processSummarize", "processExplain"] {
        let reply = router
            .route_json(json!({ "action": action, "text": "anything" }))
            .await
            .unwrap();
        assert_eq!(reply, json!({ "success": true }), "{action}");
    }
}

#[tokio::test]
async fn test_unrecognized_and_foreign_tags_get_no_reply() {
    let router = router();
    assert!(router.route_json(json!({ "action": "selfDestruct" })).await.is_none());
    assert!(
        router
            .route_json(json!({ "action": "getSelectedText" }))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_local_transport_round_trips_typed_messages() {
    let transport = LocalTransport::new(Arc::new(router()));

    let saved = transport
        .request(Request::SaveSettings {
            settings: Settings {
                tone: Tone::Formal,
                ..Settings::default()
            }
            .into(),
        })
        .await
        .unwrap();
    assert_eq!(saved, Some(Response::Outcome(Outcome::ok())));

    let settings = transport
        .request(Request::GetSettings)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(settings.as_settings().map(|s| s.tone), Some(Tone::Formal));

    let unanswered = transport.request(Request::GetSelectedText).await.unwrap();
    assert!(unanswered.is_none());
}
