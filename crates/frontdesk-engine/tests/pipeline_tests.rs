// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the wired pipeline: debounce -> resolve -> deliver.

use std::sync::Arc;
use std::time::Duration;

use frontdesk_config::FrontdeskConfig;
use frontdesk_core::{AttendanceMode, DeliveryHandler, ModeSource, PolicyStore};
use frontdesk_engine::build_pipeline;
use frontdesk_storage::SqlitePolicyStore;
use frontdesk_test_utils::{
    make_key, make_text_message, MockPolicyStore, RecordingDeliveryHandler,
};

fn config(window_ms: i64, max_wait_ms: Option<i64>) -> FrontdeskConfig {
    let mut config = FrontdeskConfig::default();
    config.debounce.window_ms = window_ms;
    config.debounce.max_wait_ms = max_wait_ms;
    config
}

/// The reference scenario: conversation has no override, connection policy
/// is `ai`. Three messages at t=0/2000/4000 ms with a 5000 ms window produce
/// one flush at t=9000 ms containing all three in order, delivered to the
/// AI handler with `source = global`.
#[tokio::test(start_paused = true)]
async fn burst_resolves_once_and_delivers_to_ai() {
    let store = MockPolicyStore::new()
        .with_connection_policy("t1", "c1", AttendanceMode::Ai)
        .await;
    let ai = Arc::new(RecordingDeliveryHandler::new());
    let human = Arc::new(RecordingDeliveryHandler::new());
    let pipeline = build_pipeline(
        &config(5_000, None),
        Arc::new(store),
        Arc::clone(&ai) as Arc<dyn DeliveryHandler>,
        Arc::clone(&human) as Arc<dyn DeliveryHandler>,
    );

    let key = make_key("t1", "c1", "v1");
    for (i, text) in ["Hi", "are you open?", "what are your hours?"]
        .iter()
        .enumerate()
    {
        pipeline
            .aggregator
            .enqueue(key.clone(), make_text_message(text, i as u64 * 2_000))
            .await;
        tokio::time::sleep(Duration::from_millis(2_000)).await;
    }

    // t = 6000: still inside the quiet period of the last message.
    assert_eq!(ai.delivery_count().await, 0);

    tokio::time::sleep(Duration::from_millis(3_100)).await;

    let deliveries = ai.deliveries().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(human.delivery_count().await, 0);

    let (batch, decision) = &deliveries[0];
    assert_eq!(batch.len(), 3);
    assert_eq!(
        batch.combined_text(),
        "Hi\nare you open?\nwhat are your hours?"
    );
    assert_eq!(decision.mode, AttendanceMode::Ai);
    assert_eq!(decision.source, ModeSource::Global);
}

/// Without any policy rows, batches land on the human handler.
#[tokio::test(start_paused = true)]
async fn unconfigured_connection_falls_back_to_human() {
    let ai = Arc::new(RecordingDeliveryHandler::new());
    let human = Arc::new(RecordingDeliveryHandler::new());
    let pipeline = build_pipeline(
        &config(5_000, None),
        Arc::new(MockPolicyStore::new()),
        Arc::clone(&ai) as Arc<dyn DeliveryHandler>,
        Arc::clone(&human) as Arc<dyn DeliveryHandler>,
    );

    let key = make_key("t1", "c1", "v1");
    pipeline
        .aggregator
        .enqueue(key, make_text_message("anyone there?", 0))
        .await;
    tokio::time::sleep(Duration::from_millis(5_100)).await;

    assert_eq!(ai.delivery_count().await, 0);
    let deliveries = human.deliveries().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].1.source, ModeSource::Default);
}

/// An operator taking over mid-burst: the override set while messages are
/// buffering is honored at flush time, because resolution happens on flush,
/// not on enqueue.
#[tokio::test(start_paused = true)]
async fn override_set_during_buffering_applies_at_flush() {
    let store = MockPolicyStore::new()
        .with_connection_policy("t1", "c1", AttendanceMode::Ai)
        .await;
    let ai = Arc::new(RecordingDeliveryHandler::new());
    let human = Arc::new(RecordingDeliveryHandler::new());
    let pipeline = build_pipeline(
        &config(5_000, None),
        Arc::new(store),
        Arc::clone(&ai) as Arc<dyn DeliveryHandler>,
        Arc::clone(&human) as Arc<dyn DeliveryHandler>,
    );

    let key = make_key("t1", "c1", "v1");
    pipeline
        .aggregator
        .enqueue(key.clone(), make_text_message("I want to cancel my order", 0))
        .await;

    // Operator pins the conversation to human while the batch is buffering.
    assert!(
        pipeline
            .router
            .set_conversation_override(
                &key.tenant_id,
                &key.conversation_id,
                AttendanceMode::Human
            )
            .await
    );

    tokio::time::sleep(Duration::from_millis(5_100)).await;

    assert_eq!(ai.delivery_count().await, 0);
    let deliveries = human.deliveries().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].1.source, ModeSource::Conversation);
}

/// Failed delivery is dropped, and the next turn for the same conversation
/// still flows.
#[tokio::test(start_paused = true)]
async fn failed_delivery_does_not_stall_the_conversation() {
    let store = MockPolicyStore::new()
        .with_connection_policy("t1", "c1", AttendanceMode::Ai)
        .await;
    let ai = Arc::new(RecordingDeliveryHandler::new());
    let human = Arc::new(RecordingDeliveryHandler::new());
    let pipeline = build_pipeline(
        &config(5_000, None),
        Arc::new(store),
        Arc::clone(&ai) as Arc<dyn DeliveryHandler>,
        Arc::clone(&human) as Arc<dyn DeliveryHandler>,
    );

    let key = make_key("t1", "c1", "v1");
    ai.fail_next(true);
    pipeline
        .aggregator
        .enqueue(key.clone(), make_text_message("first turn", 0))
        .await;
    tokio::time::sleep(Duration::from_millis(5_100)).await;
    assert_eq!(ai.delivery_count().await, 1);

    ai.fail_next(false);
    pipeline
        .aggregator
        .enqueue(key.clone(), make_text_message("second turn", 6_000))
        .await;
    tokio::time::sleep(Duration::from_millis(5_100)).await;

    let deliveries = ai.deliveries().await;
    assert_eq!(deliveries.len(), 2);
    assert_eq!(deliveries[1].0.combined_text(), "second turn");
}

/// Full pipeline over the SQLite store: policy row written through the
/// router is honored on the next flush.
#[tokio::test(start_paused = true)]
async fn sqlite_backed_pipeline_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pipeline.db");

    let mut cfg = config(5_000, None);
    cfg.storage.database_path = db_path.to_string_lossy().into_owned();

    let store = Arc::new(SqlitePolicyStore::new(cfg.storage.clone()));
    store.initialize().await.unwrap();

    let ai = Arc::new(RecordingDeliveryHandler::new());
    let human = Arc::new(RecordingDeliveryHandler::new());
    let pipeline = build_pipeline(
        &cfg,
        Arc::clone(&store) as Arc<dyn PolicyStore>,
        Arc::clone(&ai) as Arc<dyn DeliveryHandler>,
        Arc::clone(&human) as Arc<dyn DeliveryHandler>,
    );

    let key = make_key("t1", "c1", "v1");
    assert!(
        pipeline
            .router
            .set_connection_policy(&key.tenant_id, &key.connection_id, AttendanceMode::Ai)
            .await
    );

    pipeline
        .aggregator
        .enqueue(key, make_text_message("hello", 0))
        .await;
    tokio::time::sleep(Duration::from_millis(5_100)).await;

    assert_eq!(ai.delivery_count().await, 1);
    assert_eq!(human.delivery_count().await, 0);

    store.close().await.unwrap();
}
