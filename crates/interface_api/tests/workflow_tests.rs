//! Cross-crate workflows
//!
//! These tests wire the API, the domain services and the in-memory store
//! together the way the server binary does, with the expiry watcher running
//! next to the router.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use proptest::prelude::*;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use domain_motor::ports::mock::MockRecordStore;
use domain_motor::{ExpiryWatcher, RecordStorePort, WatcherConfig};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::{
    claim_amount_strategy, malformed_date_string_strategy, unsupported_date_string_strategy,
    DateFixtures, PolicyBuilder, ReferenceFleet,
};

async fn fleet_store() -> (Arc<MockRecordStore>, ReferenceFleet) {
    let fleet = ReferenceFleet::new();
    let store = Arc::new(
        MockRecordStore::with_records(fleet.cars(), fleet.policies.clone(), fleet.claims.clone())
            .await,
    );
    (store, fleet)
}

#[tokio::test]
async fn test_recorded_claim_appears_in_history() {
    let (store, fleet) = fleet_store().await;
    let server = TestServer::new(create_router(store.clone(), ApiConfig::default())).unwrap();
    let car = fleet.insured.id.as_uuid().to_string();

    server
        .post(&format!("/api/cars/{car}/claims"))
        .json(&json!({ "claimDate": "2025-05-20", "description": "Cracked windscreen", "amount": "450.00" }))
        .await
        .assert_status(StatusCode::CREATED);

    let history: Value = server.get(&format!("/api/cars/{car}/history")).await.json();
    let events = history.as_array().unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[2]["type"], "claim");
    assert_eq!(events[2]["description"], "Cracked windscreen");
    assert_eq!(events[2]["amount"], "450.00");
}

#[tokio::test]
async fn test_expiring_policy_notified_once_while_serving() {
    let (store, fleet) = fleet_store().await;
    let (tx, mut rx) = mpsc::channel(8);
    let watcher = Arc::new(
        ExpiryWatcher::new(store.clone(), WatcherConfig::default()).with_notifier(tx),
    );

    for _ in 0..3 {
        watcher.run_pass_on(DateFixtures::policy_end()).await.unwrap();
    }

    let notice = rx.try_recv().expect("one notice expected");
    assert_eq!(notice.car_id, fleet.insured.id);
    assert_eq!(notice.end_date, DateFixtures::policy_end());
    assert!(rx.try_recv().is_err());

    // the API still reports the last covered day as valid
    let server = TestServer::new(create_router(store, ApiConfig::default())).unwrap();
    let body: Value = server
        .get(&format!("/api/cars/{}/insurance-valid", fleet.insured.id.as_uuid()))
        .add_query_param("date", DateFixtures::policy_end().to_string())
        .await
        .json();
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_watcher_loop_runs_beside_router_and_stops() {
    let (store, fleet) = fleet_store().await;
    let today = chrono::Utc::now().date_naive();
    store
        .insert_policy(
            PolicyBuilder::new(fleet.uninsured.id)
                .covering(today - chrono::Duration::days(30), today)
                .build(),
        )
        .await;

    let config = WatcherConfig {
        interval: Duration::from_millis(20),
        ..WatcherConfig::default()
    };
    let dyn_store: Arc<dyn RecordStorePort> = store.clone();
    let watcher = Arc::new(ExpiryWatcher::new(dyn_store, config));
    let handle = watcher.start();

    let server = TestServer::new(create_router(store, ApiConfig::default())).unwrap();
    server.get("/api/cars").await.assert_status_ok();

    tokio::time::sleep(Duration::from_millis(120)).await;
    handle.shutdown().await.unwrap();

    let stats = watcher.stats();
    assert!(stats.passes >= 2);
    assert_eq!(stats.notices, 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_bad_dates_never_reach_the_store(
        raw in prop_oneof![malformed_date_string_strategy(), unsupported_date_string_strategy()],
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (store, fleet) = fleet_store().await;
            let server = TestServer::new(create_router(store.clone(), ApiConfig::default())).unwrap();

            server
                .get(&format!("/api/cars/{}/insurance-valid", fleet.insured.id.as_uuid()))
                .add_query_param("date", &raw)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(store.query_count(), 0);
        });
    }

    #[test]
    fn prop_non_negative_claims_accepted(amount in claim_amount_strategy()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (store, fleet) = fleet_store().await;
            let server = TestServer::new(create_router(store, ApiConfig::default())).unwrap();

            server
                .post(&format!("/api/cars/{}/claims", fleet.lapsed.id.as_uuid()))
                .json(&json!({ "claimDate": "2024-08-01", "description": "Generated", "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        });
    }
}
