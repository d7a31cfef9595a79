//! API integration tests
//!
//! Need a running server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_filter_options() {
    let client = Client::new();

    let response = client
        .get(format!("{}/alternatives/filter-options", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["classroom_types"].is_array());
    assert!(body["equipment_types"].is_array());
    assert!(body["software"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_check_unknown_time_slot() {
    let client = Client::new();

    let response = client
        .post(format!("{}/availability/check", BASE_URL))
        .json(&json!({
            "classroom_id": Uuid::new_v4(),
            "time_slot_id": Uuid::new_v4(),
            "semester_id": Uuid::new_v4(),
            "weeks": { "kind": "full_semester" }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_check_empty_weeks_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/availability/check", BASE_URL))
        .json(&json!({
            "classroom_id": Uuid::new_v4(),
            "time_slot_id": Uuid::new_v4(),
            "semester_id": Uuid::new_v4(),
            "weeks": { "kind": "weeks", "weeks": [] }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_search_negative_capacity_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/alternatives/search", BASE_URL))
        .json(&json!({
            "time_slot_id": Uuid::new_v4(),
            "semester_id": Uuid::new_v4(),
            "weeks": { "kind": "full_semester" },
            "min_capacity": -5
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_occupancy_unknown_classroom() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/classrooms/{}/occupancy?semester_id={}",
            BASE_URL,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
