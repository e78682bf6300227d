//! API integration tests.
//!
//! These run against a live server with a clean database:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a category and return its id
async fn create_category(client: &Client, body: Value) -> String {
    let response = client
        .post(format!("{}/categories", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse category");
    body["id"].as_str().expect("No category id").to_string()
}

/// Create an asset in the given category and return its id
async fn create_asset(client: &Client, category_id: &str, cost: f64) -> String {
    let response = client
        .post(format!("{}/assets", BASE_URL))
        .json(&json!({
            "name": "Test Laptop",
            "category_id": category_id,
            "purchase_date": "2026-01-10",
            "purchase_cost": cost,
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to create asset");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse asset");
    body["id"].as_str().expect("No asset id").to_string()
}

/// Create an employee and return their id
async fn create_employee(client: &Client, email: &str) -> String {
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .json(&json!({
            "name": "Test Employee",
            "email": email,
            "department": "Engineering"
        }))
        .send()
        .await
        .expect("Failed to create employee");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse employee");
    body["id"].as_str().expect("No employee id").to_string()
}

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
async fn test_assign_and_unassign_round_trip() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({"name": format!("roundtrip-{}", std::process::id())}),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 1200.0).await;
    let employee_id = create_employee(
        &client,
        &format!("roundtrip-{}@example.com", std::process::id()),
    )
    .await;

    // Assign with no duration: expected return defaults to +365 days
    let response = client
        .post(format!("{}/assignment-history/assign", BASE_URL))
        .json(&json!({"asset_id": asset_id, "employee_id": employee_id}))
        .send()
        .await
        .expect("Failed to assign");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "assigned");
    assert_eq!(body["asset"]["has_active_assignment"], true);
    assert_eq!(body["asset"]["status"], "assigned");
    assert_eq!(body["asset"]["current_assignee_id"], employee_id.as_str());
    assert!(body["asset"]["expected_return_date"].is_string());
    let assignment_id = body["assignment_id"].as_str().unwrap().to_string();

    // The employee view must show the asset
    let response = client
        .get(format!("{}/employees/{}/assets", BASE_URL, employee_id))
        .send()
        .await
        .expect("Failed to fetch employee assets");
    let assets: Value = response.json().await.unwrap();
    assert_eq!(assets.as_array().unwrap().len(), 1);
    assert_eq!(assets[0]["id"], asset_id.as_str());

    // Unassign restores availability and empties the employee view
    let response = client
        .post(format!("{}/assignment-history/unassign", BASE_URL))
        .json(&json!({"assignment_id": assignment_id}))
        .send()
        .await
        .expect("Failed to unassign");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "returned");
    assert_eq!(body["asset"]["status"], "available");
    assert_eq!(body["asset"]["has_active_assignment"], false);

    let response = client
        .get(format!("{}/employees/{}/assets", BASE_URL, employee_id))
        .send()
        .await
        .unwrap();
    let assets: Value = response.json().await.unwrap();
    assert_eq!(assets.as_array().unwrap().len(), 0);

    // A second unassign of the same episode must be rejected
    let response = client
        .post(format!("{}/assignment-history/unassign", BASE_URL))
        .json(&json!({"assignment_id": assignment_id}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_single_assignment_policy_conflict() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({
            "name": format!("single-{}", std::process::id()),
            "allow_multiple_assignments": false
        }),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 500.0).await;
    let first = create_employee(
        &client,
        &format!("first-{}@example.com", std::process::id()),
    )
    .await;
    let second = create_employee(
        &client,
        &format!("second-{}@example.com", std::process::id()),
    )
    .await;

    let response = client
        .post(format!("{}/assignment-history/assign", BASE_URL))
        .json(&json!({"asset_id": asset_id, "employee_id": first}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Second assign must fail and leave the first assignee in place
    let response = client
        .post(format!("{}/assignment-history/assign", BASE_URL))
        .json(&json!({"asset_id": asset_id, "employee_id": second}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    let response = client
        .get(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["current_assignee_id"], first.as_str());
}

#[tokio::test]
#[ignore]
async fn test_assign_missing_ids() {
    let client = Client::new();

    let response = client
        .post(format!("{}/assignment-history/assign", BASE_URL))
        .json(&json!({"asset_id": "", "employee_id": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/assignment-history/assign", BASE_URL))
        .json(&json!({"asset_id": "AST-00000000", "employee_id": "EMP-00000000"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_analytics_assets_include_new_purchase() {
    let client = Client::new();
    let category_name = format!("analytics-{}", std::process::id());
    let category_id = create_category(&client, json!({"name": category_name})).await;
    let _asset_id = create_asset(&client, &category_id, 1000.0).await;

    let response = client
        .get(format!("{}/analytics/assets?time_frame=year", BASE_URL))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();

    let categories = body["categories"].as_array().unwrap();
    let entry = categories
        .iter()
        .find(|c| c["category_id"] == category_id.as_str())
        .expect("category missing from analytics");
    assert!(entry["count"].as_i64().unwrap() >= 1);
    assert!(entry["total_value"].as_f64().unwrap() >= 1000.0);

    // Age-bucket percentages must sum to 100 (±0.1) when assets exist
    let buckets = body["age_distribution"].as_array().unwrap();
    assert_eq!(buckets.len(), 5);
    let total: i64 = buckets.iter().map(|b| b["count"].as_i64().unwrap()).sum();
    let sum: f64 = buckets
        .iter()
        .map(|b| b["percentage"].as_f64().unwrap())
        .sum();
    if total > 0 {
        assert!((sum - 100.0).abs() <= 0.1, "percentages sum to {}", sum);
    } else {
        assert_eq!(sum, 0.0);
    }

    // Pagination contract on the acquisition buckets
    let acq = &body["acquisitions"];
    let limit = acq["limit"].as_i64().unwrap();
    let total_months = acq["total_months"].as_i64().unwrap();
    let expected_pages = (total_months + limit - 1) / limit;
    assert_eq!(acq["total_pages"].as_i64().unwrap(), expected_pages.max(0));
}

#[tokio::test]
#[ignore]
async fn test_maintenance_requires_category_policy() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({
            "name": format!("nomaint-{}", std::process::id()),
            "requires_maintenance": false
        }),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 300.0).await;

    let response = client
        .post(format!("{}/maintenance-history/request", BASE_URL))
        .json(&json!({"asset_id": asset_id, "maintenance_type": "repair"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);

    // The asset status must be unchanged
    let response = client
        .get(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_maintenance_cycle_schedules_next_date() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({
            "name": format!("maint-{}", std::process::id()),
            "requires_maintenance": true,
            "maintenance_frequency": "6 months"
        }),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 800.0).await;

    let response = client
        .post(format!("{}/maintenance-history/request", BASE_URL))
        .json(&json!({"asset_id": asset_id, "maintenance_type": "inspection"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "maintenance_requested");
    let maintenance_id = body["maintenance_history"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .post(format!("{}/maintenance-history/update", BASE_URL))
        .json(&json!({
            "asset_id": asset_id,
            "maintenance_id": maintenance_id,
            "condition_after": "excellent",
            "cost": 120.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "available");
    assert_eq!(body["is_operational"], true);
    assert!(body["next_maintenance_date"].is_string());
    assert_eq!(body["maintenance_history"][0]["status"], "completed");
}

#[tokio::test]
#[ignore]
async fn test_rejection_blocks_approval_effect() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({
            "name": format!("approval-{}", std::process::id()),
            "requires_maintenance": true
        }),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 2000.0).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "requestor": "alice",
            "approvers": ["bob", "carol"],
            "details": {"type": "maintenance_approval", "asset_id": asset_id}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let request_id = body["id"].as_str().unwrap().to_string();

    // One approval keeps the request pending
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({"approver": "bob", "status": "approved"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "pending");

    // A single rejection resolves the request as rejected
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({"approver": "carol", "status": "rejected"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "rejected");

    // The asset must NOT have been placed under maintenance
    let response = client
        .get(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "available");

    // Deciding on a resolved request is a conflict
    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({"approver": "bob", "status": "rejected"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_approved_maintenance_request_applies_effect() {
    let client = Client::new();
    let category_id = create_category(
        &client,
        json!({
            "name": format!("effect-{}", std::process::id()),
            "requires_maintenance": true
        }),
    )
    .await;
    let asset_id = create_asset(&client, &category_id, 1500.0).await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .json(&json!({
            "requestor": "alice",
            "approvers": ["bob"],
            "details": {"type": "maintenance_approval", "asset_id": asset_id}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let request_id = body["id"].as_str().unwrap().to_string();

    let response = client
        .put(format!("{}/requests/{}", BASE_URL, request_id))
        .json(&json!({"approver": "bob", "status": "approved"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "approved");

    let response = client
        .get(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "under_maintenance");
}

#[tokio::test]
#[ignore]
async fn test_employee_analytics_pagination() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/analytics/employees?limit=5&sort_by=value&sort_order=desc",
            BASE_URL
        ))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();

    assert!(body["employees"].as_array().unwrap().len() <= 5);
    let total = body["total_count"].as_i64().unwrap();
    let limit = body["limit"].as_i64().unwrap();
    assert_eq!(limit, 5);
    assert_eq!(
        body["total_pages"].as_i64().unwrap(),
        (total + limit - 1) / limit
    );
}
