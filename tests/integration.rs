//! Integration tests for the CAO wage engine.
//!
//! This test suite runs against the CAO VVT reference data in
//! `config/cao_vvt` and covers:
//! - Forward lookup through rate changes
//! - Reverse lookup (exact, between steps, hourly basis, compliance)
//! - Progression projection
//! - Timeline assembly from one and several sources
//! - Error responses

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use cao_engine::api::{AppState, create_router};
use cao_engine::config::{ConfigLoader, WageTableStore};
use cao_engine::models::{ChangeEventType, EmploymentRecord, EventSource, RecordSource};
use cao_engine::resolution::{get_progression, resolve_forward};
use cao_engine::timeline::{build_merged_timeline, build_timeline};

// =============================================================================
// Test Helpers
// =============================================================================

const CONFIG_DIR: &str = "./config/cao_vvt";

fn create_test_state() -> AppState {
    let config = ConfigLoader::load(CONFIG_DIR).expect("Failed to load config");
    AppState::new(config, CONFIG_DIR)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn decimal_at(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal should serialize as a string"))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(create_router_for_test(), request).await
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(create_router_for_test(), request).await
}

fn record(id: &str, start: &str, end: Option<&str>, salaries: Vec<Value>) -> Value {
    json!({
        "id": id,
        "employer": "Zorggroep Noord",
        "job_title": "Verzorgende IG",
        "start_date": start,
        "end_date": end,
        "salary_entries": salaries,
    })
}

fn salary(start: &str, hourly: &str) -> Value {
    json!({ "start_date": start, "hourly_wage": hourly })
}

// =============================================================================
// Forward lookup
// =============================================================================

#[tokio::test]
async fn test_forward_lookup_uses_row_in_force() {
    let (status, body) = post(
        "/wages/forward",
        json!({ "scale": 6, "step": 2, "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["effective_date"], "2024-07-01");
    assert_eq!(decimal_at(&body["wage"]["monthly_wage"]), decimal("2616.20"));
    assert_eq!(decimal_at(&body["wage"]["hourly_wage"]), decimal("16.77"));
    assert_eq!(decimal_at(&body["wage"]["yearly_wage"]), decimal("31394.40"));
}

#[tokio::test]
async fn test_forward_lookup_on_effective_date_takes_new_row() {
    let (status, body) = post(
        "/wages/forward",
        json!({ "scale": 6, "step": 2, "as_of": "2025-01-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["effective_date"], "2025-01-01");
    assert_eq!(decimal_at(&body["wage"]["monthly_wage"]), decimal("2676.20"));
}

#[tokio::test]
async fn test_forward_lookup_before_known_data_is_range_error() {
    let (status, body) = post(
        "/wages/forward",
        json!({ "scale": 6, "step": 2, "as_of": "2023-06-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "OUT_OF_RANGE");
    assert!(body["message"].as_str().unwrap().contains("2024-01-01"));
}

#[tokio::test]
async fn test_forward_lookup_unknown_scale_is_404() {
    let (status, body) = post(
        "/wages/forward",
        json!({ "scale": 45, "step": 0, "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCALE_NOT_FOUND");
}

// =============================================================================
// Reverse lookup
// =============================================================================

#[tokio::test]
async fn test_reverse_lookup_exact_salary() {
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "2616.20", "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scale"], 6);
    assert_eq!(body["scale_name"], "Schaal 6");
    assert_eq!(body["exact_step"], 2);
    assert_eq!(body["nearest_step"], 2);
    assert_eq!(decimal_at(&body["confidence_score"]), Decimal::ONE_HUNDRED);
    assert_eq!(body["confidence_tier"], "high");
    assert_eq!(body["compliance_status"], "compliant");
    assert_eq!(body["basis"], "monthly");
}

#[tokio::test]
async fn test_reverse_lookup_between_steps() {
    // 35.90 above scale 6 step 1, 36.20 below step 2
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "2580.00", "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scale"], 6);
    assert!(body["exact_step"].is_null());
    assert_eq!(body["nearest_step"], 1);
    assert_eq!(decimal_at(&body["salary_difference"]), decimal("35.90"));
    assert_eq!(decimal_at(&body["confidence_score"]), decimal("86.09"));
    assert_eq!(body["confidence_tier"], "medium");
    assert_eq!(body["compliance_status"], "over_cao");

    let alternatives = body["alternative_matches"].as_array().unwrap();
    assert_eq!(alternatives.len(), 3);
    assert_eq!(alternatives[0]["scale"], 6);
    assert_eq!(alternatives[0]["step"], 2);
    let scores: Vec<Decimal> = alternatives
        .iter()
        .map(|m| decimal_at(&m["confidence_score"]))
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_reverse_lookup_on_hourly_basis() {
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "16.77", "as_of": "2024-08-15", "basis": "hourly" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scale"], 6);
    assert_eq!(body["exact_step"], 2);
    assert_eq!(decimal_at(&body["matched_wage"]), decimal("16.77"));
}

#[tokio::test]
async fn test_reverse_lookup_below_cao() {
    // 27.80 below scale 5 step 1, outside the 1% band
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "2300.00", "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scale"], 5);
    assert_eq!(body["nearest_step"], 1);
    assert_eq!(decimal_at(&body["salary_difference"]), decimal("-27.80"));
    assert_eq!(body["compliance_status"], "under_cao");
}

#[tokio::test]
async fn test_reverse_lookup_before_known_data_has_no_candidates() {
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "2500.00", "as_of": "2023-12-31" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_CANDIDATES");
}

#[tokio::test]
async fn test_reverse_lookup_negative_salary_is_input_error() {
    let (status, body) = post(
        "/wages/reverse",
        json!({ "salary": "-10", "as_of": "2024-08-15" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "AMBIGUOUS_INPUT");
}

// =============================================================================
// Scales and progression
// =============================================================================

#[tokio::test]
async fn test_available_steps_before_data_is_empty() {
    let (status, body) = get("/scales/6/steps?as_of=2023-06-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"], json!([]));
}

#[tokio::test]
async fn test_progression_projects_next_raise() {
    let (status, body) = get("/scales/6/steps/2/progression?as_of=2024-08-15").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_array().unwrap().len(), 3);
    assert_eq!(body["current"]["effective_date"], "2024-07-01");
    assert_eq!(body["next_scheduled"]["effective_date"], "2025-01-01");
    assert_eq!(
        decimal_at(&body["next_scheduled"]["wage"]["monthly_wage"]),
        decimal("2676.20")
    );
    assert_eq!(
        decimal_at(&body["increase_to_next"]["monthly_wage"]),
        decimal("60.00")
    );
    assert_eq!(body["next_step"]["step_number"], 3);
    assert_eq!(
        decimal_at(&body["next_step"]["wage"]["monthly_wage"]),
        decimal("2688.30")
    );
}

#[tokio::test]
async fn test_progression_of_top_step_has_no_next_step() {
    let (status, body) = get("/scales/8/steps/3/progression?as_of=2025-02-01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["next_step"].is_null());
    assert!(body["next_scheduled"].is_null());
    assert_eq!(body["current"]["effective_date"], "2025-01-01");
}

#[test]
fn test_progression_percent_increase_follows_table() {
    let config = ConfigLoader::load(CONFIG_DIR).unwrap();

    let points = get_progression(config.table(), 6, 2).unwrap();

    assert_eq!(points[1].percent_increase, Some(decimal("3.00")));
    assert_eq!(
        points[2].increase_from_previous.unwrap().monthly_wage,
        decimal("60.00")
    );
}

// =============================================================================
// Timeline
// =============================================================================

#[tokio::test]
async fn test_timeline_orders_days_newest_first() {
    let (status, body) = post(
        "/timeline",
        json!({
            "records": [
                record("contract_001", "2021-03-01", Some("2022-02-28"), vec![salary("2021-03-01", "18.00")]),
                record("contract_002", "2022-03-01", None, vec![
                    salary("2022-03-01", "19.00"),
                    salary("2023-03-01", "19.95"),
                ]),
            ],
            "now": "2024-05-15"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let days = body["days"].as_array().unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    assert_eq!(
        dates,
        vec!["2023-03-01", "2022-03-01", "2022-02-28", "2021-03-01"]
    );

    let raise = &days[0]["events"][0];
    assert_eq!(raise["event_type"], "salary_change");
    assert_eq!(decimal_at(&raise["percent_change"]), decimal("5.00"));
    assert_eq!(raise["is_current"], true);

    assert_eq!(body["summary"]["active_count"], 1);
    assert_eq!(
        body["summary"]["total_span_text"],
        "3 years, 2 months, 14 days"
    );
    assert_eq!(body["warnings"], json!([]));
}

#[tokio::test]
async fn test_timeline_external_conflict_loses_to_contract() {
    let (status, body) = post(
        "/timeline",
        json!({
            "records": [
                record("contract_001", "2022-03-01", None, vec![salary("2022-03-01", "19.00")]),
            ],
            "external_sources": [
                {
                    "name": "upload",
                    "records": [
                        record("contract_001", "2022-03-01", None, vec![salary("2022-03-01", "19.50")]),
                    ]
                }
            ],
            "now": "2024-06-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let events = body["days"][0]["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1]["source"], "contracts");
    assert_eq!(decimal_at(&events[1]["current_value"]["hourly_wage"]), decimal("19.00"));

    let codes: Vec<&str> = body["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["duplicate_event", "conflicting_event"]);
}

#[tokio::test]
async fn test_timeline_missing_field_returns_400() {
    let (status, body) = post(
        "/timeline",
        json!({ "records": [{ "start_date": "2022-03-01" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[test]
fn test_library_timeline_matches_single_source_merge() {
    let records: Vec<EmploymentRecord> = serde_json::from_value(json!([
        record("contract_001", "2022-03-01", None, vec![salary("2022-03-01", "19.00")]),
    ]))
    .unwrap();
    let now = date("2024-06-01");

    let single = build_timeline(&records, now);
    let merged = build_merged_timeline(
        &[RecordSource {
            source: EventSource::authoritative("contracts"),
            records: records.clone(),
        }],
        now,
    );

    assert_eq!(single, merged);
    assert_eq!(
        single.events().map(|e| e.event_type).collect::<Vec<_>>(),
        vec![ChangeEventType::ContractStart, ChangeEventType::SalaryChange]
    );
}

// =============================================================================
// Reference data refresh
// =============================================================================

#[test]
fn test_in_flight_snapshot_survives_reload() {
    let (table, _) = ConfigLoader::load(CONFIG_DIR).unwrap().into_parts();
    let store = WageTableStore::new(table);

    let held = store.snapshot();
    let generation = store.reload(CONFIG_DIR).unwrap();

    assert_eq!(generation, 2);
    assert_eq!(held.generation, 1);
    let resolved = resolve_forward(&held.table, 6, 2, date("2024-08-15")).unwrap();
    assert_eq!(resolved.wage.monthly_wage, decimal("2616.20"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["table_generation"], 1);
    assert_eq!(body["agreement_version"], "2024-2025");
}
