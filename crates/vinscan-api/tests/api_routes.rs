//! Router tests driven through `tower::ServiceExt::oneshot`

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use vinscan_api::{AppState, build_router_with_state};
use vinscan_core::Config;
use vinscan_forms::{MockVinDecoder, RecordingSink, SimulatedCamera};

fn fast_config() -> Config {
    let mut config = Config::default();
    config.forms.submit_delay_ms = 0;
    config.forms.decode_delay_ms = 0;
    config.forms.reset_after_ms = 50;
    config
}

fn app() -> Router {
    build_router_with_state(AppState::new(fast_config())).unwrap()
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(app(), "GET", uri, None).await
}

fn models(body: &Value) -> Vec<String> {
    body["vehicles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["model"].as_str().unwrap().to_string())
        .collect()
}

fn contact_body() -> Value {
    json!({
        "first_name": "Dana",
        "last_name": "Reyes",
        "email": "dana@reyesmotors.com",
        "company": "Reyes Motors",
        "phone": "555-0100",
        "dealership_size": "medium",
        "current_solution": "none",
        "urgency": "immediate",
        "message": "Two lots, about 300 units"
    })
}

#[tokio::test]
async fn health_reports_collaborators() {
    let (status, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "VINScan Pro");
    assert_eq!(body["collaborators"]["submission_sink"], "log");
}

#[rstest]
#[case("/", "home")]
#[case("/dashboard", "dashboard")]
#[case("/inventory", "inventory")]
#[case("/reports", "reports")]
#[case("/pricing", "pricing")]
#[case("/contact", "contact")]
#[case("/scanner", "scanner")]
#[tokio::test]
async fn every_page_marks_its_route_active(#[case] uri: &str, #[case] route: &str) {
    let (status, body) = get(uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["navigation"]["product"], "VINScan Pro");
    assert_eq!(body["navigation"]["active"], route);
    assert_eq!(body["navigation"]["links"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn landing_lists_all_pages() {
    let (_, body) = get("/").await;

    assert_eq!(body["pages"].as_array().unwrap().len(), 7);
    assert_eq!(body["trial_days"], 14);
    assert_eq!(body["plans"][0]["display_price"], 79);
}

#[tokio::test]
async fn dashboard_stats_cover_whole_fixture() {
    let (_, body) = get("/dashboard?search=civic").await;

    assert_eq!(body["stats"]["total_vehicles"], 3);
    assert_eq!(body["stats"]["available_vehicles"], 1);
    assert_eq!(body["stats"]["sold_vehicles"], 1);
    assert_eq!(body["total_value_display"], "$85,500");
    assert_eq!(models(&body), ["Civic"]);
}

#[tokio::test]
async fn inventory_defaults_to_newest_first() {
    let (status, body) = get("/inventory").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["count"], 5);
    assert_eq!(models(&body), ["Malibu", "Sonata", "X3", "Civic", "F-150"]);
    assert_eq!(body["query"]["sort_direction"], "desc");
}

#[tokio::test]
async fn inventory_filters_and_sorts() {
    let (_, body) = get("/inventory?status=available&sort=price").await;
    assert_eq!(models(&body), ["Civic", "Malibu", "X3"]);
    assert_eq!(body["count"], 3);

    let (_, body) = get("/inventory?sort=price&direction=desc").await;
    assert_eq!(models(&body), ["X3", "F-150", "Sonata", "Malibu", "Civic"]);

    let (_, body) = get("/inventory?search=white").await;
    assert!(body["count"].as_u64().unwrap() >= 1);
    assert_eq!(body["vehicles"][0]["price_display"].as_str().unwrap().chars().next(), Some('$'));
}

#[rstest]
#[case("/inventory?status=lost", "status")]
#[case("/inventory?sort=horsepower", "sort")]
#[case("/reports?time_range=decade", "time_range")]
#[case("/pricing?billing=weekly", "billing")]
#[tokio::test]
async fn bad_query_values_are_rejected(#[case] uri: &str, #[case] parameter: &str) {
    let (status, body) = get(uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PARAMETERS");
    assert_eq!(body["details"]["parameter"], parameter);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn inventory_export_matches_filtered_rows() {
    let (status, body) = send(app(), "POST", "/api/inventory/export?status=sold", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Inventory exported successfully!");
    let csv = body["data"]["body"].as_str().unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("F-150"));
    assert!(body["data"]["filename"].as_str().unwrap().starts_with("inventory-"));
}

#[tokio::test]
async fn reports_page_and_export() {
    let (_, body) = get("/reports").await;
    assert_eq!(body["report"]["title"], "VINScan Pro Analytics Report");
    assert_eq!(body["report"]["date_range"], "Last 6 Months");
    assert_eq!(body["report"]["metrics"]["total_sales"], 121);
    assert_eq!(body["time_ranges"].as_array().unwrap().len(), 4);

    let (_, body) = get("/reports?time_range=1year").await;
    assert_eq!(body["report"]["date_range"], "Custom Period");

    let (status, body) = send(app(), "POST", "/api/reports/export?format=json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Report exported successfully!");
    assert_eq!(body["data"]["format"], "json");
}

#[tokio::test]
async fn pricing_annual_display() {
    let (_, body) = get("/pricing?billing=annual").await;

    assert_eq!(body["billing"], "annual");
    assert_eq!(body["plans"][1]["name"], "Hero Professional");
    assert_eq!(body["plans"][1]["price"], 1990);
    assert_eq!(body["plans"][1]["display_price"], 166);
    assert_eq!(body["plans"][1]["savings_percent"], 17);
    assert_eq!(body["faq"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn contact_page_lists_options() {
    let (_, body) = get("/contact").await;

    assert_eq!(body["form"]["phase"], "editing");
    assert_eq!(body["dealership_sizes"].as_array().unwrap().len(), 5);
    assert_eq!(body["current_solutions"].as_array().unwrap().len(), 8);
    assert_eq!(body["urgencies"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["required_fields"],
        json!(["first_name", "last_name", "email", "company", "phone"])
    );
}

#[tokio::test]
async fn contact_submission_is_delivered() {
    let sink = RecordingSink::new();
    let state = AppState::new(fast_config()).with_sink(Arc::new(sink.clone()));
    let app = build_router_with_state(state).unwrap();

    let (status, body) = send(app, "POST", "/contact", Some(contact_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Thank you for reaching out! Our sales team will contact you within 2 hours during business hours."
    );
    assert_eq!(body["data"]["destination"], "marinomarketing@mail.com");

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submission.company, "Reyes Motors");
}

#[tokio::test]
async fn contact_missing_field_is_unprocessable() {
    let mut body = contact_body();
    body["phone"] = json!("");

    let (status, body) = send(app(), "POST", "/contact", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["error"], "phone is required");
}

#[tokio::test]
async fn contact_delivery_failure_is_bad_gateway() {
    let state = AppState::new(fast_config())
        .with_sink(Arc::new(RecordingSink::new().with_failure("mailbox full")));
    let app = build_router_with_state(state).unwrap();

    let (status, body) = send(app, "POST", "/contact", Some(contact_body())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "SUBMISSION_FAILED");
}

#[tokio::test]
async fn scanner_page_defaults() {
    let (_, body) = get("/scanner").await;

    assert_eq!(body["scanner"]["mode"], "manual");
    assert_eq!(body["progress"], "0/17");
    assert_eq!(body["sample_vin"], "1HGBH41JXMN109186");
}

#[tokio::test]
async fn scanner_decode_requires_full_vin() {
    let (status, body) = send(
        app(),
        "POST",
        "/scanner/decode",
        Some(json!({ "vin": "1HGBH41" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_VIN");

    let (status, body) = send(
        app(),
        "POST",
        "/scanner/decode",
        Some(json!({ "vin": "wbxht910x0ww12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vehicle"]["vin"], "WBXHT910X0WW12345");
    assert_eq!(body["data"]["vehicle"]["make"], "Honda");
    assert_eq!(body["data"]["progress"], "17/17");
}

#[tokio::test]
async fn scanner_simulate_and_decoder_failure() {
    let (status, body) = send(app(), "POST", "/scanner/simulate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["vehicle"]["vin"], "1HGBH41JXMN109186");
    assert_eq!(body["data"]["vehicle"]["is_valid"], true);

    let state = AppState::new(fast_config())
        .with_decoder(Arc::new(MockVinDecoder::new().with_failure("offline")));
    let app = build_router_with_state(state).unwrap();
    let (status, body) = send(app, "POST", "/scanner/simulate", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "DECODE_FAILED");
}

#[tokio::test]
async fn camera_denial_is_forbidden() {
    let state = AppState::new(fast_config()).with_camera(Arc::new(SimulatedCamera::denied()));
    let app = build_router_with_state(state).unwrap();

    let (status, body) = send(app, "POST", "/scanner/camera", None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "CAMERA_PERMISSION_DENIED");
    assert_eq!(body["error"], "Camera access is required for VIN scanning");
}

#[tokio::test]
async fn camera_grant_releases_device_after_request() {
    let state = AppState::new(fast_config());
    let app = build_router_with_state(state).unwrap();

    for _ in 0..2 {
        let (status, body) = send(app.clone(), "POST", "/scanner/camera", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mode"], "camera");
        assert_eq!(body["data"]["camera_active"], true);
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = get("/admin").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}
