use std::io::Write;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use stockledger_server::{api::app_router, build_state, config::Config};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _dir: TempDir,
}

async fn build_test_app() -> TestApp {
    let dir = tempdir().unwrap();

    let mut extract = std::fs::File::create(dir.path().join("erp.csv")).unwrap();
    writeln!(extract, "codigo;nome;quantidade\nMKT-001;Camiseta;7\nMKT-002;Boné;1.200").unwrap();

    let sources_file = dir.path().join("sources.json");
    std::fs::write(
        &sources_file,
        json!([
            {
                "label": "Marketplace",
                "kind": "csv",
                "location": dir.path().join("erp.csv").to_string_lossy()
            }
        ])
        .to_string(),
    )
    .unwrap();

    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(10),
        log_format: "text".to_string(),
        sources_file: Some(sources_file),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        _dir: dir,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed(app: &TestApp) -> (i64, i64) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/products",
        Some(json!({ "sku": "CAM-001", "name": "Camiseta" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, main) = send(
        app,
        Method::POST,
        "/api/v1/warehouses",
        Some(json!({ "name": "Matriz" })),
    )
    .await;
    let (_, fair) = send(
        app,
        Method::POST,
        "/api/v1/warehouses",
        Some(json!({ "name": "Feira", "kind": "TEMPORARY" })),
    )
    .await;
    (main["id"].as_i64().unwrap(), fair["id"].as_i64().unwrap())
}

async fn record(app: &TestApp, warehouse_id: i64, kind: &str, quantity: i64) -> StatusCode {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/movements",
        Some(json!({
            "sku": "CAM-001",
            "warehouseId": warehouse_id,
            "quantity": quantity,
            "kind": kind
        })),
    )
    .await;
    status
}

async fn balance(app: &TestApp, warehouse_id: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::GET,
        &format!("/api/v1/balance?sku=CAM-001&warehouseId={}", warehouse_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["balance"].as_i64().unwrap()
}

#[tokio::test]
async fn healthz_responds() {
    let app = build_test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let app = build_test_app().await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn movements_follow_snapshot_semantics() {
    let app = build_test_app().await;
    let (main, _) = seed(&app).await;

    assert_eq!(record(&app, main, "ENTRY", 5).await, StatusCode::CREATED);
    assert_eq!(record(&app, main, "EXIT", 3).await, StatusCode::CREATED);
    assert_eq!(balance(&app, main).await, 2);

    assert_eq!(
        record(&app, main, "BALANCE_SNAPSHOT", 100).await,
        StatusCode::CREATED
    );
    assert_eq!(record(&app, main, "ENTRY", 1).await, StatusCode::CREATED);
    assert_eq!(balance(&app, main).await, 101);

    let (status, history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/movements?sku=CAM-001&warehouseId={}", main),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn overdraw_is_rejected_with_unprocessable_entity() {
    let app = build_test_app().await;
    let (main, _) = seed(&app).await;
    record(&app, main, "ENTRY", 2).await;

    assert_eq!(
        record(&app, main, "EXIT", 3).await,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(balance(&app, main).await, 2);
}

#[tokio::test]
async fn unknown_references_and_bad_input_map_to_status_codes() {
    let app = build_test_app().await;
    let (main, _) = seed(&app).await;

    assert_eq!(record(&app, 9999, "ENTRY", 1).await, StatusCode::NOT_FOUND);
    assert_eq!(record(&app, main, "ENTRY", 0).await, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/products",
        Some(json!({ "sku": "CAM-001", "name": "Outra" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn transfer_moves_stock_between_warehouses() {
    let app = build_test_app().await;
    let (main, fair) = seed(&app).await;
    record(&app, main, "ENTRY", 10).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/transfers",
        Some(json!({
            "sku": "CAM-001",
            "originId": main,
            "destinationId": fair,
            "quantity": 4
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["exit"]["kind"], "EXIT");
    assert_eq!(body["entry"]["kind"], "ENTRY");
    assert_eq!(balance(&app, main).await, 6);
    assert_eq!(balance(&app, fair).await, 4);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/transfers",
        Some(json!({
            "sku": "CAM-001",
            "originId": main,
            "destinationId": fair,
            "quantity": 7
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(balance(&app, main).await, 6);
    assert_eq!(balance(&app, fair).await, 4);
}

#[tokio::test]
async fn mappings_drive_reconciliation() {
    let app = build_test_app().await;
    let (main, _) = seed(&app).await;
    record(&app, main, "ENTRY", 5).await;

    let (status, mapping) = send(
        &app,
        Method::POST,
        "/api/v1/mappings",
        Some(json!({ "internalSku": "CAM-001", "externalSku": "MKT-001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mapping["externalSku"], "MKT-001");

    let (status, rows) = send(
        &app,
        Method::GET,
        "/api/v1/reconciliation?external=Marketplace",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let row = &rows.as_array().unwrap()[0];
    assert_eq!(row["internalQuantity"], 5);
    assert_eq!(row["externalQuantity"], 7);

    let (status, selectable) = send(
        &app,
        Method::GET,
        "/api/v1/mappings/selectable?internalSku=OTHER&source=Marketplace",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selectable, json!(["MKT-002"]));

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/reconciliation?external=Unknown",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_combines_ledger_and_sources() {
    let app = build_test_app().await;
    let (main, fair) = seed(&app).await;
    record(&app, main, "ENTRY", 3).await;
    record(&app, fair, "ENTRY", 50).await;

    let (status, dashboard) = send(&app, Method::GET, "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    // Temporary warehouses stay out of the integrated view.
    assert_eq!(dashboard["metrics"]["totalUnits"], 3 + 7 + 1200);

    let (status, filtered) = send(
        &app,
        Method::GET,
        "/api/v1/dashboard?locations=Matriz",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filtered["metrics"]["totalUnits"], 3);
}
