use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use stockledger_core::stock_report::{Dashboard, DashboardFilter, IntegratedStockRow, StockReport};

use super::split_list;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct DashboardQuery {
    locations: Option<String>,
    skus: Option<String>,
}

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<Dashboard>> {
    let filter = DashboardFilter {
        locations: split_list(query.locations.as_deref()),
        skus: split_list(query.skus.as_deref()),
    };
    Ok(Json(state.stock_report_service.dashboard(&filter).await?))
}

async fn integrated_stock(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<IntegratedStockRow>>> {
    Ok(Json(state.stock_report_service.integrated_stock().await?))
}

async fn list_source_reports(State(state): State<Arc<AppState>>) -> Json<Vec<StockReport>> {
    Json(state.stock_report_service.source_reports().await)
}

async fn get_source_report(
    Path(label): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<StockReport>> {
    state
        .stock_report_service
        .source_report(&label)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown stock source '{}'", label)))
}

async fn ledger_report(State(state): State<Arc<AppState>>) -> ApiResult<Json<StockReport>> {
    Ok(Json(state.stock_report_service.ledger_report()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/stock/integrated", get(integrated_stock))
        .route("/stock/ledger", get(ledger_report))
        .route("/sources", get(list_source_reports))
        .route("/sources/{label}", get(get_source_report))
}
