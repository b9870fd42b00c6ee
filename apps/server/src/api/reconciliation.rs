use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use stockledger_core::{
    constants::LEDGER_REPORT_LABEL,
    reconciliation::{ImportSummary, ReconciliationRow, SkuMapping},
    stock_report::StockReport,
};

use super::split_list;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveMappingBody {
    internal_sku: String,
    #[serde(default)]
    external_sku: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectableQuery {
    internal_sku: String,
    candidates: Option<String>,
    /// Take candidates from this source's report instead.
    source: Option<String>,
}

#[derive(Deserialize)]
struct ReconcileQuery {
    internal: Option<String>,
    external: String,
}

/// Resolves a report label: the ledger itself or a configured source.
async fn report_by_label(state: &AppState, label: &str) -> ApiResult<StockReport> {
    if label.eq_ignore_ascii_case(LEDGER_REPORT_LABEL) {
        return Ok(state.stock_report_service.ledger_report()?);
    }
    state
        .stock_report_service
        .source_report(label)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Unknown stock source '{}'", label)))
}

async fn list_mappings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SkuMapping>>> {
    Ok(Json(state.reconciliation_service.list_mappings()?))
}

/// An empty `externalSku` removes the mapping; the response is then `null`.
async fn save_mapping(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SaveMappingBody>,
) -> ApiResult<Json<Option<SkuMapping>>> {
    let mapping = state
        .reconciliation_service
        .save_mapping(&body.internal_sku, &body.external_sku)
        .await?;
    Ok(Json(mapping))
}

async fn import_mappings(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<Json<ImportSummary>> {
    let summary = state.reconciliation_service.import_mappings(&body).await?;
    Ok(Json(summary))
}

async fn selectable_external_skus(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectableQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let candidates = match &query.source {
        Some(label) => report_by_label(&state, label)
            .await?
            .rows
            .into_iter()
            .map(|row| row.sku)
            .collect(),
        None => split_list(query.candidates.as_deref()),
    };
    let selectable = state
        .reconciliation_service
        .selectable_external_skus(&query.internal_sku, &candidates)?;
    Ok(Json(selectable))
}

async fn reconcile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReconcileQuery>,
) -> ApiResult<Json<Vec<ReconciliationRow>>> {
    let internal_label = query.internal.as_deref().unwrap_or(LEDGER_REPORT_LABEL);
    let internal = report_by_label(&state, internal_label).await?;
    let external = report_by_label(&state, &query.external).await?;
    let rows = state.reconciliation_service.reconcile(&internal, &external)?;
    Ok(Json(rows))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mappings", get(list_mappings).post(save_mapping))
        .route("/mappings/import", post(import_mappings))
        .route("/mappings/selectable", get(selectable_external_skus))
        .route("/reconciliation", get(reconcile))
}
