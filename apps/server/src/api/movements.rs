use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stockledger_core::movements::{
    Movement, MovementFilter, MovementUpdate, NewMovement, StockPosition, TransferRequest,
    TransferResult,
};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceQuery {
    sku: String,
    warehouse_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResponse {
    sku: String,
    warehouse_id: i32,
    balance: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockQuery {
    sku: Option<String>,
    warehouse_id: Option<i32>,
}

async fn list_movements(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovementFilter>,
) -> ApiResult<Json<Vec<Movement>>> {
    Ok(Json(state.movement_service.history(&filter)?))
}

async fn record_movement(
    State(state): State<Arc<AppState>>,
    Json(new_movement): Json<NewMovement>,
) -> ApiResult<(StatusCode, Json<Movement>)> {
    let movement = state.movement_service.record(new_movement).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

async fn get_movement(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Movement>> {
    Ok(Json(state.movement_service.get_movement(id)?))
}

async fn update_movement(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<MovementUpdate>,
) -> ApiResult<Json<Movement>> {
    let movement = state.movement_service.update_movement(id, update).await?;
    Ok(Json(movement))
}

async fn delete_movement(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.movement_service.delete_movement(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransferRequest>,
) -> ApiResult<(StatusCode, Json<TransferResult>)> {
    let result = state.movement_service.transfer(request).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

async fn get_balance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BalanceQuery>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .movement_service
        .balance(&query.sku, query.warehouse_id)?;
    Ok(Json(BalanceResponse {
        sku: query.sku,
        warehouse_id: query.warehouse_id,
        balance,
    }))
}

async fn stock_positions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<Vec<StockPosition>>> {
    let positions = state
        .movement_service
        .stock_positions(query.sku.as_deref(), query.warehouse_id)?;
    Ok(Json(positions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movements", get(list_movements).post(record_movement))
        .route(
            "/movements/{id}",
            get(get_movement)
                .put(update_movement)
                .delete(delete_movement),
        )
        .route("/transfers", post(transfer))
        .route("/balance", get(get_balance))
        .route("/stock", get(stock_positions))
}
