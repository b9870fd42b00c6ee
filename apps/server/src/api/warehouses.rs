use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use stockledger_core::{
    movements::StockPosition,
    warehouses::{NewWarehouse, Warehouse, WarehouseUpdate},
};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct WarehouseQuery {
    filter: Option<String>,
}

async fn list_warehouses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WarehouseQuery>,
) -> ApiResult<Json<Vec<Warehouse>>> {
    let warehouses = state
        .warehouse_service
        .list_warehouses(query.filter.as_deref())?;
    Ok(Json(warehouses))
}

async fn get_warehouse(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Warehouse>> {
    Ok(Json(state.warehouse_service.get_warehouse(id)?))
}

async fn create_warehouse(
    State(state): State<Arc<AppState>>,
    Json(new_warehouse): Json<NewWarehouse>,
) -> ApiResult<(StatusCode, Json<Warehouse>)> {
    let warehouse = state
        .warehouse_service
        .create_warehouse(new_warehouse)
        .await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

async fn update_warehouse(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<WarehouseUpdate>,
) -> ApiResult<Json<Warehouse>> {
    let warehouse = state.warehouse_service.update_warehouse(id, update).await?;
    Ok(Json(warehouse))
}

async fn delete_warehouse(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.warehouse_service.delete_warehouse(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Positions with stock available to leave warehouse `id` in a transfer.
async fn transferable_positions(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StockPosition>>> {
    Ok(Json(state.movement_service.transferable_positions(id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route(
            "/warehouses/{id}",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route("/warehouses/{id}/transferable", get(transferable_positions))
}
