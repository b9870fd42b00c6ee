use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use stockledger_core::products::{NewProduct, Product, ProductUpdate};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct ProductQuery {
    filter: Option<String>,
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .product_service
        .list_products(query.filter.as_deref())?;
    Ok(Json(products))
}

async fn get_product(
    Path(sku): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.product_service.get_product(&sku)?))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(new_product): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.product_service.create_product(new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    Path(sku): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    let product = state.product_service.update_product(&sku, update).await?;
    Ok(Json(product))
}

async fn delete_product(
    Path(sku): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.product_service.delete_product(&sku).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{sku}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
