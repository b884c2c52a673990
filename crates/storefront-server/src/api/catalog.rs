use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use storefront_core::Product;
use storefront_db::{CategoryRow, CollectionRow, ProductListFilters, ProductRow};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, require_pool, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    pub limit: Option<i64>,
}

fn into_products(request_id: &str, rows: Vec<ProductRow>) -> Result<Vec<Product>, ApiError> {
    rows.into_iter()
        .map(ProductRow::into_product)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| map_db_error(request_id.to_owned(), &e))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CategoryRow>>>, ApiError> {
    let pool = require_pool(&state, &req_id)?;
    let data = storefront_db::list_categories(pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_collections(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CollectionRow>>>, ApiError> {
    let pool = require_pool(&state, &req_id)?;
    let data = storefront_db::list_collections(pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_collection_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let pool = require_pool(&state, &req_id)?;
    let rows = storefront_db::list_collection_products(pool, &slug)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: into_products(&req_id.0, rows)?,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let pool = require_pool(&state, &req_id)?;
    let filters = ProductListFilters {
        category: query.category.filter(|c| !c.trim().is_empty()),
        in_stock_only: query.in_stock,
        limit: Some(normalize_limit(query.limit)),
    };
    let rows = storefront_db::list_products(pool, &filters)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: into_products(&req_id.0, rows)?,
        meta: ResponseMeta::new(req_id.0),
    }))
}
