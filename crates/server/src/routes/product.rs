use crate::error::{ApiError, ApiResult};
use crate::extract::{IdParam, ValidatedJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use store::Stored;
use storefront::product::{
    CreateProductDto, FindProductDto, Product, ProductPatch, ProductWithReviews,
    PRODUCT_NOT_FOUND_ERROR,
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> ApiResult<(StatusCode, Json<Stored<Product>>)> {
    let product = state.products.create(dto)?;
    tracing::info!(id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> ApiResult<Json<Stored<Product>>> {
    state
        .products
        .find_by_id(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND_ERROR))
}

/// Reviews of the product are left in place.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> ApiResult<Json<Stored<Product>>> {
    state
        .products
        .delete_by_id(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND_ERROR))
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
    ValidatedJson(patch): ValidatedJson<ProductPatch>,
) -> ApiResult<Json<Stored<Product>>> {
    state
        .products
        .update_by_id(&id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(PRODUCT_NOT_FOUND_ERROR))
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<FindProductDto>,
) -> ApiResult<Json<Vec<ProductWithReviews>>> {
    Ok(Json(state.products.find_with_reviews(&dto)?))
}
