use crate::error::{ApiError, ApiResult};
use crate::extract::{IdParam, ValidatedJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use store::Stored;
use storefront::review::{CreateReviewDto, Review, REVIEW_NOT_FOUND};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> ApiResult<(StatusCode, Json<Stored<Review>>)> {
    let review = state.reviews.create(dto)?;
    tracing::info!(id = %review.id, product_id = %review.product_id, "review created");
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn by_product(
    State(state): State<Arc<AppState>>,
    IdParam(product_id): IdParam,
) -> ApiResult<Json<Vec<Stored<Review>>>> {
    Ok(Json(state.reviews.find_by_product_id(&product_id)?))
}

/// Not-found replies here carry no `error` label.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> ApiResult<Json<Stored<Review>>> {
    state
        .reviews
        .delete_by_id(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::Plain {
            status: StatusCode::NOT_FOUND,
            message: REVIEW_NOT_FOUND.to_string(),
        })
}
