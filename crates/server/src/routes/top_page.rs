use crate::error::{ApiError, ApiResult};
use crate::extract::{IdParam, ValidatedJson};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use store::Stored;
use storefront::top_page::{
    CreateTopPageDto, FindTopPageDto, TopPage, TopPageGroup, TopPagePatch,
    TOP_PAGE_ALIAS_NOT_FOUND_ERROR, TOP_PAGE_NOT_FOUND_ERROR,
};

pub async fn create(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<CreateTopPageDto>,
) -> ApiResult<(StatusCode, Json<Stored<TopPage>>)> {
    let page = state.top_pages.create(dto)?;
    tracing::info!(id = %page.id, alias = %page.alias, "top page created");
    Ok((StatusCode::CREATED, Json(page)))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> ApiResult<Json<Stored<TopPage>>> {
    state
        .top_pages
        .find_by_id(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(TOP_PAGE_NOT_FOUND_ERROR))
}

pub async fn get_by_alias(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> ApiResult<Json<Stored<TopPage>>> {
    state
        .top_pages
        .find_by_alias(&alias)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(TOP_PAGE_ALIAS_NOT_FOUND_ERROR))
}

/// Responds 200 with an empty body.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> ApiResult<StatusCode> {
    match state.top_pages.delete_by_id(&id)? {
        Some(_) => Ok(StatusCode::OK),
        None => Err(ApiError::not_found(TOP_PAGE_NOT_FOUND_ERROR)),
    }
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
    ValidatedJson(patch): ValidatedJson<TopPagePatch>,
) -> ApiResult<Json<Stored<TopPage>>> {
    state
        .top_pages
        .update_by_id(&id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(TOP_PAGE_NOT_FOUND_ERROR))
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<FindTopPageDto>,
) -> ApiResult<Json<Vec<TopPageGroup>>> {
    Ok(Json(state.top_pages.find_by_category(dto.first_category)?))
}

pub async fn text_search(
    State(state): State<Arc<AppState>>,
    Path(text): Path<String>,
) -> ApiResult<Json<Vec<Stored<TopPage>>>> {
    Ok(Json(state.top_pages.find_by_text(&text)?))
}
