use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use storefront::auth::{AuthDto, LoginResponse, RegisteredUser};
use tokio::task;

// bcrypt hashing and verification run on the blocking pool.

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(dto): ValidatedJson<AuthDto>,
) -> ApiResult<(StatusCode, Json<RegisteredUser>)> {
    let auth = state.auth.clone();
    let user = task::spawn_blocking(move || auth.register(dto)).await??;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Answers 200 rather than 201; clients expect it.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(AuthDto { login, password }): ValidatedJson<AuthDto>,
) -> ApiResult<Json<LoginResponse>> {
    let auth = state.auth.clone();
    let email = task::spawn_blocking(move || auth.validate_user(&login, &password)).await??;
    Ok(Json(state.auth.login(&email)?))
}
