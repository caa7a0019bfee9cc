//! API route handlers
//!
//! - `health`: liveness, readiness and metrics
//! - `auth`: registration and login
//! - `top_page`: SEO landing pages
//! - `product`: catalog entries and the product-with-reviews query
//! - `review`: product reviews
//! - `files`: multipart uploads

pub mod auth;
pub mod files;
pub mod health;
pub mod product;
pub mod review;
pub mod top_page;

use crate::error::ApiError;
use axum::http::{Method, Uri};
use axum::Json;
use serde_json::json;

/// Service name and entry points (GET /).
pub async fn api_info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Storefront Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/auth/register",
            "/auth/login",
            "/top-page",
            "/product",
            "/review",
            "/files/upload",
            "/health",
            "/ready",
            "/metrics"
        ]
    }))
}

/// 404 for undefined routes
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Cannot {method} {}", uri.path()))
}
