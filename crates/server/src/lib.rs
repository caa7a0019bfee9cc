//! Storefront Server - HTTP REST API for the storefront catalog
//!
//! Thin axum handlers over the `storefront` services: each one checks the
//! bearer token where required, validates its payload, makes a single
//! service call and turns a missing document into a 404 with a fixed
//! message.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! Guarded endpoints expect `Authorization: Bearer <token>` from `/auth/login`.
//!
//! - `POST /auth/register`, `POST /auth/login`
//! - `POST /top-page/create` (guarded), `GET /top-page/{id}`,
//!   `GET /top-page/byAlias/{alias}`, `PATCH|DELETE /top-page/{id}` (guarded),
//!   `POST /top-page/find`, `GET /top-page/textSearch/{text}`
//! - `POST /product/create` (guarded), `GET|PATCH|DELETE /product/{id}`
//!   (guarded), `POST /product/find`
//! - `POST /review/create`, `GET /review/byProduct/{productId}`,
//!   `DELETE /review/{id}` (guarded)
//! - `POST /files/upload` (also `/files/updload`), files served under `/uploads`
//! - `GET /`, `GET /health`, `GET /ready`, `GET /metrics`

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorBody, ErrorMessage};
pub use server::{build_router, start_server};
pub use state::AppState;
