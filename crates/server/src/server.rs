//! Server initialization and routing
//!
//! Router assembly, the middleware stack, telemetry set-up and graceful
//! shutdown.

use crate::config::ServerConfig;
use crate::middleware::{jwt_guard, log_requests, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{auth, files, health, product, review, top_page};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Guarded endpoints carry the JWT check as a route layer, so a public
/// `GET` and a guarded `PATCH` can share one path.
///
/// Middleware stack, outermost first:
/// 1. Tracing
/// 2. Request ID tracking
/// 3. Request logging and metrics
/// 4. CORS
/// 5. Compression
/// 6. Timeout handling
/// 7. Body size limit
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let guard = from_fn_with_state(state.clone(), jwt_guard);

    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let top_page_routes = Router::new()
        .route(
            "/top-page/create",
            post(top_page::create).route_layer(guard.clone()),
        )
        .route("/top-page/find", post(top_page::find))
        .route("/top-page/byAlias/{alias}", get(top_page::get_by_alias))
        .route("/top-page/textSearch/{text}", get(top_page::text_search))
        .route(
            "/top-page/{id}",
            get(top_page::get).merge(
                delete(top_page::delete)
                    .patch(top_page::patch)
                    .route_layer(guard.clone()),
            ),
        );

    let product_routes = Router::new()
        .route(
            "/product/create",
            post(product::create).route_layer(guard.clone()),
        )
        .route("/product/find", post(product::find))
        .route(
            "/product/{id}",
            get(product::get)
                .patch(product::patch)
                .delete(product::delete)
                .route_layer(guard.clone()),
        );

    let review_routes = Router::new()
        .route("/review/create", post(review::create))
        .route("/review/byProduct/{product_id}", get(review::by_product))
        .route("/review/{id}", delete(review::delete).route_layer(guard));

    // The misspelled path is kept for existing clients.
    let file_routes = Router::new()
        .route("/files/updload", post(files::upload))
        .route("/files/upload", post(files::upload));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(top_page_routes)
        .merge(product_routes)
        .merge(review_routes)
        .merge(file_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the storefront HTTP server
///
/// Sets up JSON logging, the Prometheus recorder when enabled, the document
/// store and services, then serves until SIGTERM or Ctrl+C.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    if config.jwt_secret.is_none() {
        tracing::warn!("No JWT secret configured, using the development secret");
    }

    let mut state = AppState::new(config.clone())?;
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
    }
    let state = Arc::new(state);

    let app = build_router(state.clone());
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting storefront server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    match &config.store_path {
        Some(path) => tracing::info!("Store: redb at {}", path.display()),
        None => tracing::info!("Store: in-memory"),
    }
    tracing::info!(
        "CORS: {}, Metrics: {}, Uploads: {}",
        config.enable_cors,
        config.metrics_enabled,
        config.upload_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.flush()?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
