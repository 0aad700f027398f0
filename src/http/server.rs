//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, CORS)
//! - Bind server to listener
//! - Record per-request metrics
//! - Graceful shutdown via the lifecycle subsystem

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use mongodb::Database;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::response::ApiResponse;
use crate::images::ImageStore;
use crate::observability::metrics;
use crate::postal::{PostalClient, PostalError};
use crate::{chat, products};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
    pub postal: PostalClient,
    pub images: ImageStore,
}

/// HTTP server for the marketplace backend.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig, db: Database) -> Result<Self, PostalError> {
        let postal = PostalClient::new(&config.postal)?;
        let images = ImageStore::new(&config.images);

        let state = AppState {
            db,
            config: Arc::new(config),
            postal,
            images,
        };

        let router = Self::build_router(state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_origin(Any)
            .max_age(Duration::from_secs(60 * 60));

        let config = &state.config.listener;

        Router::new()
            .nest("/api/products", products::handlers::router())
            .nest("/api/chat", chat::handlers::router())
            .route("/health", get(health))
            .with_state(state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(track_metrics))
            .layer(cors)
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("ok", env!("CARGO_PKG_VERSION")))
}

/// Record request count and latency, labeled by route template.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);

    response.into_response()
}
