//! Wrapped Web Server
//!
//! Axum-based REST API for the Wrapped credit-card spending tool.
//!
//! A single-user local service: no authentication layer, but still a
//! restrictive CORS policy, security headers, upload size limits and
//! sanitized error responses.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use wrapped_core::categorize::Categorizer;
use wrapped_core::db::Database;

mod handlers;

/// Maximum statement upload size per file (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Request body cap for the upload route: a batch of full-size statement
/// files plus multipart framing. Axum's 2 MB default would reject a single
/// legitimate statement before the per-file check ever ran.
pub const MAX_UPLOAD_BODY: usize = 10 * MAX_UPLOAD_SIZE;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Wall-clock ceiling for parsing a single statement PDF
pub const PARSE_TIMEOUT_SECS: u64 = 30;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Shared across uploads so every file sees the same model
    pub categorizer: Arc<Categorizer>,
}

/// Build the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        categorizer: Arc::new(Categorizer::from_env()),
    });

    let api_routes = Router::new()
        // Cards
        .route(
            "/cards/",
            get(handlers::list_cards).post(handlers::create_card),
        )
        .route(
            "/cards/:id",
            get(handlers::get_card).delete(handlers::delete_card),
        )
        // Statements
        .route(
            "/cards/:id/upload-statement/",
            post(handlers::upload_statement).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route("/cards/:id/statements/", get(handlers::list_statements))
        // Transactions
        .route("/cards/:id/transactions/", get(handlers::list_transactions))
        // Reports
        .route("/cards/:id/report/", get(handlers::get_report));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let app = create_router(db, static_dir, config);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// API error with sanitized client-facing message
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
