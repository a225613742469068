//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod cards;
pub mod reports;
pub mod statements;
pub mod transactions;

// Re-export all handlers for use in router
pub use cards::*;
pub use reports::*;
pub use statements::*;
pub use transactions::*;

use axum::Json;

/// GET /health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
