//! Spending report handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use wrapped_core::models::Report;
use wrapped_core::report::compute_report;

/// GET /api/v1/cards/:id/report/ - Spending report for a card
///
/// Recomputed from stored transactions on every request. A card with no
/// imports gets the all-zero report, not an error.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Report>, AppError> {
    state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;

    let transactions = state.db.transactions_for_report(id)?;
    Ok(Json(compute_report(&transactions)))
}
