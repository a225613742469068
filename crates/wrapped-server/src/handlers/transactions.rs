//! Transaction listing handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use wrapped_core::models::Transaction;

#[derive(Debug, Deserialize)]
pub struct ListTransactionsParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total: i64,
}

/// GET /api/v1/cards/:id/transactions/ - List a card's transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<ListTransactionsParams>,
) -> Result<Json<TransactionsResponse>, AppError> {
    state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;

    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.max(0);

    let transactions = state.db.list_transactions(id, limit, offset)?;
    let total = state.db.count_transactions(id)?;

    Ok(Json(TransactionsResponse {
        transactions,
        total,
    }))
}
