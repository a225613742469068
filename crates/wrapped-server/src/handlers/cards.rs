//! Card registry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use wrapped_core::models::{Bank, Card};

/// Request body for registering a card
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub name: String,
    pub last_4_digits: String,
    pub bank: String,
}

/// GET /api/v1/cards/ - List all cards
pub async fn list_cards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Card>>, AppError> {
    let cards = state.db.list_cards()?;
    Ok(Json(cards))
}

/// POST /api/v1/cards/ - Register a card
pub async fn create_card(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCardRequest>,
) -> Result<Json<Card>, AppError> {
    let bank: Bank = req
        .bank
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown bank: {}", req.bank)))?;

    let card = state
        .db
        .create_card(&req.name, &req.last_4_digits, bank)
        .map_err(|e| match e {
            wrapped_core::Error::InvalidData(msg) => AppError::bad_request(&msg),
            other => other.into(),
        })?;

    Ok(Json(card))
}

/// GET /api/v1/cards/:id - Get a single card
pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Card>, AppError> {
    let card = state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;
    Ok(Json(card))
}

/// DELETE /api/v1/cards/:id - Delete a card and its imports
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;

    state.db.delete_card(id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
