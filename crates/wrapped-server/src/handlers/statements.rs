//! Statement upload handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{AppError, AppState, MAX_UPLOAD_SIZE, PARSE_TIMEOUT_SECS};
use wrapped_core::categorize::Categorizer;
use wrapped_core::models::{Bank, NewTransaction, Statement};
use wrapped_core::{normalize, parse_statement, Error as CoreError};

/// Per-file outcome of a statement upload
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub filename: String,
    pub ok: bool,
    pub inserted: usize,
    pub duplicates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for the upload endpoint
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub results: Vec<FileResult>,
    pub total_inserted: usize,
    pub total_duplicates: usize,
}

/// Parse and normalize one statement off the async runtime
///
/// PDF parsing is CPU-bound and, for hostile inputs, unbounded; it runs on
/// the blocking pool under a wall-clock ceiling so one bad file cannot stall
/// the server or the rest of the batch.
async fn parse_file(
    data: Vec<u8>,
    password: Option<String>,
    bank: Bank,
    categorizer: Arc<Categorizer>,
) -> Result<(Vec<NewTransaction>, usize), CoreError> {
    let parse = tokio::task::spawn_blocking(move || {
        let items = parse_statement(&data, password.as_deref(), bank)?;
        let batch = normalize(items, categorizer.as_ref());
        Ok::<_, CoreError>((batch.transactions, batch.duplicates_dropped))
    });

    match tokio::time::timeout(std::time::Duration::from_secs(PARSE_TIMEOUT_SECS), parse).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(CoreError::InvalidData(format!(
            "statement parsing failed: {}",
            join_err
        ))),
        Err(_) => Err(CoreError::ParseTimeout(PARSE_TIMEOUT_SECS)),
    }
}

/// POST /api/v1/cards/:id/upload-statement/ - Upload statement PDFs
///
/// Multipart form with one or more `files` fields and an optional shared
/// `password` field. Files are processed independently: a file that fails
/// (wrong password, unknown layout, parse timeout) is reported in its
/// result entry and does not block the others. Each successful file
/// commits atomically.
pub async fn upload_statement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let card = state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut password: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "files" | "file" => {
                let filename = field
                    .file_name()
                    .unwrap_or("statement.pdf")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read file data"))?;

                if bytes.len() > MAX_UPLOAD_SIZE {
                    return Err(AppError::bad_request(&format!(
                        "File {} too large. Maximum size is {} MB",
                        filename,
                        MAX_UPLOAD_SIZE / 1024 / 1024
                    )));
                }
                files.push((filename, bytes.to_vec()));
            }
            "password" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read password"))?;
                if !value.is_empty() {
                    password = Some(value);
                }
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::bad_request("Missing files field"));
    }

    let mut results = Vec::with_capacity(files.len());
    let mut total_inserted = 0;
    let mut total_duplicates = 0;

    for (filename, data) in files {
        match parse_file(data, password.clone(), card.bank, state.categorizer.clone()).await {
            Ok((transactions, in_batch_duplicates)) => {
                let import = state.db.import_statement(card.id, &filename, &transactions)?;
                info!(
                    card_id = card.id,
                    filename = %filename,
                    inserted = import.inserted,
                    duplicates = import.duplicates + in_batch_duplicates,
                    "imported statement"
                );
                total_inserted += import.inserted;
                total_duplicates += import.duplicates + in_batch_duplicates;
                results.push(FileResult {
                    filename,
                    ok: true,
                    inserted: import.inserted,
                    duplicates: import.duplicates + in_batch_duplicates,
                    error: None,
                });
            }
            Err(e) => {
                warn!(card_id = card.id, filename = %filename, error = %e, "statement rejected");
                results.push(FileResult {
                    filename,
                    ok: false,
                    inserted: 0,
                    duplicates: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(Json(UploadResponse {
        results,
        total_inserted,
        total_duplicates,
    }))
}

/// GET /api/v1/cards/:id/statements/ - List a card's statement uploads
pub async fn list_statements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Statement>>, AppError> {
    state
        .db
        .get_card(id)?
        .ok_or_else(|| AppError::not_found(&format!("Card {} not found", id)))?;

    let statements = state.db.list_statements(id)?;
    Ok(Json(statements))
}
