use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use mtg_board_state::{BoardStateError, DeckPayload};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FetchDeckParams {
    pub url: Option<String>,
}

/// GET /api/fetch-deck?url=https://www.moxfield.com/decks/abc123
///
/// Fetch a deck from Moxfield or Archidekt and return it as
/// `{"name": ..., "list": "<qty> <name>\n..."}`.
pub async fn fetch_deck(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchDeckParams>,
) -> Result<Json<DeckPayload>, AppError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(BoardStateError::MissingParameter)?;

    log::info!("fetch-deck {}", url);
    let deck = state.importer.normalize(&url).await.map_err(|e| {
        log::error!("fetch-deck {} failed: {}", url, e);
        AppError::from(e)
    })?;

    Ok(Json(deck))
}
