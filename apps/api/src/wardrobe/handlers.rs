use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::outfit::OutfitRecommendation;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SaveOutfitResponse {
    pub id: Uuid,
    pub saved: bool,
}

/// POST /api/v1/outfits/saved
///
/// 201 when appended, 200 when the outfit was already saved.
pub async fn handle_save_outfit(
    State(state): State<AppState>,
    payload: Result<Json<OutfitRecommendation>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveOutfitResponse>), AppError> {
    let Json(outfit) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    if outfit.items.is_empty() {
        return Err(AppError::Validation("outfit has no items".to_string()));
    }

    let saved = state.outfits.save(&outfit).await?;
    let status = if saved {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(SaveOutfitResponse {
            id: outfit.id,
            saved,
        }),
    ))
}

/// GET /api/v1/outfits/saved
pub async fn handle_list_saved_outfits(
    State(state): State<AppState>,
) -> Result<Json<Vec<OutfitRecommendation>>, AppError> {
    Ok(Json(state.outfits.list().await?))
}
