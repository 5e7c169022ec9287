//! Axum route handlers for the Generation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::outfit::OutfitRecommendation;
use crate::models::preferences::PreferenceInput;
use crate::state::AppState;

/// Points credited to the user for every generated outfit.
/// Consumed by the client's points/leveling module.
pub const POINTS_PER_OUTFIT: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Raw request body. Every field is optional on the wire so missing and null
/// values surface as validation errors rather than extractor rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateOutfitRequest {
    pub skin_tone: Option<String>,
    pub event_type: Option<String>,
    pub style_preferences: Option<Vec<String>>,
}

impl GenerateOutfitRequest {
    pub fn into_preferences(self) -> Result<PreferenceInput, AppError> {
        PreferenceInput::from_labels(
            self.skin_tone.as_deref().unwrap_or_default(),
            self.event_type.as_deref().unwrap_or_default(),
            self.style_preferences.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutfitResponse {
    pub outfit: OutfitRecommendation,
    pub points_earned: u32,
    /// Leveling lives with the client's points module; the endpoint never levels up.
    pub level_up: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/outfits/generate
///
/// Validates preferences, then runs the generation pipeline. Model failures are
/// absorbed by the fallback generator, so only bad requests produce an error.
pub async fn handle_generate_outfit(
    State(state): State<AppState>,
    payload: Result<Json<GenerateOutfitRequest>, JsonRejection>,
) -> Result<Json<GenerateOutfitResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let preferences = request.into_preferences()?;

    let mut rng = StdRng::from_os_rng();
    let outfit = state.generator.generate(&preferences, &mut rng).await;

    Ok(Json(GenerateOutfitResponse {
        outfit,
        points_earned: POINTS_PER_OUTFIT,
        level_up: false,
    }))
}
