//! Model response parsing — raw model text in, validated `OutfitDraft` or a typed
//! failure out. Nothing unvalidated reaches enrichment.

use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::{json_object_candidates, LlmError};
use crate::models::outfit::{is_hex_color, ColorPalette, ItemDraft, OutfitDraft};

/// Why the model path could not produce an outfit. Consumed only by fallback selection.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model call timed out after {0}s")]
    Timeout(u64),

    #[error("no JSON object found in model response")]
    NoJsonObject,

    #[error("model JSON did not match the outfit shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid outfit: {0}")]
    Shape(String),
}

/// Wire shape the prompt asks the model for.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelOutfit {
    items: Vec<ItemDraft>,
    color_palette: ColorPalette,
    style_tips: Vec<String>,
}

/// Extracts, deserializes and validates a model reply.
///
/// The first brace span that is valid JSON is the reply; spans that are not
/// JSON at all are prose and get skipped. Once a span parses, it must match the
/// outfit shape or the whole reply is rejected.
pub fn parse_outfit_response(text: &str) -> Result<OutfitDraft, GenerationError> {
    let mut first_error = None;
    for candidate in json_object_candidates(text) {
        match serde_json::from_str::<serde_json::Value>(candidate) {
            Ok(value) => {
                let outfit: ModelOutfit = serde_json::from_value(value)?;
                return validate(outfit);
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    Err(first_error.map_or(GenerationError::NoJsonObject, GenerationError::Json))
}

fn validate(outfit: ModelOutfit) -> Result<OutfitDraft, GenerationError> {
    if outfit.items.is_empty() {
        return Err(GenerationError::Shape("no items".to_string()));
    }

    for (index, item) in outfit.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(GenerationError::Shape(format!("item {index} has no name")));
        }
        if !is_hex_color(item.color.trim()) {
            return Err(GenerationError::Shape(format!(
                "item {index} color '{}' is not a hex color",
                item.color
            )));
        }
    }

    for (slot, color) in outfit.color_palette.slots() {
        if !is_hex_color(color.trim()) {
            return Err(GenerationError::Shape(format!(
                "palette {slot} '{color}' is not a hex color"
            )));
        }
    }

    let style_tips: Vec<String> = outfit
        .style_tips
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if style_tips.is_empty() {
        return Err(GenerationError::Shape("no style tips".to_string()));
    }

    let items: Vec<ItemDraft> = outfit
        .items
        .into_iter()
        .map(|item| ItemDraft {
            name: item.name.trim().to_string(),
            color: item.color.trim().to_string(),
            ..item
        })
        .collect();

    Ok(OutfitDraft {
        items,
        color_palette: ColorPalette::new(
            outfit.color_palette.primary.trim(),
            outfit.color_palette.secondary.trim(),
            outfit.color_palette.accent.trim(),
            outfit.color_palette.neutral.trim(),
        ),
        style_tips,
    })
}
