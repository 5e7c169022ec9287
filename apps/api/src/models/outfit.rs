use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::preferences::{Occasion, StyleTag};

/// Garment slot an item fills in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Top,
    Bottom,
    Footwear,
    Accessory,
}

impl ClothingCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ClothingCategory::Top => "top",
            ClothingCategory::Bottom => "bottom",
            ClothingCategory::Footwear => "footwear",
            ClothingCategory::Accessory => "accessory",
        }
    }
}

/// Four-slot color palette. Every slot is a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub neutral: String,
}

impl ColorPalette {
    pub fn new(primary: &str, secondary: &str, accent: &str, neutral: &str) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            neutral: neutral.to_string(),
        }
    }

    pub fn slots(&self) -> [(&'static str, &str); 4] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("neutral", self.neutral.as_str()),
        ]
    }
}

/// Returns true for `#rgb` and `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// A garment produced by either generation strategy, before marketplace enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub category: ClothingCategory,
    pub name: String,
    pub description: String,
    pub color: String,
    /// Explicit price carried over by enrichment when present.
    #[serde(default)]
    pub price: Option<String>,
}

impl ItemDraft {
    pub fn new(category: ClothingCategory, name: &str, description: String, color: &str) -> Self {
        Self {
            category,
            name: name.to_string(),
            description,
            color: color.to_string(),
            price: None,
        }
    }
}

/// Strategy-agnostic outfit content: what both the model path and the fallback
/// generator hand to post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitDraft {
    pub items: Vec<ItemDraft>,
    pub color_palette: ColorPalette,
    pub style_tips: Vec<String>,
}

/// A fully enriched garment. Only constructed by the catalog, so the
/// marketplace fields are always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: Uuid,
    pub category: ClothingCategory,
    pub name: String,
    pub description: String,
    pub color: String,
    pub product_link: String,
    pub image_url: String,
    pub price: String,
}

/// Aggregate result of one generation call. Immutable once composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecommendation {
    pub id: Uuid,
    pub items: Vec<ClothingItem>,
    pub color_palette: ColorPalette,
    pub style_tips: Vec<String>,
    pub occasion_match: Occasion,
    pub style_match: StyleTag,
    pub created_at: DateTime<Utc>,
}

impl OutfitRecommendation {
    pub fn count(&self, category: ClothingCategory) -> usize {
        self.items.iter().filter(|i| i.category == category).count()
    }

    /// At least one top, bottom and footwear plus two accessories.
    pub fn is_complete_wardrobe(&self) -> bool {
        self.count(ClothingCategory::Top) >= 1
            && self.count(ClothingCategory::Bottom) >= 1
            && self.count(ClothingCategory::Footwear) >= 1
            && self.count(ClothingCategory::Accessory) >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#e74c3c"));
        assert!(is_hex_color("#FFF"));
        assert!(!is_hex_color("e74c3c"));
        assert!(!is_hex_color("#e74c3"));
        assert!(!is_hex_color("#zzzzzz"));
        assert!(!is_hex_color("navy"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_item_draft_price_defaults_to_none() {
        let json = r##"{
            "category": "footwear",
            "name": "Suede Loafers",
            "description": "Soft loafers",
            "color": "#8b4513"
        }"##;
        let draft: ItemDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.category, ClothingCategory::Footwear);
        assert!(draft.price.is_none());
    }

    #[test]
    fn test_unknown_category_fails_deserialization() {
        let json = r##"{"category": "outerwear", "name": "Coat", "description": "", "color": "#000"}"##;
        assert!(serde_json::from_str::<ItemDraft>(json).is_err());
    }

    #[test]
    fn test_recommendation_serializes_camel_case() {
        let outfit = OutfitRecommendation {
            id: Uuid::new_v4(),
            items: vec![],
            color_palette: ColorPalette::new("#111111", "#222222", "#333333", "#444444"),
            style_tips: vec!["Keep it simple".to_string()],
            occasion_match: Occasion::Work,
            style_match: StyleTag::Minimalist,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&outfit).unwrap();
        assert_eq!(value["colorPalette"]["primary"], "#111111");
        assert_eq!(value["occasionMatch"], "work");
        assert_eq!(value["styleMatch"], "minimalist");
        assert!(value["createdAt"].is_string());
        assert!(value["styleTips"].is_array());
    }
}
