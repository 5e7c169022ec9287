//! Deterministic fallback outfit — used whenever the model path fails.
//!
//! Produces the same shape as a model reply: 5 items (1 top, 1 bottom,
//! 1 footwear, 2 accessories), the occasion palette and 4 style tips.

use crate::models::outfit::{ClothingCategory, ColorPalette, ItemDraft, OutfitDraft};
use crate::models::preferences::PreferenceInput;

/// Fixed palette per occasion. Unknown occasions get the casual palette.
pub fn palette_for(occasion: &str) -> ColorPalette {
    match occasion {
        "work" => ColorPalette::new("#2c3e50", "#ecf0f1", "#3498db", "#95a5a6"),
        "party" => ColorPalette::new("#e74c3c", "#000000", "#f39c12", "#bdc3c7"),
        "formal" => ColorPalette::new("#1a1a1a", "#ffffff", "#c0392b", "#7f8c8d"),
        "date" => ColorPalette::new("#ff6b9d", "#ffeef8", "#c44569", "#f8b500"),
        "wedding" => ColorPalette::new("#d4af37", "#ffffff", "#c9a661", "#e8e8e8"),
        "sporty" => ColorPalette::new("#27ae60", "#34495e", "#e67e22", "#95a5a6"),
        _ => ColorPalette::new("#4a90e2", "#ffffff", "#f5a623", "#9b9b9b"),
    }
}

/// Builds the table-driven outfit for a preference input.
pub fn fallback_outfit(preferences: &PreferenceInput) -> OutfitDraft {
    let occasion = preferences.occasion().as_str();
    let style = preferences.primary_style().as_str();
    let skin_tone = preferences.skin_tone().as_str();
    let palette = palette_for(occasion);

    let items = vec![
        ItemDraft::new(
            ClothingCategory::Top,
            "Classic Cotton Shirt",
            format!("Perfect {style} top for {occasion} occasions"),
            &palette.primary,
        ),
        ItemDraft::new(
            ClothingCategory::Bottom,
            "Tailored Trousers",
            format!("Comfortable and stylish {style} pants"),
            &palette.neutral,
        ),
        ItemDraft::new(
            ClothingCategory::Footwear,
            "Leather Shoes",
            format!("Elegant footwear matching {occasion} style"),
            &palette.secondary,
        ),
        ItemDraft::new(
            ClothingCategory::Accessory,
            "Designer Watch",
            "Sophisticated timepiece".to_string(),
            &palette.accent,
        ),
        ItemDraft::new(
            ClothingCategory::Accessory,
            "Leather Belt",
            "Completes the outfit perfectly".to_string(),
            &palette.neutral,
        ),
    ];

    let style_tips = vec![
        format!("This outfit complements {skin_tone} skin tone beautifully"),
        format!("Perfect for {occasion} occasions with a {style} aesthetic"),
        "Accessorize minimally to let the outfit speak for itself".to_string(),
        "Consider the weather and adjust layers accordingly".to_string(),
    ];

    OutfitDraft {
        items,
        color_palette: palette,
        style_tips,
    }
}
