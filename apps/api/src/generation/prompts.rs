// All LLM prompt constants for the outfit generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::models::preferences::PreferenceInput;

/// Persona line prepended to the shared JSON-only system fragment.
const STYLIST_PERSONA: &str = "You are a professional fashion stylist AI.";

/// Outfit generation prompt template.
/// Replace: {skin_tone}, {event_type}, {styles}
pub const OUTFIT_PROMPT_TEMPLATE: &str = r##"You are a professional fashion stylist AI. Generate a complete outfit recommendation based on the following criteria:

Skin Tone: {skin_tone}
Event Type: {event_type}
Style Preferences: {styles}

Please provide a detailed outfit recommendation in the following JSON format:
{
  "items": [
    {
      "category": "top" | "bottom" | "footwear" | "accessory",
      "name": "Item name",
      "description": "Detailed description",
      "color": "#hexcode"
    }
  ],
  "colorPalette": {
    "primary": "#hexcode",
    "secondary": "#hexcode",
    "accent": "#hexcode",
    "neutral": "#hexcode"
  },
  "styleTips": ["tip1", "tip2", "tip3"]
}

Requirements:
- Include at least 1 top, 1 bottom, 1 footwear, and 2 accessories
- Colors should complement the {skin_tone} skin tone
- Style should match {event_type} event and {styles} aesthetic
- Provide 3-5 actionable style tips
- Every color must be a hex code like #1a2b3c
- Be creative but practical

Return ONLY the JSON object, no additional text."##;

/// System prompt for outfit generation.
pub fn outfit_system() -> String {
    format!("{STYLIST_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Renders the outfit prompt for one preference input.
pub fn build_outfit_prompt(preferences: &PreferenceInput) -> String {
    let styles = preferences
        .styles()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    OUTFIT_PROMPT_TEMPLATE
        .replace("{skin_tone}", preferences.skin_tone().as_str())
        .replace("{event_type}", preferences.occasion().as_str())
        .replace("{styles}", &styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preferences::{Occasion, SkinTone, StyleTag};

    #[test]
    fn test_prompt_embeds_all_preferences() {
        let prefs = PreferenceInput::new(
            SkinTone::VeryLight,
            Occasion::Wedding,
            vec![StyleTag::Chic, StyleTag::Vintage],
        )
        .unwrap();
        let prompt = build_outfit_prompt(&prefs);

        assert!(prompt.contains("Skin Tone: very-light"));
        assert!(prompt.contains("Event Type: wedding"));
        assert!(prompt.contains("Style Preferences: chic, vintage"));
        assert!(prompt.contains("complement the very-light skin tone"));
        assert!(!prompt.contains("{skin_tone}"));
        assert!(!prompt.contains("{styles}"));
    }

    #[test]
    fn test_prompt_describes_output_shape() {
        let prefs =
            PreferenceInput::new(SkinTone::Tan, Occasion::Work, vec![StyleTag::Minimalist])
                .unwrap();
        let prompt = build_outfit_prompt(&prefs);
        assert!(prompt.contains("\"colorPalette\""));
        assert!(prompt.contains("\"styleTips\""));
        assert!(prompt.contains("3-5 actionable style tips"));
    }

    #[test]
    fn test_system_prompt_is_json_only() {
        assert!(outfit_system().contains("valid JSON only"));
    }
}
