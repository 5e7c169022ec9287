//! Preference Input — the typed questionnaire answers that drive one generation call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Skin-tone category picked during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    VeryLight,
    Light,
    Medium,
    Tan,
    Dark,
}

/// The event an outfit is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occasion {
    Casual,
    Work,
    Party,
    Formal,
    Date,
    Wedding,
    Sporty,
}

/// Style-descriptor tag. Users pick one or more, ranked by selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    Minimalist,
    Trendy,
    Bold,
    Chic,
    Sporty,
    Vintage,
}

impl SkinTone {
    pub const ALL: [SkinTone; 5] = [
        SkinTone::VeryLight,
        SkinTone::Light,
        SkinTone::Medium,
        SkinTone::Tan,
        SkinTone::Dark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkinTone::VeryLight => "very-light",
            SkinTone::Light => "light",
            SkinTone::Medium => "medium",
            SkinTone::Tan => "tan",
            SkinTone::Dark => "dark",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl Occasion {
    pub const ALL: [Occasion; 7] = [
        Occasion::Casual,
        Occasion::Work,
        Occasion::Party,
        Occasion::Formal,
        Occasion::Date,
        Occasion::Wedding,
        Occasion::Sporty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Work => "work",
            Occasion::Party => "party",
            Occasion::Formal => "formal",
            Occasion::Date => "date",
            Occasion::Wedding => "wedding",
            Occasion::Sporty => "sporty",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == label)
    }
}

impl StyleTag {
    pub const ALL: [StyleTag; 6] = [
        StyleTag::Minimalist,
        StyleTag::Trendy,
        StyleTag::Bold,
        StyleTag::Chic,
        StyleTag::Sporty,
        StyleTag::Vintage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleTag::Minimalist => "minimalist",
            StyleTag::Trendy => "trendy",
            StyleTag::Bold => "bold",
            StyleTag::Chic => "chic",
            StyleTag::Sporty => "sporty",
            StyleTag::Vintage => "vintage",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable preference tuple for a single generation request.
///
/// `styles` is never empty; construction goes through [`PreferenceInput::new`]
/// or [`PreferenceInput::from_labels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceInput {
    skin_tone: SkinTone,
    occasion: Occasion,
    styles: Vec<StyleTag>,
}

impl PreferenceInput {
    pub fn new(
        skin_tone: SkinTone,
        occasion: Occasion,
        styles: Vec<StyleTag>,
    ) -> Result<Self, AppError> {
        if styles.is_empty() {
            return Err(AppError::Validation(
                "stylePreferences must contain at least one style".to_string(),
            ));
        }
        Ok(Self {
            skin_tone,
            occasion,
            styles,
        })
    }

    /// Builds a preference input from raw request labels, rejecting missing,
    /// empty or unknown values.
    pub fn from_labels(
        skin_tone: &str,
        occasion: &str,
        styles: &[String],
    ) -> Result<Self, AppError> {
        let skin_tone = required(skin_tone, "skinTone")?;
        let occasion = required(occasion, "eventType")?;
        if styles.is_empty() || styles.iter().all(|s| s.trim().is_empty()) {
            return Err(AppError::Validation(
                "Missing required field: stylePreferences".to_string(),
            ));
        }

        let skin_tone = SkinTone::parse(skin_tone)
            .ok_or_else(|| AppError::Validation(format!("Unknown skinTone '{skin_tone}'")))?;
        let occasion = Occasion::parse(occasion)
            .ok_or_else(|| AppError::Validation(format!("Unknown eventType '{occasion}'")))?;

        let mut tags = Vec::with_capacity(styles.len());
        for label in styles.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let tag = StyleTag::parse(label).ok_or_else(|| {
                AppError::Validation(format!("Unknown stylePreference '{label}'"))
            })?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self::new(skin_tone, occasion, tags)
    }

    pub fn skin_tone(&self) -> SkinTone {
        self.skin_tone
    }

    pub fn occasion(&self) -> Occasion {
        self.occasion
    }

    pub fn styles(&self) -> &[StyleTag] {
        &self.styles
    }

    /// The first-ranked style tag.
    pub fn primary_style(&self) -> StyleTag {
        // non-empty by construction
        self.styles[0]
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(value)
}
