//! Outfit Generation — orchestrates the full request pipeline.
//!
//! Flow: build prompt → model call (bounded by timeout) → extract + validate JSON
//!       → on any failure, deterministic fallback → assign ids/timestamp → enrich.
//!
//! The caller always receives a complete, fully enriched recommendation.
//! Partially parsed model output is never reused: a failure discards it and the
//! fallback builds the outfit from scratch.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::ProductCatalog;
use crate::generation::fallback::fallback_outfit;
use crate::generation::prompts::{build_outfit_prompt, outfit_system};
use crate::generation::response::{parse_outfit_response, GenerationError};
use crate::llm_client::TextGenerator;
use crate::models::outfit::{OutfitDraft, OutfitRecommendation};
use crate::models::preferences::PreferenceInput;

/// Which strategy produced the outfit content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitSource {
    Model,
    Fallback,
}

/// The Prompt/Response Adapter plus enrichment, wired with explicit collaborators.
#[derive(Clone)]
pub struct OutfitGenerator {
    llm: Arc<dyn TextGenerator>,
    catalog: ProductCatalog,
    timeout: Duration,
}

impl OutfitGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, catalog: ProductCatalog, timeout: Duration) -> Self {
        Self {
            llm,
            catalog,
            timeout,
        }
    }

    /// Generates one recommendation. Never fails: model problems fall back.
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        preferences: &PreferenceInput,
        rng: &mut R,
    ) -> OutfitRecommendation {
        self.generate_with_source(preferences, rng).await.0
    }

    /// Like [`generate`](Self::generate), also reporting which strategy ran.
    pub async fn generate_with_source<R: Rng + ?Sized>(
        &self,
        preferences: &PreferenceInput,
        rng: &mut R,
    ) -> (OutfitRecommendation, OutfitSource) {
        let (draft, source) = match self.generate_with_model(preferences).await {
            Ok(draft) => (draft, OutfitSource::Model),
            Err(e) => {
                warn!(
                    occasion = %preferences.occasion(),
                    "Model outfit generation failed, using fallback: {e}"
                );
                (fallback_outfit(preferences), OutfitSource::Fallback)
            }
        };

        let outfit = self.compose(preferences, draft, rng);
        // The model path trusts composition; a short wardrobe is logged, not rejected
        if source == OutfitSource::Model && !outfit.is_complete_wardrobe() {
            warn!(outfit_id = %outfit.id, "Model outfit is missing requested garment slots");
        }
        info!(
            outfit_id = %outfit.id,
            source = ?source,
            items = outfit.items.len(),
            "Generated outfit for {} / {}",
            outfit.occasion_match,
            outfit.style_match
        );
        (outfit, source)
    }

    async fn generate_with_model(
        &self,
        preferences: &PreferenceInput,
    ) -> Result<OutfitDraft, GenerationError> {
        let prompt = build_outfit_prompt(preferences);
        let system = outfit_system();

        let text = tokio::time::timeout(self.timeout, self.llm.complete(&prompt, &system))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout.as_secs()))??;

        parse_outfit_response(&text)
    }

    /// Post-processing shared by both strategies.
    fn compose<R: Rng + ?Sized>(
        &self,
        preferences: &PreferenceInput,
        draft: OutfitDraft,
        rng: &mut R,
    ) -> OutfitRecommendation {
        let items = draft
            .items
            .into_iter()
            .map(|item| self.catalog.enrich(Uuid::new_v4(), item, rng))
            .collect();

        OutfitRecommendation {
            id: Uuid::new_v4(),
            items,
            color_palette: draft.color_palette,
            style_tips: draft.style_tips,
            occasion_match: preferences.occasion(),
            style_match: preferences.primary_style(),
            created_at: Utc::now(),
        }
    }
}
