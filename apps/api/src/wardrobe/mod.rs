//! Saved outfits — append-only collection, de-duplicated by recommendation id.
//!
//! `AppState` holds an `Arc<dyn OutfitStore>`: in-memory by default,
//! PostgreSQL when `DATABASE_URL` is configured.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::outfit::OutfitRecommendation;

pub mod handlers;

#[async_trait]
pub trait OutfitStore: Send + Sync {
    /// Appends `outfit` unless its id is already saved. Returns whether it was appended.
    async fn save(&self, outfit: &OutfitRecommendation) -> Result<bool, AppError>;

    /// All saved outfits in the order they were saved.
    async fn list(&self) -> Result<Vec<OutfitRecommendation>, AppError>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryOutfitStore {
    outfits: RwLock<Vec<OutfitRecommendation>>,
}

#[async_trait]
impl OutfitStore for MemoryOutfitStore {
    async fn save(&self, outfit: &OutfitRecommendation) -> Result<bool, AppError> {
        let mut outfits = self.outfits.write().await;
        if outfits.iter().any(|o| o.id == outfit.id) {
            return Ok(false);
        }
        outfits.push(outfit.clone());
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<OutfitRecommendation>, AppError> {
        Ok(self.outfits.read().await.clone())
    }
}

/// PostgreSQL-backed store; see `migrations/` for the `saved_outfits` table.
pub struct PgOutfitStore {
    pool: PgPool,
}

impl PgOutfitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutfitStore for PgOutfitStore {
    async fn save(&self, outfit: &OutfitRecommendation) -> Result<bool, AppError> {
        // Append-only: existing rows are never updated
        let result = sqlx::query(
            r#"
            INSERT INTO saved_outfits (id, outfit, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(outfit.id)
        .bind(Json(outfit))
        .bind(outfit.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self) -> Result<Vec<OutfitRecommendation>, AppError> {
        let rows: Vec<(Json<OutfitRecommendation>,)> =
            sqlx::query_as("SELECT outfit FROM saved_outfits ORDER BY seq")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(Json(outfit),)| outfit).collect())
    }
}
