use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::generation::generator::OutfitGenerator;
use crate::wardrobe::OutfitStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: OutfitGenerator,
    pub catalog: ProductCatalog,
    /// Saved outfits. Default: MemoryOutfitStore. PgOutfitStore when DATABASE_URL is set.
    pub outfits: Arc<dyn OutfitStore>,
}
