pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers::handle_search_products;
use crate::generation::handlers::handle_generate_outfit;
use crate::state::AppState;
use crate::wardrobe::handlers::{handle_list_saved_outfits, handle_save_outfit};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/outfits/generate", post(handle_generate_outfit))
        // Saved outfits
        .route(
            "/api/v1/outfits/saved",
            get(handle_list_saved_outfits).post(handle_save_outfit),
        )
        // Mock marketplace
        .route("/api/v1/products/search", get(handle_search_products))
        .with_state(state)
}
