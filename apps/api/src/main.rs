mod catalog;
mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod wardrobe;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::ProductCatalog;
use crate::config::Config;
use crate::db::create_pool;
use crate::generation::generator::OutfitGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wardrobe::{MemoryOutfitStore, OutfitStore, PgOutfitStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lookbook API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    if llm.has_credential() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY not set; every outfit will use the fallback generator");
    }

    let catalog = ProductCatalog::new(config.marketplace_search_url.clone());
    let generator = OutfitGenerator::new(
        Arc::new(llm),
        catalog.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    );

    // Saved outfits: PostgreSQL when configured, in-memory otherwise
    let outfits: Arc<dyn OutfitStore> = match &config.database_url {
        Some(url) => Arc::new(PgOutfitStore::new(create_pool(url).await?)),
        None => {
            info!("DATABASE_URL not set; saved outfits are kept in memory");
            Arc::new(MemoryOutfitStore::default())
        }
    };

    let state = AppState {
        generator,
        catalog,
        outfits,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
