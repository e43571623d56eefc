use axum::{
    Router,
    routing::{get, post},
};
use policy::tiers::TierTable;
use policy::withdrawal::MultiplierPolicy;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

mod config;
mod middleware;
mod models;
mod response;
mod routes;

use config::Config;
use models::{GameConfig, InMemoryStorage};
use routes::credentials::get_credentials;
use routes::magic_link::create_magic_link;
use routes::referral::get_referral;
use routes::withdrawal::preview_withdrawal;

// Application state: configuration snapshot, persistence handle and the
// compiled-in tier table. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: InMemoryStorage,
    pub tiers: Arc<TierTable>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Arc::new(Config::from_env()?);

    // Initialize in-memory storage
    let storage = InMemoryStorage::new();
    tracing::info!("In-memory storage initialized successfully");

    // Seed the game catalog with per-game withdrawal multiplier policies
    storage.insert_game(GameConfig {
        game_name: "fortune-gems".to_string(),
        display_name: "Fortune Gems".to_string(),
        multipliers: config.default_multipliers(),
    });
    storage.insert_game(GameConfig {
        game_name: "super-ace".to_string(),
        display_name: "Super Ace".to_string(),
        multipliers: MultiplierPolicy {
            min_multiplier: 1.0,
            max_multiplier: 5.0,
        },
    });

    let state = AppState {
        config: config.clone(),
        storage,
        tiers: Arc::new(TierTable::default()),
    };

    // build our application with routes
    let app = Router::new()
        .route("/", get(root))
        .route("/user/{user_id}/credentials", get(get_credentials))
        .route("/user/{user_id}/referral", get(get_referral))
        .route("/magic-link", post(create_magic_link))
        .route("/withdrawal/preview", post(preview_withdrawal))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Server running on http://0.0.0.0:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn root() -> &'static str {
    "Bot Resource API"
}
