use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};
use restaurant_finder::config::Config;
use restaurant_finder::controller::{self, AppState};
use restaurant_finder::repositories::restaurant_api::RestaurantApiRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!("Starting restaurant finder in {} mode", config.environment);

    let backend = RestaurantApiRepo::new(&config.api_url, config.request_timeout())
        .context("Failed to set up the restaurant backend client")?;
    info!("Using restaurant backend at {}", backend.base_url());

    let mapbox_token = config.map_token();
    if mapbox_token.is_none() {
        warn!("MAPBOX_TOKEN is not set, the map will show a placeholder");
    }

    let app_state = AppState {
        backend: Arc::new(backend),
        options: config.page_options(),
        mapbox_token,
    };

    controller::serve(app_state, &config).await
}
