use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::restaurant_api::RestaurantBackend;
use crate::state::options::PageOptions;

pub mod address_controller;
pub mod health_check;
pub mod map_controller;
pub mod page_controller;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn RestaurantBackend>,
    pub options: PageOptions,
    pub mapbox_token: Option<String>,
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let origins = config
        .origin_urls
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid origin url: {}", s))
        })
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        );

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Restaurant finder listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the restaurant finder server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(page_controller::router(app_state.clone()))
        .merge(address_controller::router(app_state.clone()))
        .merge(map_controller::router(app_state))
        .merge(health_check::router())
        .fallback(page_not_found_handler)
}
