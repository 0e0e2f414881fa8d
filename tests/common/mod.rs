#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use axum::extract::{Path, Query};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use restaurant_finder::controller::{router_endpoints, AppState};
use restaurant_finder::repositories::restaurant_api::RestaurantApiRepo;
use restaurant_finder::state::options::PageOptions;
use serde_json::json;

/// Requests the fake backend received, as path plus query.
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    fn record(&self, uri: &Uri) {
        let entry = uri.path_and_query().map(|p| p.to_string()).unwrap_or_default();
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn matching(&self, prefix: &str) -> Vec<String> {
        self.entries().into_iter().filter(|e| e.starts_with(prefix)).collect()
    }
}

pub fn cafe_a() -> serde_json::Value {
    json!({
        "place_id": "p1",
        "name": "Cafe A",
        "address": "1 Market St",
        "lat": 37.788,
        "lng": -122.409,
        "rating": 4.5,
        "price_level": 2,
        "types": ["cafe", "point_of_interest", "establishment"],
        "user_ratings_total": 120,
        "photos": null
    })
}

async fn search(
    uri: Uri,
    Extension(log): Extension<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    log.record(&uri);
    if params.get("cuisine_type").map(String::as_str) == Some("fail") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "provider quota exceeded" })),
        );
    }
    (StatusCode::OK, Json(json!({ "restaurants": [cafe_a()], "count": 1 })))
}

async fn details(
    uri: Uri,
    Extension(log): Extension<RequestLog>,
    Path(place_id): Path<String>,
) -> impl IntoResponse {
    log.record(&uri);
    if place_id != "p1" {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Place not found" })));
    }
    let mut detail = cafe_a();
    detail["phone_number"] = json!("(415) 555-0100");
    detail["website"] = json!("https://cafe-a.example");
    detail["menu_url"] = json!("https://cafe-a.example/menu");
    detail["opening_hours"] = json!({ "open_now": true, "weekday_text": ["Monday: 8 AM – 5 PM"] });
    (StatusCode::OK, Json(detail))
}

async fn autocomplete(
    uri: Uri,
    Extension(log): Extension<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    log.record(&uri);
    let input = params.get("input").cloned().unwrap_or_default();
    Json(json!({
        "predictions": [
            {
                "place_id": "ChIJ-ferry",
                "description": format!("{} Ferry Building, San Francisco, CA, USA", input),
                "main_text": "Ferry Building",
                "secondary_text": "San Francisco, CA, USA"
            },
            {
                "place_id": "ChIJ-union",
                "description": "Union Square, San Francisco, CA, USA"
            }
        ]
    }))
}

async fn geocode(
    uri: Uri,
    Extension(log): Extension<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    log.record(&uri);
    match params.get("address").map(String::as_str) {
        Some("nowhere") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Address not found" })),
        ),
        Some(address) => (
            StatusCode::OK,
            Json(json!({ "lat": 37.7955, "lng": -122.3937, "formatted_address": format!("{}, CA", address) })),
        ),
        None => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": [] }))),
    }
}

async fn geocode_place(
    uri: Uri,
    Extension(log): Extension<RequestLog>,
    Path(place_id): Path<String>,
) -> impl IntoResponse {
    log.record(&uri);
    if place_id == "ChIJ-broken" {
        return (StatusCode::BAD_GATEWAY, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({ "lat": 37.7955, "lng": -122.3937, "formatted_address": "1 Ferry Building, San Francisco" })),
    )
}

async fn serve_router(router: Router) -> SocketAddr {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = axum::Server::bind(&addr).serve(router.into_make_service());
    let local_addr = server.local_addr();
    tokio::spawn(server);
    local_addr
}

/// Stands up a stand-in restaurant backend on an ephemeral port.
pub async fn spawn_backend() -> (String, RequestLog) {
    let log = RequestLog::default();
    let router = Router::new()
        .route("/restaurants", get(search))
        .route("/restaurants/:place_id", get(details))
        .route("/autocomplete", get(autocomplete))
        .route("/geocode", get(geocode))
        .route("/geocode/place/:place_id", get(geocode_place))
        .layer(Extension(log.clone()));

    let addr = serve_router(router).await;
    (format!("http://{}", addr), log)
}

pub fn api_client(base_url: &str) -> RestaurantApiRepo {
    RestaurantApiRepo::new(base_url, Duration::from_secs(5)).unwrap()
}

/// Serves the page in front of a fresh fake backend.
pub async fn spawn_app(mapbox_token: Option<&str>) -> (String, RequestLog) {
    let (backend_url, log) = spawn_backend().await;
    let app_state = AppState {
        backend: Arc::new(api_client(&backend_url)),
        options: PageOptions::default(),
        mapbox_token: mapbox_token.map(str::to_string),
    };

    let addr = serve_router(router_endpoints(app_state)).await;
    (format!("http://{}", addr), log)
}

pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
