use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

pub fn router() -> Router {
    Router::new().route("/health", get(liveness))
}

/// Does not call the restaurant backend.
async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "restaurant finder is up")
}
