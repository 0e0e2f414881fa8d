use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use tracing::debug;

/// Anything outside the page, address and map routes.
pub async fn page_not_found_handler(uri: Uri) -> impl IntoResponse {
    debug!("No route for {}", uri.path());
    (StatusCode::IM_A_TEAPOT, "Oops looks like you wandered off the menu, teapot")
}
