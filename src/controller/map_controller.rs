use axum::{Extension, Router};
use axum::extract::Query;
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use tracing::debug;
use crate::controller::AppState;
use crate::controller::page_controller::seeded_state;
use crate::models::location::{LatLng, Viewport};
use crate::state::map_view::MapView;
use crate::state::page::Action;
use crate::state::query::PageQuery;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/map/move", get(report_map_move))
        .route_layer(Extension(app_state))
}

/// The map was panned or zoomed. `view_lat`, `view_lng` and `zoom` carry the new viewport.
pub async fn report_map_move(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let mut state = seeded_state(&app_state.options, &query);
    state.apply(Action::RestaurantSelected(query.selected.clone()));

    let zoom = query.zoom.unwrap_or(app_state.options.default_zoom);
    let mut map = MapView::new(state.center, zoom);
    if let (Some(lat), Some(lng)) = (query.view_lat, query.view_lng) {
        let moved_to = Viewport::new(LatLng::new(lat, lng), zoom);
        if let Some(center) = map.user_moved(moved_to) {
            debug!("Map pan moved the search center to ({}, {})", center.lat, center.lng);
            state.apply(Action::CenterChanged(center));
            map.external_center_changed(center);
        }
    }

    Redirect::to(&PageQuery::from_state(&state, &map).href())
}
