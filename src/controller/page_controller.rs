use axum::{Extension, Router};
use axum::extract::Query;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tracing::debug;
use crate::controller::AppState;
use crate::state::address_search::AddressSearch;
use crate::state::container::Container;
use crate::state::options::PageOptions;
use crate::state::page::{Action, PageState};
use crate::state::query::PageQuery;
use crate::views::page::PageView;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(render_page))
        .route_layer(Extension(app_state))
}

/// A page that has not mounted yet, holding the filters and panels from the URL.
pub fn seeded_state(
    options: &PageOptions,
    query: &PageQuery,
) -> PageState {
    let mut state = PageState::new(options);
    for action in query.seed_actions() {
        state.apply(action);
    }
    state
}

/// Mounts the page, runs its searches and detail fetch, and renders the result.
pub async fn load_page(
    app_state: &AppState,
    query: &PageQuery,
) -> String {
    let mut container = Container::new(
        app_state.backend.clone(),
        seeded_state(&app_state.options, query),
    );
    container.dispatch(Action::Mounted);
    for action in query.interaction_actions() {
        container.dispatch(action);
    }
    container.settle().await;

    let state = container.into_state();
    debug!(
        "Rendering {} restaurants, error: {:?}",
        state.restaurants.len(),
        state.error
    );
    let map = query.map_view(&state, &app_state.options);
    let address = AddressSearch::with_query(query.address.as_deref().unwrap_or_default());

    PageView {
        state: &state,
        map: &map,
        address: &address,
        layout: app_state.options.layout,
        mapbox_token: app_state.mapbox_token.as_deref(),
    }
    .render()
}

pub async fn render_page(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    Html(load_page(&app_state, &query).await)
}
