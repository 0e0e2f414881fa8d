use axum::{Extension, Router};
use axum::extract::Query;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::controller::AppState;
use crate::controller::page_controller::seeded_state;
use crate::models::geocode::AutocompletePrediction;
use crate::state::address_search::{AddressSearch, AddressSearchSession, Key, Resolution};
use crate::state::page::Action;
use crate::state::query::PageQuery;
use crate::views::address_search::render_suggestions;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/address/suggest", get(suggest_addresses))
        .route("/address/locate", get(locate_address))
        .route_layer(Extension(app_state))
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct SuggestParam {
    #[serde(default)]
    pub q: String,
    pub key: Option<String>,
    /// Blank when nothing is highlighted.
    pub cursor: Option<String>,
    /// The dropdown was hidden by an outside click.
    #[serde(default)]
    pub hidden: bool,
}

/// Focus on the search box, sent in place of a key.
const FOCUS: &str = "Focus";

/// Suggestion dropdown for the typed text, after applying an optional key press or focus.
pub async fn suggest_addresses(
    Extension(app_state): Extension<AppState>,
    Query(param): Query<SuggestParam>,
) -> impl IntoResponse {
    let mut session = AddressSearchSession::with_state(
        app_state.backend.clone(),
        AddressSearch::with_query(&param.q),
    );
    session.refresh_suggestions().await;

    let cursor = param.cursor.as_deref().and_then(|c| c.parse::<usize>().ok());
    let search = session.state_mut();
    search.set_cursor(cursor);
    if param.hidden {
        search.outside_click();
    }
    match param.key.as_deref() {
        Some(FOCUS) => search.focused(),
        // Enter is submitted as a form, so only cursor moves and Escape land here.
        Some(name) => {
            if let Some(key) = Key::parse(name).filter(|k| *k != Key::Enter) {
                search.key(key);
            }
        }
        None => {}
    }

    Html(render_suggestions(session.state()))
}

#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct LocateParam {
    #[serde(default)]
    pub q: String,
    pub place_id: Option<String>,
}

/// Resolves a picked suggestion or the typed text and moves the search there.
/// A failed lookup returns to the page with the text still in the box.
pub async fn locate_address(
    Extension(app_state): Extension<AppState>,
    Query(page): Query<PageQuery>,
    Query(param): Query<LocateParam>,
) -> impl IntoResponse {
    let mut session = AddressSearchSession::with_state(
        app_state.backend.clone(),
        AddressSearch::with_query(&param.q),
    );

    let found = match param.place_id.filter(|id| !id.is_empty()) {
        Some(place_id) => {
            session
                .resolve(Resolution::Suggestion(AutocompletePrediction {
                    place_id,
                    description: param.q.trim().to_string(),
                    main_text: None,
                    secondary_text: None,
                }))
                .await
        }
        None => session.submit().await,
    };

    let page = PageQuery {
        selected: None,
        detail: None,
        ..page
    };
    match found {
        Some(found) => {
            let mut state = seeded_state(&app_state.options, &page);
            state.apply(Action::LocationFound(found));
            let mut map = page.map_view(&state, &app_state.options);
            map.external_center_changed(state.center);
            Redirect::to(&PageQuery::from_state(&state, &map).href())
        }
        None => {
            debug!("Address {:?} could not be resolved", param.q);
            Redirect::to(&page.with_address(session.state().query().trim()).href())
        }
    }
}
