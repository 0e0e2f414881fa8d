use crate::helpers::html::escape;
use crate::state::address_search::AddressSearch;
use crate::state::map_view::MapView;
use crate::state::options::Layout;
use crate::state::page::PageState;
use crate::state::query::PageQuery;
use crate::views::address_search::render_address_search;
use crate::views::detail::render_detail;
use crate::views::filters::render_filters;
use crate::views::map::render_map;
use crate::views::restaurant_list::render_restaurant_list;

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f3f4f6; color: #111827; }
.page { height: 100vh; display: flex; flex-direction: column; }
.top { background: #fff; border-bottom: 1px solid #e5e7eb; padding: 16px 24px; }
.top h1 { margin: 0; font-size: 24px; }
.top p { margin: 4px 0 12px; color: #4b5563; font-size: 14px; }
.main { flex: 1; display: flex; overflow: hidden; }
.sidebar { width: 384px; display: flex; flex-direction: column; overflow: hidden; background: #f9fafb; }
.list { flex: 1; overflow-y: auto; padding: 16px; }
.panel-title { display: flex; justify-content: space-between; padding: 12px 16px 8px; font-size: 12px; font-weight: 600; text-transform: uppercase; color: #6b7280; border-bottom: 1px solid #e5e7eb; }
.error { margin-bottom: 16px; padding: 12px; background: #fef2f2; border: 1px solid #fecaca; color: #b91c1c; border-radius: 8px; }
.restaurants { list-style: none; margin: 0; padding: 0; }
.restaurant { padding: 16px; margin-bottom: 8px; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff; }
.restaurant.selected { border-color: #3b82f6; background: #eff6ff; }
.map-area { flex: 1; position: relative; }
.map, .map-placeholder { width: 100%; height: 100%; }
.map-placeholder { display: flex; align-items: center; justify-content: center; background: #e5e7eb; }
.updating { position: absolute; top: 16px; left: 16px; z-index: 10; background: #fff; padding: 8px 16px; border-radius: 8px; }
.marker { width: 24px; height: 24px; border-radius: 50%; border: 2px solid #fff; background: #ef4444; cursor: pointer; }
.marker.selected { background: #2563eb; transform: scale(1.25); }
.suggestion.active { background: #f3f4f6; }
.suggestions.hidden { display: none; }
.modal { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; z-index: 50; }
.modal-body { background: #fff; border-radius: 8px; max-width: 672px; width: 100%; max-height: 90vh; overflow-y: auto; padding: 24px; }
.open { color: #16a34a; font-weight: 600; }
.closed { color: #dc2626; font-weight: 600; }
"#;

/// Everything a full page render needs.
pub struct PageView<'a> {
    pub state: &'a PageState,
    pub map: &'a MapView,
    pub address: &'a AddressSearch,
    pub layout: Layout,
    pub mapbox_token: Option<&'a str>,
}

impl PageView<'_> {
    pub fn render(&self) -> String {
        let state = self.state;
        let query = PageQuery::from_state(state, self.map);
        let collapsible = self.layout == Layout::Collapsible;

        let header = if state.panels.show_header || !collapsible {
            let hide = if collapsible {
                format!(
                    r#"<a class="toggle" href="{}" aria-label="Hide header">×</a>"#,
                    escape(&query.with_header(false).href())
                )
            } else {
                String::new()
            };
            format!(
                r#"<header class="top"><h1>Restaurant Finder</h1>{}<p>Discover restaurants with accurate filters</p>{}</header>"#,
                hide,
                render_address_search(self.address, &query)
            )
        } else {
            format!(
                r#"<a class="toggle show-header" href="{}" aria-label="Show header">Show header (and search bar) ⌃</a>"#,
                escape(&query.with_header(true).href())
            )
        };

        let filters = if state.panels.show_filters || !collapsible {
            let close = if collapsible {
                format!(
                    r#"<a class="toggle" href="{}" aria-label="Close filters">×</a>"#,
                    escape(&query.with_filters(false).href())
                )
            } else {
                String::new()
            };
            format!(
                r#"<div class="filters-panel"><div class="panel-title"><span>Filters</span>{}</div>{}</div>"#,
                close,
                render_filters(state, &query)
            )
        } else {
            format!(
                r#"<a class="toggle show-filters" href="{}" aria-label="Show filters">Filters ⌃</a>"#,
                escape(&query.with_filters(true).href())
            )
        };

        let error = state
            .error
            .as_deref()
            .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
            .unwrap_or_default();

        let list = if state.loading() && state.restaurants.is_empty() {
            r#"<div class="loading">Loading restaurants...</div>"#.to_string()
        } else {
            render_restaurant_list(state, &query)
        };

        let updating = if state.loading() && !state.restaurants.is_empty() {
            r#"<div class="updating"><p>Updating results...</p></div>"#
        } else {
            ""
        };

        let modal = state
            .loaded_detail()
            .map(|detail| render_detail(detail, &query.with_detail(None).href()))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Restaurant Finder</title>
<style>{styles}</style>
</head>
<body>
<div class="page">
{header}
<div class="main">
<aside class="sidebar">
{filters}
<div class="panel-title"><span>Restaurants ({count})</span></div>
<div class="list">{error}{list}</div>
</aside>
<div class="map-area">{updating}{map}</div>
</div>
{modal}
</div>
</body>
</html>"#,
            styles = STYLES,
            header = header,
            filters = filters,
            count = state.restaurants.len(),
            error = error,
            list = list,
            updating = updating,
            map = render_map(state, self.map, &query, self.mapbox_token),
            modal = modal,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::models::restaurant::{Restaurant, SearchResponse};
    use crate::state::options::PageOptions;
    use crate::state::page::Action;
    use super::*;

    fn rendered(state: &PageState, layout: Layout) -> String {
        let map = MapView::new(state.center, 13.0);
        let address = AddressSearch::default();
        PageView {
            state,
            map: &map,
            address: &address,
            layout,
            mapbox_token: None,
        }
        .render()
    }

    fn results() -> SearchResponse {
        SearchResponse {
            restaurants: vec![Restaurant {
                place_id: "p1".to_string(),
                name: "Cafe A".to_string(),
                address: None,
                lat: 37.788,
                lng: -122.409,
                rating: Some(4.5),
                price_level: None,
                types: vec![],
                user_ratings_total: None,
                photos: None,
            }],
            count: 1,
        }
    }

    #[test]
    fn loading_placeholder_before_first_results() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::Mounted);

        let html = rendered(&state, Layout::Collapsible);

        assert!(html.contains("Loading restaurants..."));
        assert!(html.contains("Restaurants (0)"));
        assert!(html.contains("Searching..."));
    }

    #[test]
    fn updating_banner_over_existing_results() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::Mounted);
        state.apply(Action::SearchSucceeded(results()));
        state.apply(Action::SearchRequested);

        let html = rendered(&state, Layout::Collapsible);

        assert!(html.contains("Updating results..."));
        assert!(html.contains("Restaurants (1)"));
        assert!(!html.contains("Loading restaurants..."));
    }

    #[test]
    fn error_banner_shows_the_message() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::Mounted);
        state.apply(Action::SearchFailed("provider quota exceeded".to_string()));

        let html = rendered(&state, Layout::Collapsible);

        assert!(html.contains(r#"<div class="error">provider quota exceeded</div>"#));
        assert!(html.contains("No restaurants found"));
    }

    #[test]
    fn collapsed_panels_offer_a_way_back() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::HeaderToggled(false));
        state.apply(Action::FiltersToggled(false));

        let html = rendered(&state, Layout::Collapsible);

        assert!(html.contains("Show header (and search bar)"));
        assert!(html.contains(r#"aria-label="Show filters""#));
        assert!(!html.contains("Search Radius"));
    }

    #[test]
    fn fixed_layout_always_shows_panels() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::HeaderToggled(false));
        state.apply(Action::FiltersToggled(false));

        let html = rendered(&state, Layout::Fixed);

        assert!(html.contains("<h1>Restaurant Finder</h1>"));
        assert!(html.contains("Search Radius"));
        assert!(!html.contains("Hide header"));
        assert!(!html.contains("Close filters"));
    }
}
