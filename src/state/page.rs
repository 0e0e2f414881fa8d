//! Page state and its transitions.
//!
//! `PageState::apply` is the only way the page changes. It never performs I/O;
//! instead it returns the [`Effect`] the caller has to run, and the outcome of
//! that effect comes back in as another [`Action`].

use tracing::info;
use crate::models::geocode::LocationFound;
use crate::models::location::LatLng;
use crate::models::price::PriceLevel;
use crate::models::restaurant::{Restaurant, RestaurantDetail, SearchResponse};
use crate::models::search::{Radius, SearchParams};
use crate::state::options::PageOptions;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Mounted,
    CenterChanged(LatLng),
    RadiusChanged(Radius),
    MaxPriceChanged(Option<PriceLevel>),
    CuisineChanged(String),
    /// The search button, runs even when nothing changed.
    SearchRequested,
    SearchSucceeded(SearchResponse),
    SearchFailed(String),
    RestaurantSelected(Option<String>),
    DetailRequested(String),
    DetailSucceeded(Box<RestaurantDetail>),
    DetailFailed(String),
    DetailClosed,
    HeaderToggled(bool),
    FiltersToggled(bool),
    LocationFound(LocationFound),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Search(SearchParams),
    FetchDetail(String),
    ResizeMap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum DetailPhase {
    #[default]
    Idle,
    Fetching(String),
    Loaded(Box<RestaurantDetail>),
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panels {
    pub show_header: bool,
    pub show_filters: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            show_header: true,
            show_filters: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    pub restaurants: Vec<Restaurant>,
    pub selected: Option<String>,
    pub detail: DetailPhase,
    pub search: SearchPhase,
    pub error: Option<String>,
    pub center: LatLng,
    pub radius: Radius,
    pub max_price: Option<PriceLevel>,
    pub cuisine_type: String,
    pub panels: Panels,
    mounted: bool,
}

impl PageState {
    pub fn new(options: &PageOptions) -> Self {
        Self {
            restaurants: Vec::new(),
            selected: None,
            detail: DetailPhase::Idle,
            search: SearchPhase::Idle,
            error: None,
            center: options.default_center,
            radius: options.default_radius,
            max_price: None,
            cuisine_type: String::new(),
            panels: Panels::default(),
            mounted: false,
        }
    }

    pub fn loading(&self) -> bool {
        self.search == SearchPhase::Searching || matches!(self.detail, DetailPhase::Fetching(_))
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams::new(self.center, self.radius)
            .with_max_price(self.max_price)
            .with_cuisine(&self.cuisine_type)
    }

    /// The selected result, if it is part of the current result set.
    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        let selected = self.selected.as_deref()?;
        self.restaurants.iter().find(|r| r.place_id == selected)
    }

    pub fn is_selected(&self, place_id: &str) -> bool {
        self.selected.as_deref() == Some(place_id)
    }

    pub fn loaded_detail(&self) -> Option<&RestaurantDetail> {
        match &self.detail {
            DetailPhase::Loaded(detail) => Some(&**detail),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Mounted => {
                if self.mounted {
                    return None;
                }
                self.mounted = true;
                Some(self.start_search())
            }
            Action::CenterChanged(center) => {
                let changed = self.center != center;
                self.center = center;
                self.search_if(changed)
            }
            Action::RadiusChanged(radius) => {
                let changed = self.radius != radius;
                self.radius = radius;
                self.search_if(changed)
            }
            Action::MaxPriceChanged(max_price) => {
                let changed = self.max_price != max_price;
                self.max_price = max_price;
                self.search_if(changed)
            }
            Action::CuisineChanged(cuisine_type) => {
                let changed = self.cuisine_type != cuisine_type;
                self.cuisine_type = cuisine_type;
                self.search_if(changed)
            }
            Action::SearchRequested => Some(self.start_search()),
            Action::SearchSucceeded(response) => {
                self.restaurants = response.restaurants;
                self.error = None;
                self.search = SearchPhase::Ready;
                None
            }
            Action::SearchFailed(message) => {
                self.restaurants.clear();
                self.error = Some(message);
                self.search = SearchPhase::Failed;
                None
            }
            Action::RestaurantSelected(place_id) => {
                self.selected = place_id;
                None
            }
            Action::DetailRequested(place_id) => {
                self.error = None;
                self.detail = DetailPhase::Fetching(place_id.clone());
                Some(Effect::FetchDetail(place_id))
            }
            Action::DetailSucceeded(detail) => {
                self.detail = DetailPhase::Loaded(detail);
                None
            }
            Action::DetailFailed(message) => {
                self.error = Some(message);
                self.detail = DetailPhase::Failed;
                None
            }
            Action::DetailClosed => {
                self.detail = DetailPhase::Idle;
                None
            }
            Action::HeaderToggled(show) => {
                let changed = self.panels.show_header != show;
                self.panels.show_header = show;
                changed.then_some(Effect::ResizeMap)
            }
            Action::FiltersToggled(show) => {
                let changed = self.panels.show_filters != show;
                self.panels.show_filters = show;
                changed.then_some(Effect::ResizeMap)
            }
            Action::LocationFound(found) => {
                info!("Moving search to {}", found.address);
                self.apply(Action::CenterChanged(found.center))
            }
        }
    }

    fn search_if(&mut self, changed: bool) -> Option<Effect> {
        if changed && self.mounted {
            Some(self.start_search())
        } else {
            None
        }
    }

    fn start_search(&mut self) -> Effect {
        self.search = SearchPhase::Searching;
        self.error = None;
        Effect::Search(self.search_params())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use super::*;

    fn restaurant(place_id: &str, name: &str) -> Restaurant {
        Restaurant {
            place_id: place_id.to_string(),
            name: name.to_string(),
            address: None,
            lat: 37.788,
            lng: -122.409,
            rating: Some(4.5),
            price_level: PriceLevel::new(2),
            types: vec![],
            user_ratings_total: None,
            photos: None,
        }
    }

    fn response(restaurants: Vec<Restaurant>) -> SearchResponse {
        let count = restaurants.len();
        SearchResponse { restaurants, count }
    }

    #[fixture]
    fn mounted() -> PageState {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::Mounted);
        state.apply(Action::SearchSucceeded(response(vec![restaurant("p1", "Cafe A")])));
        state
    }

    #[test]
    fn mount_issues_one_search_with_defaults() {
        let mut state = PageState::new(&PageOptions::default());

        let effect = state.apply(Action::Mounted);

        assert_eq!(
            effect,
            Some(Effect::Search(SearchParams::new(LatLng::new(37.7879, -122.4095), Radius::new(322))))
        );
        assert!(state.loading());
        assert_eq!(state.apply(Action::Mounted), None);
    }

    #[test]
    fn filters_before_mount_only_seed_state() {
        let mut state = PageState::new(&PageOptions::default());

        assert_eq!(state.apply(Action::CuisineChanged("thai".to_string())), None);
        assert_eq!(state.apply(Action::RadiusChanged(Radius::new(644))), None);

        let Some(Effect::Search(params)) = state.apply(Action::Mounted) else {
            panic!("mount should search");
        };
        assert_eq!(params.cuisine_type.as_deref(), Some("thai"));
        assert_eq!(params.radius.meters(), 644);
    }

    #[rstest]
    #[case(Action::CenterChanged(LatLng::new(40.0, -74.0)))]
    #[case(Action::RadiusChanged(Radius::new(1288)))]
    #[case(Action::MaxPriceChanged(PriceLevel::new(1)))]
    #[case(Action::CuisineChanged("korean".to_string()))]
    fn each_filter_change_searches_once(mut mounted: PageState, #[case] action: Action) {
        let first = mounted.apply(action.clone());
        assert!(matches!(first, Some(Effect::Search(_))));
        assert_eq!(mounted.search, SearchPhase::Searching);

        // Same value again is not a change.
        assert_eq!(mounted.apply(action), None);
    }

    #[rstest]
    fn manual_search_always_runs(mut mounted: PageState) {
        assert!(matches!(mounted.apply(Action::SearchRequested), Some(Effect::Search(_))));
        assert!(matches!(mounted.apply(Action::SearchRequested), Some(Effect::Search(_))));
    }

    #[rstest]
    fn failure_clears_results_and_surfaces_message(mut mounted: PageState) {
        mounted.apply(Action::CuisineChanged("thai".to_string()));
        mounted.apply(Action::SearchFailed("provider quota exceeded".to_string()));

        assert!(mounted.restaurants.is_empty());
        assert_eq!(mounted.error.as_deref(), Some("provider quota exceeded"));
        assert_eq!(mounted.search, SearchPhase::Failed);
        assert!(!mounted.loading());
    }

    #[rstest]
    fn success_replaces_results_and_clears_error(mut mounted: PageState) {
        mounted.apply(Action::SearchFailed("boom".to_string()));
        mounted.apply(Action::SearchRequested);
        mounted.apply(Action::SearchSucceeded(response(vec![
            restaurant("p2", "Diner B"),
            restaurant("p3", "Bistro C"),
        ])));

        assert_eq!(mounted.restaurants.len(), 2);
        assert_eq!(mounted.error, None);
        assert_eq!(mounted.search, SearchPhase::Ready);
    }

    #[rstest]
    fn last_arrival_wins(mut mounted: PageState) {
        mounted.apply(Action::CuisineChanged("thai".to_string()));
        mounted.apply(Action::CuisineChanged("korean".to_string()));

        // The korean response lands first, the slower thai one overwrites it.
        mounted.apply(Action::SearchSucceeded(response(vec![restaurant("k1", "Seoul")])));
        mounted.apply(Action::SearchSucceeded(response(vec![restaurant("t1", "Bangkok")])));

        assert_eq!(mounted.restaurants[0].place_id, "t1");
        assert_eq!(mounted.cuisine_type, "korean");
    }

    #[rstest]
    fn selection_is_by_place_id(mut mounted: PageState) {
        mounted.apply(Action::RestaurantSelected(Some("p1".to_string())));
        assert!(mounted.is_selected("p1"));
        assert_eq!(mounted.selected_restaurant().map(|r| r.name.as_str()), Some("Cafe A"));

        // A fresh copy of the same venue stays selected.
        mounted.apply(Action::SearchSucceeded(response(vec![restaurant("p1", "Cafe A")])));
        assert!(mounted.selected_restaurant().is_some());

        mounted.apply(Action::SearchSucceeded(response(vec![restaurant("p9", "Elsewhere")])));
        assert_eq!(mounted.selected_restaurant(), None);

        mounted.apply(Action::RestaurantSelected(None));
        assert!(!mounted.is_selected("p1"));
    }

    #[rstest]
    fn detail_fetch_leaves_search_alone(mut mounted: PageState) {
        mounted.apply(Action::SearchFailed("stale".to_string()));

        let effect = mounted.apply(Action::DetailRequested("p1".to_string()));
        assert_eq!(effect, Some(Effect::FetchDetail("p1".to_string())));
        assert_eq!(mounted.error, None);
        assert!(mounted.loading());
        assert_eq!(mounted.search, SearchPhase::Failed);

        mounted.apply(Action::DetailFailed("Failed to fetch restaurant details".to_string()));
        assert_eq!(mounted.detail, DetailPhase::Failed);
        assert!(!mounted.loading());
        assert_eq!(mounted.error.as_deref(), Some("Failed to fetch restaurant details"));
    }

    #[rstest]
    fn detail_load_and_close(mut mounted: PageState) {
        let detail = RestaurantDetail {
            restaurant: restaurant("p1", "Cafe A"),
            phone_number: None,
            website: None,
            menu_url: None,
            opening_hours: None,
        };
        mounted.apply(Action::DetailRequested("p1".to_string()));
        mounted.apply(Action::DetailSucceeded(Box::new(detail)));
        assert_eq!(mounted.loaded_detail().map(|d| d.restaurant.name.as_str()), Some("Cafe A"));

        mounted.apply(Action::DetailClosed);
        assert_eq!(mounted.loaded_detail(), None);
        assert_eq!(mounted.restaurants.len(), 1);
    }

    #[rstest]
    fn panel_toggles_resize_the_map_on_change(mut mounted: PageState) {
        assert_eq!(mounted.apply(Action::HeaderToggled(true)), None);
        assert_eq!(mounted.apply(Action::HeaderToggled(false)), Some(Effect::ResizeMap));
        assert_eq!(mounted.apply(Action::FiltersToggled(false)), Some(Effect::ResizeMap));
        assert!(!mounted.panels.show_filters);
    }

    #[rstest]
    fn found_location_moves_the_search(mut mounted: PageState) {
        let effect = mounted.apply(Action::LocationFound(LocationFound {
            center: LatLng::new(37.8, -122.4),
            address: "Ferry Building".to_string(),
        }));

        assert!(matches!(effect, Some(Effect::Search(ref p)) if p.center == LatLng::new(37.8, -122.4)));
        assert_eq!(mounted.center, LatLng::new(37.8, -122.4));
    }
}
