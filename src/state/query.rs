//! The page state as it travels in the URL.

use serde::{Deserialize, Serialize};
use crate::helpers::href::href;
use crate::models::location::{LatLng, Viewport};
use crate::models::price::PriceLevel;
use crate::models::search::Radius;
use crate::state::map_view::MapView;
use crate::state::options::PageOptions;
use crate::state::page::{Action, PageState};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PageQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<u32>,
    /// Slider position; the top position means any price.
    pub max_price: Option<u8>,
    pub cuisine: Option<String>,
    pub selected: Option<String>,
    pub detail: Option<String>,
    pub header: Option<bool>,
    pub filters: Option<bool>,
    pub zoom: Option<f64>,
    pub view_lat: Option<f64>,
    pub view_lng: Option<f64>,
    /// Address search text kept across a failed lookup.
    pub address: Option<String>,
}

impl PageQuery {
    pub fn center(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }

    /// Actions that seed a fresh page before it mounts.
    pub fn seed_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(center) = self.center() {
            actions.push(Action::CenterChanged(center));
        }
        if let Some(radius) = self.radius {
            actions.push(Action::RadiusChanged(Radius::new(radius)));
        }
        if let Some(position) = self.max_price {
            actions.push(Action::MaxPriceChanged(PriceLevel::from_slider(position)));
        }
        if let Some(cuisine) = &self.cuisine {
            actions.push(Action::CuisineChanged(cuisine.trim().to_string()));
        }
        if let Some(show) = self.header {
            actions.push(Action::HeaderToggled(show));
        }
        if let Some(show) = self.filters {
            actions.push(Action::FiltersToggled(show));
        }
        actions
    }

    /// Actions to run once the page has mounted.
    pub fn interaction_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(selected) = self.selected.as_ref().filter(|s| !s.is_empty()) {
            actions.push(Action::RestaurantSelected(Some(selected.clone())));
        }
        if let Some(detail) = self.detail.as_ref().filter(|d| !d.is_empty()) {
            actions.push(Action::DetailRequested(detail.clone()));
        }
        actions
    }

    pub fn map_view(&self, state: &PageState, options: &PageOptions) -> MapView {
        let zoom = self.zoom.unwrap_or(options.default_zoom);
        match (self.view_lat, self.view_lng) {
            (Some(lat), Some(lng)) => {
                MapView::with_viewport(Viewport::new(LatLng::new(lat, lng), zoom), state.center)
            }
            _ => MapView::new(state.center, zoom),
        }
    }

    /// Captures a page so links can reproduce it with one thing changed.
    pub fn from_state(state: &PageState, map: &MapView) -> Self {
        let viewport = map.viewport();
        let drifted = viewport.center != state.center;
        Self {
            lat: Some(state.center.lat),
            lng: Some(state.center.lng),
            radius: Some(state.radius.meters()),
            max_price: Some(PriceLevel::slider_position(state.max_price)),
            cuisine: (!state.cuisine_type.is_empty()).then(|| state.cuisine_type.clone()),
            selected: state.selected.clone(),
            detail: state.loaded_detail().map(|d| d.restaurant.place_id.clone()),
            header: (!state.panels.show_header).then_some(false),
            filters: (!state.panels.show_filters).then_some(false),
            zoom: Some(viewport.zoom),
            view_lat: drifted.then_some(viewport.center.lat),
            view_lng: drifted.then_some(viewport.center.lng),
            address: None,
        }
    }

    pub fn with_selected(&self, place_id: Option<&str>) -> Self {
        Self {
            selected: place_id.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn with_detail(&self, place_id: Option<&str>) -> Self {
        Self {
            detail: place_id.map(str::to_string),
            ..self.clone()
        }
    }

    pub fn with_header(&self, show: bool) -> Self {
        Self {
            header: (!show).then_some(false),
            ..self.clone()
        }
    }

    pub fn with_filters(&self, show: bool) -> Self {
        Self {
            filters: (!show).then_some(false),
            ..self.clone()
        }
    }

    pub fn with_address(&self, address: &str) -> Self {
        Self {
            address: (!address.is_empty()).then(|| address.to_string()),
            ..self.clone()
        }
    }

    /// Present parameters as name/value pairs, in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((name, value));
            }
        };
        push("lat", self.lat.map(|v| v.to_string()));
        push("lng", self.lng.map(|v| v.to_string()));
        push("radius", self.radius.map(|v| v.to_string()));
        push("max_price", self.max_price.map(|v| v.to_string()));
        push("cuisine", self.cuisine.clone());
        push("selected", self.selected.clone());
        push("detail", self.detail.clone());
        push("header", self.header.map(|v| v.to_string()));
        push("filters", self.filters.map(|v| v.to_string()));
        push("zoom", self.zoom.map(|v| v.to_string()));
        push("view_lat", self.view_lat.map(|v| v.to_string()));
        push("view_lng", self.view_lng.map(|v| v.to_string()));
        push("address", self.address.clone());
        pairs
    }

    pub fn href(&self) -> String {
        self.href_to("/")
    }

    pub fn href_to(&self, path: &str) -> String {
        href(path, &self.pairs())
    }
}
