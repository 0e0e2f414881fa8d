//! Keeps the map viewport and the page's search center from chasing each other.
//!
//! The viewport follows the search center only past `RECENTER_THRESHOLD`, and
//! user pans reach the page only past the coarser `NOTIFY_THRESHOLD`. A
//! reported pan therefore comes back as an external change well inside the
//! recenter dead-zone and does not move the map again.

use std::time::Duration;
use crate::models::location::{LatLng, Viewport};
use crate::models::restaurant::Restaurant;

/// Degrees. Smaller external moves are float noise.
pub const RECENTER_THRESHOLD: f64 = 0.0001;
/// Degrees. Smaller pans stay local to the map.
pub const NOTIFY_THRESHOLD: f64 = 0.001;
/// Wait after a panel toggle before telling the map its container changed size.
pub const RESIZE_DELAY: Duration = Duration::from_millis(150);

/// The center to report to the page after a user pan, if any.
pub fn pan_notification(last_external: LatLng, new_center: LatLng) -> Option<LatLng> {
    new_center
        .differs_from(&last_external, NOTIFY_THRESHOLD)
        .then_some(new_center)
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    viewport: Viewport,
    last_external: LatLng,
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            viewport: Viewport::new(center, zoom),
            last_external: center,
        }
    }

    /// Restores a viewport that drifted from the search center, e.g. after a small pan.
    pub fn with_viewport(viewport: Viewport, external_center: LatLng) -> Self {
        Self {
            viewport,
            last_external: external_center,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn last_external(&self) -> LatLng {
        self.last_external
    }

    /// Follows a new search center, keeping the zoom. Returns whether the viewport moved.
    pub fn external_center_changed(&mut self, center: LatLng) -> bool {
        self.last_external = center;
        if center.differs_from(&self.viewport.center, RECENTER_THRESHOLD) {
            self.viewport.center = center;
            true
        } else {
            false
        }
    }

    /// Applies a user pan or zoom and returns the center the page should adopt, if any.
    pub fn user_moved(&mut self, viewport: Viewport) -> Option<LatLng> {
        self.viewport = viewport;
        pan_notification(self.last_external, viewport.center)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub place_id: String,
    pub position: LatLng,
    pub selected: bool,
}

pub fn markers(restaurants: &[Restaurant], selected: Option<&str>) -> Vec<Marker> {
    restaurants
        .iter()
        .map(|r| Marker {
            place_id: r.place_id.clone(),
            position: r.location(),
            selected: selected == Some(r.place_id.as_str()),
        })
        .collect()
}
