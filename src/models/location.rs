use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when either axis moved by more than `threshold` degrees.
    pub fn differs_from(&self, other: &LatLng, threshold: f64) -> bool {
        (self.lat - other.lat).abs() > threshold || (self.lng - other.lng).abs() > threshold
    }
}

/// What the map currently shows. Independent of the search center.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}
