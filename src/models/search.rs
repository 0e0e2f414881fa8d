use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use crate::models::location::LatLng;
use crate::models::price::PriceLevel;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Search radius in meters, kept on the slider grid.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "u32", into = "u32")]
pub struct Radius(u32);

impl Radius {
    /// 0.1 mile.
    pub const MIN: u32 = 161;
    /// 1 mile.
    pub const MAX: u32 = 1609;
    pub const STEP: u32 = 161;
    /// 0.2 mile.
    pub const DEFAULT: Radius = Radius(322);

    /// Clamps into `[MIN, MAX]` and snaps to the nearest step above `MIN`.
    pub fn new(meters: u32) -> Self {
        let clamped = meters.clamp(Self::MIN, Self::MAX);
        let offset = clamped - Self::MIN;
        let steps = (offset + Self::STEP / 2) / Self::STEP;
        Self((Self::MIN + steps * Self::STEP).min(Self::MAX))
    }

    pub fn meters(self) -> u32 {
        self.0
    }

    pub fn miles(self) -> f64 {
        f64::from(self.0) / METERS_PER_MILE
    }

    /// e.g. "0.2 miles"
    pub fn label(self) -> String {
        format!("{:.1} miles", self.miles())
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Radius {
    fn from(meters: u32) -> Self {
        Self::new(meters)
    }
}

impl From<Radius> for u32 {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

pub struct CuisineOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const CUISINE_OPTIONS: [CuisineOption; 12] = [
    CuisineOption { value: "", label: "All Cuisines" },
    CuisineOption { value: "italian", label: "Italian" },
    CuisineOption { value: "chinese", label: "Chinese" },
    CuisineOption { value: "mexican", label: "Mexican" },
    CuisineOption { value: "japanese", label: "Japanese" },
    CuisineOption { value: "indian", label: "Indian" },
    CuisineOption { value: "thai", label: "Thai" },
    CuisineOption { value: "french", label: "French" },
    CuisineOption { value: "american", label: "American" },
    CuisineOption { value: "mediterranean", label: "Mediterranean" },
    CuisineOption { value: "korean", label: "Korean" },
    CuisineOption { value: "vietnamese", label: "Vietnamese" },
];

#[derive(Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub center: LatLng,
    pub radius: Radius,
    pub min_price: Option<PriceLevel>,
    pub max_price: Option<PriceLevel>,
    pub cuisine_type: Option<String>,
}

impl SearchParams {
    pub fn new(center: LatLng, radius: Radius) -> Self {
        Self {
            center,
            radius,
            min_price: None,
            max_price: None,
            cuisine_type: None,
        }
    }

    pub fn with_min_price(mut self, min_price: Option<PriceLevel>) -> Self {
        self.min_price = min_price;
        self
    }

    pub fn with_max_price(mut self, max_price: Option<PriceLevel>) -> Self {
        self.max_price = max_price;
        self
    }

    /// An empty cuisine means "all cuisines" and is not sent.
    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        let cuisine = cuisine.trim();
        self.cuisine_type = (!cuisine.is_empty()).then(|| cuisine.to_string());
        self
    }

    pub fn query(&self) -> SearchQuery<'_> {
        SearchQuery {
            lat: self.center.lat,
            lng: self.center.lng,
            radius: self.radius.meters(),
            min_price: self.min_price.map(PriceLevel::value),
            max_price: self.max_price.map(PriceLevel::value),
            cuisine_type: self.cuisine_type.as_deref(),
        }
    }
}

/// Wire shape of `GET /restaurants`.
#[skip_serializing_none]
#[derive(Serialize, Debug, PartialEq)]
pub struct SearchQuery<'a> {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub min_price: Option<u8>,
    pub max_price: Option<u8>,
    pub cuisine_type: Option<&'a str>,
}
