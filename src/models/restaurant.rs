use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use crate::models::location::LatLng;
use crate::models::price::PriceLevel;

/// Categories the provider attaches to every venue, hidden from the detail view.
pub const GENERIC_CATEGORIES: [&str; 2] = ["point_of_interest", "establishment"];

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Restaurant {
    pub place_id: String,
    pub name: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub price_level: Option<PriceLevel>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub types: Vec<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub photos: Option<Vec<String>>,
}

impl Restaurant {
    pub fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Category tags worth showing, with underscores turned into spaces.
    pub fn display_categories(&self) -> Vec<String> {
        self.types
            .iter()
            .filter(|t| !GENERIC_CATEGORIES.contains(&t.as_str()))
            .map(|t| t.replace('_', " "))
            .collect()
    }
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct OpeningHours {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub website: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub menu_url: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SearchResponse {
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub count: usize,
}
