use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use crate::models::location::LatLng;

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AutocompletePrediction {
    pub place_id: String,
    pub description: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub main_text: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub secondary_text: Option<String>,
}

impl AutocompletePrediction {
    /// Bold first line of a suggestion row.
    pub fn headline(&self) -> &str {
        match self.main_text.as_deref() {
            Some(main) if !main.is_empty() => main,
            _ => self.description.split(',').next().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<AutocompletePrediction>,
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Handed to the page once the address search resolves a location.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationFound {
    pub center: LatLng,
    pub address: String,
}

impl LocationFound {
    pub fn from_geocode(result: GeocodeResult, fallback_address: &str) -> Self {
        Self {
            center: LatLng::new(result.lat, result.lng),
            address: result
                .formatted_address
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| fallback_address.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(main_text: Option<&str>) -> AutocompletePrediction {
        AutocompletePrediction {
            place_id: "ChIJ1".to_string(),
            description: "Union Square, San Francisco, CA, USA".to_string(),
            main_text: main_text.map(str::to_string),
            secondary_text: None,
        }
    }

    #[test]
    fn headline_prefers_main_text() {
        assert_eq!(prediction(Some("Union Sq")).headline(), "Union Sq");
        assert_eq!(prediction(None).headline(), "Union Square");
        assert_eq!(prediction(Some("")).headline(), "Union Square");
    }

    #[test]
    fn location_falls_back_to_description() {
        let result = GeocodeResult { lat: 1.0, lng: 2.0, formatted_address: None };
        let found = LocationFound::from_geocode(result, "Union Square");

        assert_eq!(found.center, LatLng::new(1.0, 2.0));
        assert_eq!(found.address, "Union Square");
    }
}
