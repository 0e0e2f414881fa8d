use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use crate::models::geocode::{AutocompleteResponse, GeocodeResult};
use crate::models::restaurant::{RestaurantDetail, SearchResponse};
use crate::models::search::SearchParams;
use crate::repositories::api_error::ApiError;

const SEARCH_FAILED: &str = "Failed to fetch restaurants";
const DETAIL_FAILED: &str = "Failed to fetch restaurant details";
const AUTOCOMPLETE_FAILED: &str = "Failed to fetch suggestions";
const GEOCODE_FAILED: &str = "Failed to geocode address";

/// Everything the page needs from the restaurant backend.
#[async_trait]
pub trait RestaurantBackend: Send + Sync {
    async fn search_restaurants(&self, params: &SearchParams) -> Result<SearchResponse, ApiError>;

    async fn restaurant_details(&self, place_id: &str) -> Result<RestaurantDetail, ApiError>;

    async fn autocomplete(&self, input: &str) -> Result<AutocompleteResponse, ApiError>;

    async fn geocode_address(&self, address: &str) -> Result<GeocodeResult, ApiError>;

    async fn geocode_place(&self, place_id: &str) -> Result<GeocodeResult, ApiError>;
}

pub struct RestaurantApiRepo {
    client: Client,
    base_url: Url,
}

impl RestaurantApiRepo {
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        // Segments are appended below, so drop a trailing slash up front.
        if base_url.path().ends_with('/') {
            let trimmed = base_url.path().trim_end_matches('/').to_string();
            base_url.set_path(&trimmed);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(e, "Failed to build HTTP client"))?;

        Ok(Self {
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with each segment appended and percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::transport(e, fallback))?;
        debug!("GET {}", request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| {
                warn!("Request to restaurant backend failed due to: {}", e);
                ApiError::transport(e, fallback)
            })?;

        decode_response(response, fallback).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_body(status, &body, fallback);
        warn!("Restaurant backend answered {}: {}", status, err);
        return Err(err);
    }

    response.json::<T>().await.map_err(|e| {
        warn!("Failed to decode restaurant backend response due to: {}", e);
        ApiError::Decode(e)
    })
}

#[async_trait]
impl RestaurantBackend for RestaurantApiRepo {
    async fn search_restaurants(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&["restaurants"]))
            .query(&params.query());
        self.fetch_json(request, SEARCH_FAILED).await
    }

    async fn restaurant_details(&self, place_id: &str) -> Result<RestaurantDetail, ApiError> {
        let request = self.client.get(self.endpoint(&["restaurants", place_id]));
        self.fetch_json(request, DETAIL_FAILED).await
    }

    async fn autocomplete(&self, input: &str) -> Result<AutocompleteResponse, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&["autocomplete"]))
            .query(&[("input", input)]);
        self.fetch_json(request, AUTOCOMPLETE_FAILED).await
    }

    async fn geocode_address(&self, address: &str) -> Result<GeocodeResult, ApiError> {
        let request = self
            .client
            .get(self.endpoint(&["geocode"]))
            .query(&[("address", address)]);
        self.fetch_json(request, GEOCODE_FAILED).await
    }

    async fn geocode_place(&self, place_id: &str) -> Result<GeocodeResult, ApiError> {
        let request = self.client.get(self.endpoint(&["geocode", "place", place_id]));
        self.fetch_json(request, GEOCODE_FAILED).await
    }
}
