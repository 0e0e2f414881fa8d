use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use crate::helpers::debounce::Debouncer;
use crate::models::geocode::{AutocompletePrediction, LocationFound};
use crate::repositories::restaurant_api::RestaurantBackend;

pub const AUTOCOMPLETE_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl Key {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// What has to be looked up to turn the search box into coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Suggestion(AutocompletePrediction),
    FreeText(String),
}

/// Search box state without any I/O.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AddressSearch {
    query: String,
    suggestions: Vec<AutocompletePrediction>,
    show_suggestions: bool,
    cursor: Option<usize>,
    searching: bool,
}

impl AddressSearch {
    pub fn with_query(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[AutocompletePrediction] {
        &self.suggestions
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions && !self.suggestions.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.searching && !self.query.trim().is_empty()
    }

    pub fn input_changed(&mut self, text: &str) {
        self.query = text.to_string();
    }

    /// The query to look up once typing settles; `None` when it is blank.
    pub fn pending_lookup(&mut self) -> Option<String> {
        if self.query.trim().is_empty() {
            self.suggestions.clear();
            self.show_suggestions = false;
            return None;
        }
        Some(self.query.clone())
    }

    pub fn suggestions_loaded(&mut self, predictions: Vec<AutocompletePrediction>) {
        self.show_suggestions = !predictions.is_empty();
        self.suggestions = predictions;
        self.cursor = None;
    }

    pub fn suggestions_failed(&mut self) {
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    /// Restores the cursor carried over from a previous render.
    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor.filter(|c| *c < self.suggestions.len());
    }

    pub fn focused(&mut self) {
        if !self.suggestions.is_empty() {
            self.show_suggestions = true;
        }
    }

    pub fn outside_click(&mut self) {
        self.show_suggestions = false;
    }

    /// Keys only act while suggestions are on screen. The cursor does not wrap.
    pub fn key(&mut self, key: Key) -> Option<Resolution> {
        if !self.suggestions_visible() {
            return None;
        }
        match key {
            Key::ArrowDown => {
                let last = self.suggestions.len() - 1;
                self.cursor = Some(self.cursor.map_or(0, |c| (c + 1).min(last)));
                None
            }
            Key::ArrowUp => {
                self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
                None
            }
            Key::Enter => self.cursor.and_then(|c| self.select(c)),
            Key::Escape => {
                self.show_suggestions = false;
                None
            }
        }
    }

    pub fn select(&mut self, index: usize) -> Option<Resolution> {
        let prediction = self.suggestions.get(index)?.clone();
        self.query = prediction.description.clone();
        self.show_suggestions = false;
        self.searching = true;
        Some(Resolution::Suggestion(prediction))
    }

    /// Form submit: the highlighted suggestion wins, otherwise the typed text.
    pub fn submit(&mut self) -> Option<Resolution> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        if let Some(cursor) = self.cursor {
            if let Some(resolution) = self.select(cursor) {
                return Some(resolution);
            }
        }
        self.searching = true;
        Some(Resolution::FreeText(query))
    }

    pub fn resolved(&mut self) {
        self.query.clear();
        self.show_suggestions = false;
        self.searching = false;
    }

    /// Lookup failed; the text stays so the user can edit and retry.
    pub fn resolution_failed(&mut self) {
        self.searching = false;
    }
}

/// Drives an [`AddressSearch`] against the backend with debounced autocomplete.
pub struct AddressSearchSession {
    backend: Arc<dyn RestaurantBackend>,
    state: AddressSearch,
    debouncer: Debouncer<()>,
}

impl AddressSearchSession {
    pub fn new(backend: Arc<dyn RestaurantBackend>) -> Self {
        Self::with_state(backend, AddressSearch::default())
    }

    pub fn with_state(backend: Arc<dyn RestaurantBackend>, state: AddressSearch) -> Self {
        Self {
            backend,
            state,
            debouncer: Debouncer::new(AUTOCOMPLETE_DEBOUNCE),
        }
    }

    pub fn state(&self) -> &AddressSearch {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AddressSearch {
        &mut self.state
    }

    pub fn input(&mut self, text: &str) {
        self.state.input_changed(text);
        self.debouncer.push(());
    }

    /// Waits for typing to settle, then loads suggestions for the latest text.
    /// Returns at once when nothing was typed since the last lookup.
    pub async fn settle(&mut self) {
        if self.debouncer.settled().await.is_some() {
            self.refresh_suggestions().await;
        }
    }

    /// Loads suggestions for the current text right away.
    pub async fn refresh_suggestions(&mut self) {
        let Some(query) = self.state.pending_lookup() else {
            return;
        };
        match self.backend.autocomplete(&query).await {
            Ok(response) => self.state.suggestions_loaded(response.predictions),
            Err(e) => {
                debug!("Autocomplete for {:?} failed due to: {}", query, e);
                self.state.suggestions_failed();
            }
        }
    }

    pub async fn key(&mut self, key: Key) -> Option<LocationFound> {
        let resolution = self.state.key(key)?;
        self.resolve(resolution).await
    }

    pub async fn select(&mut self, index: usize) -> Option<LocationFound> {
        let resolution = self.state.select(index)?;
        self.resolve(resolution).await
    }

    pub async fn submit(&mut self) -> Option<LocationFound> {
        let resolution = self.state.submit()?;
        self.resolve(resolution).await
    }

    /// Geocodes a suggestion or free text. Failures are logged and otherwise ignored.
    pub async fn resolve(&mut self, resolution: Resolution) -> Option<LocationFound> {
        let (lookup, fallback) = match &resolution {
            Resolution::Suggestion(prediction) => (
                self.backend.geocode_place(&prediction.place_id).await,
                prediction.description.as_str(),
            ),
            Resolution::FreeText(text) => (self.backend.geocode_address(text).await, text.as_str()),
        };

        match lookup {
            Ok(result) => {
                let found = LocationFound::from_geocode(result, fallback);
                self.state.resolved();
                Some(found)
            }
            Err(e) => {
                debug!("Resolving {:?} failed due to: {}", resolution, e);
                self.state.resolution_failed();
                None
            }
        }
    }
}
