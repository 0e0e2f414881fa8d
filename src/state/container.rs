use std::sync::Arc;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tracing::{debug, info};
use crate::state::page::{Action, Effect, PageState};
use crate::repositories::restaurant_api::RestaurantBackend;

/// Runs the effects of a [`PageState`] against the backend.
///
/// Requests are never cancelled. Each one feeds its outcome back through the
/// reducer when it completes, so the last response to arrive decides what the
/// page shows.
pub struct Container {
    backend: Arc<dyn RestaurantBackend>,
    state: PageState,
    in_flight: FuturesUnordered<BoxFuture<'static, Action>>,
    resize_requests: usize,
}

impl Container {
    pub fn new(backend: Arc<dyn RestaurantBackend>, state: PageState) -> Self {
        Self {
            backend,
            state,
            in_flight: FuturesUnordered::new(),
            resize_requests: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn into_state(self) -> PageState {
        self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of times the map was asked to re-measure its container.
    pub fn resize_requests(&self) -> usize {
        self.resize_requests
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Some(effect) = self.state.apply(action) {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Search(params) => {
                info!(
                    "Searching restaurants around ({}, {}) within {}m",
                    params.center.lat,
                    params.center.lng,
                    params.radius.meters()
                );
                let backend = self.backend.clone();
                self.in_flight.push(
                    async move {
                        match backend.search_restaurants(&params).await {
                            Ok(response) => Action::SearchSucceeded(response),
                            Err(e) => Action::SearchFailed(e.to_string()),
                        }
                    }
                    .boxed(),
                );
            }
            Effect::FetchDetail(place_id) => {
                info!("Fetching details for {}", place_id);
                let backend = self.backend.clone();
                self.in_flight.push(
                    async move {
                        match backend.restaurant_details(&place_id).await {
                            Ok(detail) => Action::DetailSucceeded(Box::new(detail)),
                            Err(e) => Action::DetailFailed(e.to_string()),
                        }
                    }
                    .boxed(),
                );
            }
            Effect::ResizeMap => {
                debug!("Map container changed size");
                self.resize_requests += 1;
            }
        }
    }

    /// Applies the next response to arrive. Returns false when nothing is in flight.
    pub async fn next_response(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Applies responses until no request is left in flight.
    pub async fn settle(&mut self) {
        while self.next_response().await {}
    }
}
