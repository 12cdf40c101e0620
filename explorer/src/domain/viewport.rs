//! Viewport controller driving the listing fetch pipeline.
//!
//! The controller reacts to two inputs, a bounds change from the map surface
//! and a category change from the category picker. Either one runs the same
//! pipeline: query the [`ListingSource`], narrow the page to the viewport,
//! project markers, and publish a [`ViewportSnapshot`] to subscribers.
//!
//! Transitions are not debounced, so several fetches may be in flight at
//! once. Each fetch is stamped with the generation current when it started;
//! only a response carrying the latest generation is published. A slow,
//! older response is discarded instead of overwriting newer state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use geo_bounds::MapBounds;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::category::{CategoryError, CategorySelection};
use crate::domain::ports::{DEFAULT_PAGE_SIZE, ListingQuery, ListingSource, ListingSourceError};
use crate::domain::{DisplayMarker, ListingRecord, MarkerProjector, filter_within_bounds};

/// Tunables for the fetch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Maximum listings requested per fetch.
    pub page_size: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Published state of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSnapshot {
    /// Generation of the fetch that produced this snapshot; `0` before the
    /// first successful fetch.
    pub generation: u64,
    /// Viewport the listings were fetched for.
    pub bounds: Option<MapBounds>,
    /// Category the listings were fetched for.
    pub category: String,
    /// Listings inside the viewport.
    pub listings: Vec<ListingRecord>,
    /// Markers projected from `listings`.
    pub markers: Vec<DisplayMarker>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The response was published.
    Applied {
        /// Generation of the published snapshot.
        generation: u64,
        /// Number of listings published.
        count: usize,
    },
    /// A newer transition started before this response arrived.
    Superseded {
        /// Generation of the discarded fetch.
        generation: u64,
        /// Generation current when the response arrived.
        latest: u64,
    },
    /// The fetch failed; the previous snapshot stays in place.
    Failed {
        /// Generation of the failed fetch.
        generation: u64,
        /// Error reported by the listing source.
        error: ListingSourceError,
    },
}

#[derive(Debug)]
struct ViewportState {
    bounds: Option<MapBounds>,
    category: CategorySelection,
    generation: u64,
    selected: Option<String>,
}

impl ViewportState {
    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            bounds: self.bounds,
            category: self.category.active().to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
struct FetchTicket {
    generation: u64,
    bounds: Option<MapBounds>,
    category: String,
}

/// Owns the current viewport and category and keeps listings in sync.
pub struct ViewportController {
    source: Arc<dyn ListingSource>,
    config: ViewportConfig,
    state: Mutex<ViewportState>,
    snapshots: watch::Sender<ViewportSnapshot>,
}

impl ViewportController {
    /// Create a controller with no bounds, the default category, and no
    /// listings. Nothing is fetched until the first transition or
    /// [`refresh`](Self::refresh).
    pub fn new(source: Arc<dyn ListingSource>, config: ViewportConfig) -> Self {
        let category = CategorySelection::default();
        let initial = ViewportSnapshot {
            generation: 0,
            bounds: None,
            category: category.active().to_owned(),
            listings: Vec::new(),
            markers: Vec::new(),
        };
        let (snapshots, _) = watch::channel(initial);
        Self {
            source,
            config,
            state: Mutex::new(ViewportState {
                bounds: None,
                category,
                generation: 0,
                selected: None,
            }),
            snapshots,
        }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ViewportSnapshot> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Currently active category label, including one whose fetch is still
    /// in flight.
    pub fn active_category(&self) -> String {
        self.lock_state().category.active().to_owned()
    }

    /// Switch category and re-run the pipeline for the current bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] for a blank label; nothing is fetched then.
    pub async fn category_changed(&self, category: &str) -> Result<PipelineOutcome, CategoryError> {
        let ticket = {
            let mut state = self.lock_state();
            state.category.set(category)?;
            state.begin_fetch()
        };
        Ok(self.run_pipeline(ticket).await)
    }

    /// Move the viewport and re-run the pipeline for the active category.
    pub async fn bounds_changed(&self, bounds: MapBounds) -> PipelineOutcome {
        let ticket = {
            let mut state = self.lock_state();
            state.bounds = Some(bounds);
            state.begin_fetch()
        };
        self.run_pipeline(ticket).await
    }

    /// Re-run the pipeline with the current bounds and category.
    pub async fn refresh(&self) -> PipelineOutcome {
        let ticket = self.lock_state().begin_fetch();
        self.run_pipeline(ticket).await
    }

    /// Resolve a marker press to its listing and mark it selected.
    ///
    /// Returns `None`, leaving the selection untouched, when no published
    /// listing has that identifier.
    pub fn select_marker(&self, marker_id: &str) -> Option<ListingRecord> {
        let listing = self
            .snapshots
            .borrow()
            .listings
            .iter()
            .find(|listing| listing.osm_id == marker_id)
            .cloned()?;
        self.lock_state().selected = Some(listing.osm_id.clone());
        Some(listing)
    }

    /// The selected listing, if it is still among the published listings.
    pub fn selected(&self) -> Option<ListingRecord> {
        let selected = self.lock_state().selected.clone()?;
        self.snapshots
            .borrow()
            .listings
            .iter()
            .find(|listing| listing.osm_id == selected)
            .cloned()
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.lock_state().selected = None;
    }

    async fn run_pipeline(&self, ticket: FetchTicket) -> PipelineOutcome {
        let server_side = self.source.supports_range_filter();
        let query = ListingQuery {
            category: ticket.category.clone(),
            bounds: if server_side { ticket.bounds } else { None },
            limit: self.config.page_size,
        };
        debug!(
            generation = ticket.generation,
            category = %ticket.category,
            server_side,
            "fetching listings"
        );

        let page = match self.source.list_listings(&query).await {
            Ok(page) => page,
            Err(error) => {
                warn!(
                    generation = ticket.generation,
                    category = %ticket.category,
                    error_kind = error.kind(),
                    %error,
                    "listing fetch failed; keeping current listings"
                );
                return PipelineOutcome::Failed {
                    generation: ticket.generation,
                    error,
                };
            }
        };

        let listings = if server_side {
            page.listings
        } else {
            filter_within_bounds(page.listings, ticket.bounds.as_ref())
        };
        let markers = MarkerProjector::for_category(&ticket.category).project_all(&listings);
        self.publish(ticket, listings, markers, page.total)
    }

    fn publish(
        &self,
        ticket: FetchTicket,
        listings: Vec<ListingRecord>,
        markers: Vec<DisplayMarker>,
        total: u64,
    ) -> PipelineOutcome {
        // Check and publish under one lock so no newer transition can slip
        // between the generation check and the send.
        let state = self.lock_state();
        if state.generation != ticket.generation {
            debug!(
                generation = ticket.generation,
                latest = state.generation,
                category = %ticket.category,
                "discarding stale listing response"
            );
            return PipelineOutcome::Superseded {
                generation: ticket.generation,
                latest: state.generation,
            };
        }

        let count = listings.len();
        info!(
            generation = ticket.generation,
            category = %ticket.category,
            count,
            total,
            "listings updated"
        );
        self.snapshots.send_replace(ViewportSnapshot {
            generation: ticket.generation,
            bounds: ticket.bounds,
            category: ticket.category,
            listings,
            markers,
        });
        drop(state);
        PipelineOutcome::Applied {
            generation: ticket.generation,
            count,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
