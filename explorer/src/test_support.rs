//! Test utilities for the explorer crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use geo_bounds::Coordinate;
use tokio::sync::{Notify, mpsc};

use crate::domain::ListingRecord;
use crate::domain::ports::{ListingPage, ListingQuery, ListingSource, ListingSourceError};

/// A listing with an explicit position and a `house` building tag.
pub fn listing_at(osm_id: &str, latitude: f64, longitude: f64) -> ListingRecord {
    ListingRecord::new(osm_id)
        .with_building("house")
        .with_position(Coordinate::new(latitude, longitude))
}

/// Listing source answering from per-category fixtures.
///
/// Categories can be gated so their fetch blocks until released, which
/// lets tests order concurrent fetches deterministically.
#[derive(Default)]
pub struct ScriptedListingSource {
    listings: BTreeMap<String, Vec<ListingRecord>>,
    failures: BTreeMap<String, ListingSourceError>,
    gates: BTreeMap<String, Arc<Notify>>,
    entered: Option<mpsc::UnboundedSender<String>>,
    range_filter: bool,
    calls: Mutex<Vec<ListingQuery>>,
}

impl ScriptedListingSource {
    /// Serve `listings` for `category`.
    #[must_use]
    pub fn with_category(mut self, category: &str, listings: Vec<ListingRecord>) -> Self {
        self.listings.insert(category.to_owned(), listings);
        self
    }

    /// Fail every fetch for `category` with `error`.
    #[must_use]
    pub fn failing(mut self, category: &str, error: ListingSourceError) -> Self {
        self.failures.insert(category.to_owned(), error);
        self
    }

    /// Apply bounds like a backend with range predicates would.
    #[must_use]
    pub fn with_range_filter(mut self) -> Self {
        self.range_filter = true;
        self
    }

    /// Report each fetch's category on `entered` as it starts.
    #[must_use]
    pub fn with_entry_signal(mut self, entered: mpsc::UnboundedSender<String>) -> Self {
        self.entered = Some(entered);
        self
    }

    /// Block fetches for `category` until the returned handle is notified.
    pub fn gate(&mut self, category: &str) -> Arc<Notify> {
        Arc::clone(
            self.gates
                .entry(category.to_owned())
                .or_insert_with(|| Arc::new(Notify::new())),
        )
    }

    /// Queries received so far, in arrival order.
    pub fn calls(&self) -> Vec<ListingQuery> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ListingSource for ScriptedListingSource {
    fn supports_range_filter(&self) -> bool {
        self.range_filter
    }

    async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage, ListingSourceError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        if let Some(entered) = &self.entered {
            // A dropped receiver only means the test stopped listening.
            let _ = entered.send(query.category.clone());
        }
        if let Some(gate) = self.gates.get(&query.category) {
            gate.notified().await;
        }
        if let Some(error) = self.failures.get(&query.category) {
            return Err(error.clone());
        }

        let listings: Vec<ListingRecord> = self
            .listings
            .get(&query.category)
            .into_iter()
            .flatten()
            .filter(|listing| match (self.range_filter, query.bounds) {
                (true, Some(bounds)) => listing
                    .position
                    .is_some_and(|position| bounds.contains(position)),
                _ => true,
            })
            .take(query.limit)
            .cloned()
            .collect();
        let total = u64::try_from(listings.len()).unwrap_or(u64::MAX);
        Ok(ListingPage { listings, total })
    }
}
