//! Driven port for querying listing documents from the backend.
//!
//! The domain owns the query shape so the viewport controller can stay
//! agnostic of the document store's query language.

use async_trait::async_trait;
use geo_bounds::MapBounds;

use super::define_port_error;
use crate::domain::ListingRecord;

/// Page size used when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Domain-owned listing query passed to the source adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    /// Category label matched against the listing's building type.
    pub category: String,
    /// Viewport to filter by server-side, when the source supports it.
    pub bounds: Option<MapBounds>,
    /// Maximum number of records to return.
    pub limit: usize,
}

/// One page of listings returned by the source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingPage {
    /// Normalised listing records, in backend order.
    pub listings: Vec<ListingRecord>,
    /// Total matching documents reported by the backend.
    pub total: u64,
}

define_port_error! {
    /// Errors surfaced while fetching listings.
    pub enum ListingSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "listing fetch transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "listing fetch timed out: {message}",
        /// The backend answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "listing fetch rejected with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "listing response decode failed: {message}",
        /// A configuration value needed for the call is absent or invalid.
        Configuration { message: String } =>
            "listing source configuration unusable: {message}",
    }
}

/// Port for fetching listing pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Whether the backend applies `ListingQuery::bounds` itself.
    ///
    /// When this returns `false` the caller filters the page client-side.
    fn supports_range_filter(&self) -> bool;

    /// Fetch listings matching `query`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use explorer::domain::ports::{FixtureListingSource, ListingQuery, ListingSource};
    ///
    /// let source = FixtureListingSource;
    /// let page = source
    ///     .list_listings(&ListingQuery {
    ///         category: "house".to_owned(),
    ///         bounds: None,
    ///         limit: 1000,
    ///     })
    ///     .await?;
    /// assert!(page.listings.is_empty());
    /// # Ok::<(), explorer::domain::ports::ListingSourceError>(())
    /// ```
    async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage, ListingSourceError>;
}

/// Fixture implementation returning an empty page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureListingSource;

#[async_trait]
impl ListingSource for FixtureListingSource {
    fn supports_range_filter(&self) -> bool {
        false
    }

    async fn list_listings(
        &self,
        _query: &ListingQuery,
    ) -> Result<ListingPage, ListingSourceError> {
        Ok(ListingPage::default())
    }
}
