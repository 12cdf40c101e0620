//! Appwrite-backed listing source.
//!
//! Lists documents in the listing collection, filtered by building type and,
//! when enabled, by latitude/longitude range.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::connection::{AppwriteConnection, decode, required};
use super::dto::DocumentListDto;
use super::http::HttpFailure;
use super::query::{QUERY_PARAM, listing_queries};
use crate::config::ExplorerSettings;
use crate::domain::ports::{ListingPage, ListingQuery, ListingSource, ListingSourceError};

/// Listing source reading the document collection over REST.
pub struct AppwriteListingSource {
    connection: Arc<AppwriteConnection>,
    database_id: Option<String>,
    collection_id: String,
    range_filter: bool,
}

impl AppwriteListingSource {
    /// Build a source for the collection named in `settings`.
    pub fn new(connection: Arc<AppwriteConnection>, settings: &ExplorerSettings) -> Self {
        Self {
            connection,
            database_id: settings.database_id.clone(),
            collection_id: settings.collection_id().to_owned(),
            range_filter: settings.server_range_filter(),
        }
    }

    async fn fetch(&self, query: &ListingQuery) -> Result<ListingPage, HttpFailure> {
        let database_id = required(self.database_id.as_deref(), "database_id")?;
        let url = self.connection.url(&[
            "databases",
            database_id,
            "collections",
            self.collection_id.as_str(),
            "documents",
        ])?;
        let params: Vec<(&str, String)> = listing_queries(query, self.range_filter)
            .into_iter()
            .map(|query| (QUERY_PARAM, query))
            .collect();

        let request = self.connection.request(Method::GET, url)?.query(&params);
        let response = self.connection.execute(request).await?;
        let page = decode::<DocumentListDto>(&response.body, "document list")?.into_listing_page();
        debug!(
            category = %query.category,
            returned = page.listings.len(),
            total = page.total,
            "listing documents fetched"
        );
        Ok(page)
    }
}

#[async_trait]
impl ListingSource for AppwriteListingSource {
    fn supports_range_filter(&self) -> bool {
        self.range_filter
    }

    async fn list_listings(&self, query: &ListingQuery) -> Result<ListingPage, ListingSourceError> {
        self.fetch(query).await.map_err(ListingSourceError::from)
    }
}

#[cfg(test)]
mod tests {
    //! Configuration handling that fails before any network call.

    use super::*;
    use rstest::rstest;

    fn source(settings: &ExplorerSettings) -> AppwriteListingSource {
        let connection = AppwriteConnection::new(settings).expect("client builds");
        AppwriteListingSource::new(Arc::new(connection), settings)
    }

    fn query() -> ListingQuery {
        ListingQuery {
            category: "house".to_owned(),
            bounds: None,
            limit: 10,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn missing_database_is_reported_by_name() {
        let settings = ExplorerSettings {
            appwrite_endpoint: Some("https://cloud.example/v1".to_owned()),
            project_id: Some("proj".to_owned()),
            ..ExplorerSettings::default()
        };

        let error = source(&settings)
            .list_listings(&query())
            .await
            .expect_err("fetch must fail");

        assert_eq!(
            error,
            ListingSourceError::configuration("EXPLORER_DATABASE_ID is not set")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn missing_project_is_reported_by_name() {
        let settings = ExplorerSettings {
            appwrite_endpoint: Some("https://cloud.example/v1".to_owned()),
            database_id: Some("db".to_owned()),
            ..ExplorerSettings::default()
        };

        let error = source(&settings)
            .list_listings(&query())
            .await
            .expect_err("fetch must fail");

        assert_eq!(
            error,
            ListingSourceError::configuration("EXPLORER_PROJECT_ID is not set")
        );
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(false), false)]
    fn range_filter_follows_settings(#[case] configured: Option<bool>, #[case] expected: bool) {
        let settings = ExplorerSettings {
            server_range_filter: configured,
            ..ExplorerSettings::default()
        };
        assert_eq!(source(&settings).supports_range_filter(), expected);
    }
}
