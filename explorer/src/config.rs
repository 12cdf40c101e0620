//! Explorer configuration loaded via OrthoConfig.
//!
//! Every value is optional at load time. Backend identifiers are resolved
//! lazily by the adapters, so a missing value only fails the first call that
//! needs it.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::DEFAULT_PAGE_SIZE;

const DEFAULT_COLLECTION_ID: &str = "landings";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable prefix shared by every setting.
pub const ENV_PREFIX: &str = "EXPLORER_";

/// Configuration values for the backend connection and the fetch pipeline.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXPLORER")]
pub struct ExplorerSettings {
    /// Backend REST endpoint, including the API version path.
    pub appwrite_endpoint: Option<String>,
    /// Backend project identifier.
    pub project_id: Option<String>,
    /// Database holding the listing collection.
    pub database_id: Option<String>,
    /// Listing collection identifier.
    pub collection_id: Option<String>,
    /// Storage bucket holding listing photos.
    pub photo_bucket_id: Option<String>,
    /// Key for the native map tiles, passed through to the map surface.
    pub maps_api_key: Option<String>,
    /// Maximum listings requested per fetch.
    pub page_size: Option<usize>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Whether the backend should apply latitude/longitude range predicates.
    pub server_range_filter: Option<bool>,
}

impl ExplorerSettings {
    /// Return the configured collection, falling back to the default.
    pub fn collection_id(&self) -> &str {
        self.collection_id
            .as_deref()
            .unwrap_or(DEFAULT_COLLECTION_ID)
    }

    /// Return the configured page size, falling back to the default.
    ///
    /// A zero page size is treated as unset.
    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Return the request timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return whether bounds are sent to the backend; on by default.
    pub fn server_range_filter(&self) -> bool {
        self.server_range_filter.unwrap_or(true)
    }
}

/// Name of the environment variable backing `field`.
///
/// # Examples
/// ```
/// assert_eq!(
///     explorer::config::env_var("project_id"),
///     "EXPLORER_PROJECT_ID"
/// );
/// ```
pub fn env_var(field: &str) -> String {
    format!("{ENV_PREFIX}{}", field.to_ascii_uppercase())
}
