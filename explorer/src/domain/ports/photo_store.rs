//! Driven port for listing photos held in file storage.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

define_port_error! {
    /// Errors raised while listing photos or building preview URLs.
    pub enum PhotoStoreError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "photo store transport failed: {message}",
        /// The backend answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "photo store rejected request with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "photo store response decode failed: {message}",
        /// A configuration value needed for the call is absent or invalid.
        Configuration { message: String } =>
            "photo store configuration unusable: {message}",
    }
}

/// Port for discovering photos attached to a marker.
///
/// Photos are files whose identifier starts with the marker identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// List identifiers of files prefixed by `marker_id`.
    async fn list_photo_ids(&self, marker_id: &str) -> Result<Vec<String>, PhotoStoreError>;

    /// Build the preview URL for one stored file.
    fn preview_url(&self, file_id: &str) -> Result<Url, PhotoStoreError>;
}

/// Fixture store holding no photos.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePhotoStore;

#[async_trait]
impl PhotoStore for FixturePhotoStore {
    async fn list_photo_ids(&self, _marker_id: &str) -> Result<Vec<String>, PhotoStoreError> {
        Ok(Vec::new())
    }

    fn preview_url(&self, file_id: &str) -> Result<Url, PhotoStoreError> {
        Err(PhotoStoreError::configuration(format!(
            "fixture store has no preview for {file_id}"
        )))
    }
}
