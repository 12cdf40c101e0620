//! Photo lookup for a selected marker.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::PhotoStore;

/// Resolves preview URLs for the photos attached to a marker.
pub struct PhotoGallery {
    store: Arc<dyn PhotoStore>,
}

impl PhotoGallery {
    /// Create a gallery over `store`.
    pub fn new(store: Arc<dyn PhotoStore>) -> Self {
        Self { store }
    }

    /// Preview URLs for every photo whose identifier starts with `marker_id`.
    ///
    /// Never fails: a listing error yields an empty list, and a file whose
    /// preview URL cannot be built is skipped. Both are logged.
    pub async fn photos_for_marker(&self, marker_id: &str) -> Vec<Url> {
        let file_ids = match self.store.list_photo_ids(marker_id).await {
            Ok(file_ids) => file_ids,
            Err(error) => {
                warn!(marker_id, error_kind = error.kind(), %error, "photo lookup failed");
                return Vec::new();
            }
        };
        debug!(marker_id, count = file_ids.len(), "photos found for marker");

        file_ids
            .iter()
            .filter_map(|file_id| match self.store.preview_url(file_id) {
                Ok(url) => Some(url),
                Err(error) => {
                    warn!(marker_id, file_id = %file_id, %error, "skipping photo without preview");
                    None
                }
            })
            .collect()
    }
}
