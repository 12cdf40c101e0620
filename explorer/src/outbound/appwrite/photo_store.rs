//! Appwrite-backed photo store.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Url};

use super::connection::{AppwriteConnection, decode, required};
use super::dto::FileListDto;
use super::http::HttpFailure;
use super::query::{QUERY_PARAM, starts_with};
use crate::config::ExplorerSettings;
use crate::domain::ports::{PhotoStore, PhotoStoreError};

const PREVIEW_WIDTH: &str = "800";

/// Photo store listing files from a storage bucket.
pub struct AppwritePhotoStore {
    connection: Arc<AppwriteConnection>,
    bucket_id: Option<String>,
}

impl AppwritePhotoStore {
    /// Build a store for the bucket named in `settings`.
    pub fn new(connection: Arc<AppwriteConnection>, settings: &ExplorerSettings) -> Self {
        Self {
            connection,
            bucket_id: settings.photo_bucket_id.clone(),
        }
    }

    fn bucket_id(&self) -> Result<&str, HttpFailure> {
        required(self.bucket_id.as_deref(), "photo_bucket_id")
    }

    async fn fetch_ids(&self, marker_id: &str) -> Result<Vec<String>, HttpFailure> {
        let url = self
            .connection
            .url(&["storage", "buckets", self.bucket_id()?, "files"])?;
        let request = self
            .connection
            .request(Method::GET, url)?
            .query(&[(QUERY_PARAM, starts_with("$id", marker_id))]);
        let response = self.connection.execute(request).await?;
        let files = decode::<FileListDto>(&response.body, "file list")?;
        Ok(files.files.into_iter().map(|file| file.id).collect())
    }
}

#[async_trait]
impl PhotoStore for AppwritePhotoStore {
    async fn list_photo_ids(&self, marker_id: &str) -> Result<Vec<String>, PhotoStoreError> {
        self.fetch_ids(marker_id).await.map_err(PhotoStoreError::from)
    }

    fn preview_url(&self, file_id: &str) -> Result<Url, PhotoStoreError> {
        let bucket_id = self.bucket_id()?;
        Ok(self.connection.public_url(
            &["storage", "buckets", bucket_id, "files", file_id, "preview"],
            &[("width", PREVIEW_WIDTH)],
        )?)
    }
}
