//! Behavioural tests for the fixture ports and the unconfigured backend.
//!
//! Missing backend configuration is never fatal at startup; it surfaces as an
//! ordinary failure of the first call that needs it.

use std::sync::Arc;

use explorer::config::ExplorerSettings;
use explorer::domain::ports::{
    AuthBrowser, BrowserOutcome, FixtureAuthBrowser, FixtureListingSource, FixturePhotoStore,
    ListingQuery, ListingSource, ListingSourceError, OAuthProvider, PhotoStore,
};
use explorer::domain::{
    AuthService, PhotoGallery, PipelineOutcome, ViewportConfig, ViewportController,
};
use explorer::outbound::appwrite::{
    AppwriteAccountGateway, AppwriteConnection, AppwriteListingSource, AppwritePhotoStore,
};
use rstest::{fixture, rstest};
use url::Url;

#[fixture]
fn unconfigured() -> ExplorerSettings {
    ExplorerSettings::default()
}

#[fixture]
fn redirect_uri() -> Url {
    Url::parse("explorer://auth").expect("valid redirect")
}

fn connection(settings: &ExplorerSettings) -> Arc<AppwriteConnection> {
    Arc::new(AppwriteConnection::new(settings).expect("client builds"))
}

#[rstest]
#[tokio::test]
async fn fixture_listing_source_yields_an_empty_page() {
    let source = FixtureListingSource;
    let page = source
        .list_listings(&ListingQuery {
            category: "house".to_owned(),
            bounds: None,
            limit: 1000,
        })
        .await
        .expect("fixture never fails");

    assert!(page.listings.is_empty());
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test]
async fn controller_over_fixture_source_publishes_nothing() {
    let controller =
        ViewportController::new(Arc::new(FixtureListingSource), ViewportConfig::default());

    let outcome = controller.refresh().await;

    assert_eq!(
        outcome,
        PipelineOutcome::Applied {
            generation: 1,
            count: 0
        }
    );
}

#[rstest]
#[tokio::test]
async fn fixture_photo_store_has_no_photos() {
    let store = FixturePhotoStore;
    assert!(store.list_photo_ids("w1").await.expect("fixture").is_empty());
    assert!(store.preview_url("w1_front").is_err());

    let gallery = PhotoGallery::new(Arc::new(store));
    assert!(gallery.photos_for_marker("w1").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn fixture_browser_dismisses_sessions(redirect_uri: Url) {
    let outcome = FixtureAuthBrowser
        .open_auth_session(&redirect_uri, &redirect_uri)
        .await
        .expect("fixture browser opens");
    assert_eq!(outcome, BrowserOutcome::Dismissed);
}

#[rstest]
#[tokio::test]
async fn unconfigured_backend_fails_the_fetch_not_the_controller(unconfigured: ExplorerSettings) {
    let source = AppwriteListingSource::new(connection(&unconfigured), &unconfigured);
    let controller = ViewportController::new(Arc::new(source), ViewportConfig::default());

    let outcome = controller.refresh().await;

    assert_eq!(
        outcome,
        PipelineOutcome::Failed {
            generation: 1,
            error: ListingSourceError::configuration("EXPLORER_DATABASE_ID is not set"),
        }
    );
    assert!(controller.snapshot().listings.is_empty());
}

#[rstest]
#[tokio::test]
async fn unconfigured_storage_yields_no_photos(unconfigured: ExplorerSettings) {
    let store = AppwritePhotoStore::new(connection(&unconfigured), &unconfigured);
    let gallery = PhotoGallery::new(Arc::new(store));

    assert!(gallery.photos_for_marker("w1").await.is_empty());
}

#[rstest]
#[tokio::test]
async fn login_without_backend_reports_failure(
    unconfigured: ExplorerSettings,
    redirect_uri: Url,
) {
    let gateway = AppwriteAccountGateway::new(connection(&unconfigured));
    let service = AuthService::new(
        Arc::new(gateway),
        Arc::new(FixtureAuthBrowser),
        redirect_uri,
    );

    assert!(!service.login(OAuthProvider::Google).await);
    assert!(!service.logout().await);
    assert!(service.current_user().await.is_none());
}
