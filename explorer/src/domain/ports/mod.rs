//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_gateway;
mod auth_browser;
mod listing_source;
mod photo_store;

#[cfg(test)]
pub use account_gateway::MockAccountGateway;
pub use account_gateway::{
    AccountGateway, AccountGatewayError, AccountProfile, AccountSession, OAuthProvider,
};
#[cfg(test)]
pub use auth_browser::MockAuthBrowser;
pub use auth_browser::{AuthBrowser, AuthBrowserError, BrowserOutcome, FixtureAuthBrowser};
#[cfg(test)]
pub use listing_source::MockListingSource;
pub use listing_source::{
    DEFAULT_PAGE_SIZE, FixtureListingSource, ListingPage, ListingQuery, ListingSource,
    ListingSourceError,
};
#[cfg(test)]
pub use photo_store::MockPhotoStore;
pub use photo_store::{FixturePhotoStore, PhotoStore, PhotoStoreError};
