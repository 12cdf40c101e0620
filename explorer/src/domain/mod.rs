//! Domain model and services for the listing explorer.
//!
//! Purpose: keep the viewport-driven fetch loop independent of the backend
//! and the map surface. Adapters depend on this module; it depends only on
//! the ports declared in [`ports`].
//!
//! Public surface:
//! - `ListingRecord`: normalised listing across schema revisions.
//! - `filter_within_bounds`: client-side viewport filter.
//! - `MarkerProjector` / `DisplayMarker`: render-ready markers.
//! - `ViewportController`: generation-stamped fetch pipeline.
//! - `PhotoGallery`, `AuthService`: marker photos and OAuth login.

pub mod auth;
pub mod bounds_filter;
pub mod category;
pub mod listing;
pub mod marker;
pub mod photos;
pub mod ports;
pub mod viewport;

pub use self::auth::{AuthService, CurrentUser, OAuthCallback, OAuthCallbackError};
pub use self::bounds_filter::filter_within_bounds;
pub use self::category::{CategoryError, CategorySelection};
pub use self::listing::{ListingAddress, ListingRecord};
pub use self::marker::{DisplayMarker, MarkerProjector, display_title};
pub use self::photos::PhotoGallery;
pub use self::viewport::{PipelineOutcome, ViewportConfig, ViewportController, ViewportSnapshot};
