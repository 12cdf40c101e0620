//! Listing explorer library modules.
//!
//! A viewport-driven browser over OpenStreetMap-derived property listings:
//! map bounds and category changes drive listing fetches from the backend,
//! which are projected into markers for an embedded map surface.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
