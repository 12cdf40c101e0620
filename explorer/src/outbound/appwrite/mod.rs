//! Appwrite outbound adapters.
//!
//! Thin reqwest implementations of the listing, photo, and account ports
//! against the Appwrite REST API. All adapters share one
//! [`AppwriteConnection`] so a session created at login authenticates later
//! calls.

mod account;
mod connection;
mod dto;
mod http;
mod listing_source;
mod photo_store;
mod query;

pub use account::AppwriteAccountGateway;
pub use connection::AppwriteConnection;
pub use listing_source::AppwriteListingSource;
pub use photo_store::AppwritePhotoStore;
