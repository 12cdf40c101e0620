//! Inbound adapter for the embedded map surface.
//!
//! The surface renders markers and posts JSON messages back when the user
//! pans, zooms, or presses a marker. This module decodes those messages,
//! feeds them to the viewport controller, and renders the scripts injected
//! in reply.

mod bridge;
mod commands;
mod messages;

pub use bridge::MapSurfaceBridge;
pub use commands::{MapLayer, SurfaceCommand};
pub use messages::{LatLng, MapState, SurfaceMessage, SurfaceMessageError, decode_surface_message};
