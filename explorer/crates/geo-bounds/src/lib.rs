//! Geographic primitives shared by the explorer client.
//!
//! The crate owns three small concerns:
//! - [`Coordinate`]: a latitude/longitude pair serialised as `[lat, lon]`.
//! - [`MapBounds`]: a validated viewport box with inclusive containment.
//! - [`decode_outline`] / [`encode_outline`]: the wire codec for listing
//!   outlines (`way`), a JSON array of `[lat, lon]` pairs.

mod bounds;
mod coordinate;
mod outline;

pub use bounds::{BoundsError, MapBounds};
pub use coordinate::Coordinate;
pub use outline::{OutlineError, decode_outline, encode_outline};
