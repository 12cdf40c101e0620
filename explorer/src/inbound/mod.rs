//! Inbound adapters that translate events from the outside world into
//! controller calls while keeping transport details at the edge.

pub mod map_surface;
