//! Viewport bounding box.
//!
//! Longitudes are compared as a plain `[west, east]` interval. A box whose
//! western edge lies east of its eastern edge therefore contains no points;
//! antimeridian wraparound is not modelled.

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Validation errors returned by [`MapBounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum BoundsError {
    /// One of the extremes is NaN or infinite.
    #[error("bounds must contain finite coordinates")]
    NonFinite,
    /// The northern extreme lies south of the southern extreme.
    #[error("north ({north}) must not be less than south ({south})")]
    Inverted {
        /// Northern latitude supplied by the caller.
        north: f64,
        /// Southern latitude supplied by the caller.
        south: f64,
    },
}

/// A rectangular viewport expressed as latitude and longitude extremes.
///
/// ## Invariants
/// - every extreme is finite;
/// - `north >= south`.
///
/// # Examples
/// ```
/// use geo_bounds::{Coordinate, MapBounds};
///
/// let bounds = MapBounds::new(10.0, 0.0, 10.0, 0.0).expect("valid bounds");
/// assert!(bounds.contains(Coordinate::new(5.0, 5.0)));
/// assert!(!bounds.contains(Coordinate::new(15.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBounds")]
pub struct MapBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

#[derive(Deserialize)]
struct UncheckedBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl TryFrom<UncheckedBounds> for MapBounds {
    type Error = BoundsError;

    fn try_from(value: UncheckedBounds) -> Result<Self, Self::Error> {
        Self::new(value.north, value.south, value.east, value.west)
    }
}

impl MapBounds {
    /// Validate and construct a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::NonFinite`] when any extreme is NaN or infinite
    /// and [`BoundsError::Inverted`] when `north < south`.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, BoundsError> {
        if [north, south, east, west]
            .into_iter()
            .any(|value| !value.is_finite())
        {
            return Err(BoundsError::NonFinite);
        }
        if north < south {
            return Err(BoundsError::Inverted { north, south });
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Northern latitude extreme.
    #[must_use]
    pub const fn north(&self) -> f64 {
        self.north
    }

    /// Southern latitude extreme.
    #[must_use]
    pub const fn south(&self) -> f64 {
        self.south
    }

    /// Eastern longitude extreme.
    #[must_use]
    pub const fn east(&self) -> f64 {
        self.east
    }

    /// Western longitude extreme.
    #[must_use]
    pub const fn west(&self) -> f64 {
        self.west
    }

    /// Return whether `point` lies inside the box, edges included.
    ///
    /// Non-finite points are never contained.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.is_finite()
            && (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}
