//! WGS84 coordinate primitive.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Serialised as a `[latitude, longitude]` array, the order used by listing
/// outlines and by the map surface's marker payloads.
///
/// # Examples
/// ```
/// use geo_bounds::Coordinate;
///
/// let point: Coordinate = serde_json::from_str("[52.23, 21.01]").expect("valid pair");
/// assert_eq!(point, Coordinate::new(52.23, 21.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// The `(0, 0)` position used when nothing better can be resolved.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Return whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.latitude, value.longitude]
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for coordinate serialisation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn serialises_as_latitude_first_pair() {
        let json = serde_json::to_string(&Coordinate::new(52.5, 13.4)).expect("serialise");
        assert_eq!(json, "[52.5,13.4]");
    }

    #[rstest]
    #[case(Coordinate::new(1.0, 2.0), true)]
    #[case(Coordinate::new(f64::NAN, 2.0), false)]
    #[case(Coordinate::new(1.0, f64::INFINITY), false)]
    fn reports_finiteness(#[case] point: Coordinate, #[case] expected: bool) {
        assert_eq!(point.is_finite(), expected);
    }

    #[rstest]
    fn rejects_pairs_with_wrong_arity() {
        let result = serde_json::from_str::<Coordinate>("[1.0, 2.0, 3.0]");
        assert!(result.is_err(), "three-element arrays are not coordinates");
    }
}
