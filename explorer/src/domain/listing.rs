//! Normalised listing record.
//!
//! Listing documents have drifted across schema revisions: some carry
//! `latitude`/`longitude`, some a `center_point`, some neither. Adapters fold
//! every revision into [`ListingRecord`], resolving any explicit coordinate
//! into `position`. The outline (`way`) stays in its wire form and is decoded
//! on demand.

use geo_bounds::{Coordinate, OutlineError, decode_outline};

/// Postal address fragments carried by a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingAddress {
    /// Street name.
    pub street: Option<String>,
    /// House number within the street.
    pub house_number: Option<String>,
    /// House name, when the building has one.
    pub house_name: Option<String>,
}

/// A geographic point of interest sourced from OpenStreetMap data.
///
/// ## Invariants
/// - `osm_id` is non-empty.
/// - Optional text fields are `None` rather than blank.
///
/// # Examples
/// ```
/// use explorer::domain::ListingRecord;
/// use geo_bounds::Coordinate;
///
/// let listing = ListingRecord::new("w42").with_way("[[52.1, 21.0], [52.2, 21.1]]");
/// assert_eq!(listing.resolved_position(), Some(Coordinate::new(52.1, 21.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Stable OpenStreetMap identifier.
    pub osm_id: String,
    /// Display name.
    pub name: Option<String>,
    /// OSM `building` tag, which doubles as the listing category.
    pub building: Option<String>,
    /// OSM `amenity` tag.
    pub amenity: Option<String>,
    /// Address fragments.
    pub address: ListingAddress,
    /// Polygon area in square metres.
    pub way_area: Option<f64>,
    /// Outline in wire form: a JSON array of `[lat, lon]` pairs.
    pub way: Option<String>,
    /// Explicit coordinate resolved from `latitude`/`longitude` or
    /// `center_point`.
    pub position: Option<Coordinate>,
}

impl ListingRecord {
    /// Start a record with only its identifier set.
    pub fn new(osm_id: impl Into<String>) -> Self {
        Self {
            osm_id: osm_id.into(),
            name: None,
            building: None,
            amenity: None,
            address: ListingAddress::default(),
            way_area: None,
            way: None,
            position: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the building tag.
    #[must_use]
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    /// Set the house number.
    #[must_use]
    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.address.house_number = Some(house_number.into());
        self
    }

    /// Set the wire outline.
    #[must_use]
    pub fn with_way(mut self, way: impl Into<String>) -> Self {
        self.way = Some(way.into());
        self
    }

    /// Set the explicit coordinate.
    #[must_use]
    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.position = Some(position);
        self
    }

    /// Decode the outline. A missing outline decodes as empty.
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError`] when `way` is not a valid outline.
    pub fn outline(&self) -> Result<Vec<Coordinate>, OutlineError> {
        decode_outline(self.way.as_deref().unwrap_or_default())
    }

    /// Resolve the listing's anchor coordinate.
    ///
    /// Uses the explicit position when it is finite, otherwise the first
    /// outline point. Returns `None` when neither is usable, including when
    /// the outline is malformed.
    pub fn resolved_position(&self) -> Option<Coordinate> {
        if let Some(position) = self.position.filter(|position| position.is_finite()) {
            return Some(position);
        }
        self.outline()
            .ok()?
            .first()
            .copied()
            .filter(|point| point.is_finite())
    }
}
