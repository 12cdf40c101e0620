//! Projection of listings into render-ready map markers.

use geo_bounds::Coordinate;
use serde::Serialize;
use tracing::warn;

use crate::domain::ListingRecord;
use crate::domain::category::category_icon;

/// Icon used by [`MarkerProjector::building_icons`] when the building tag is
/// missing.
pub const DEFAULT_BUILDING_ICON: &str = "home";

/// A marker ready to be drawn by the map surface.
///
/// Serialised in the shape the surface's `updateMarkers` function expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMarker {
    /// Mirrors [`ListingRecord::osm_id`].
    pub id: String,
    /// Marker anchor as `[lat, lon]`.
    pub position: Coordinate,
    /// Popup title.
    pub title: String,
    /// Building outline; empty when the listing has none or it is malformed.
    pub way_points: Vec<Coordinate>,
    /// Icon tag.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum IconSource {
    Fixed(&'static str),
    BuildingType,
}

/// Derives [`DisplayMarker`]s from listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerProjector {
    icons: IconSource,
}

impl MarkerProjector {
    /// Tag every marker with the icon of `category`.
    pub fn for_category(category: &str) -> Self {
        Self {
            icons: IconSource::Fixed(category_icon(category)),
        }
    }

    /// Tag each marker with its own building type, as listing popups do.
    pub fn building_icons() -> Self {
        Self {
            icons: IconSource::BuildingType,
        }
    }

    /// Project every listing; one marker per input, in input order.
    pub fn project_all(&self, listings: &[ListingRecord]) -> Vec<DisplayMarker> {
        listings.iter().map(|listing| self.project(listing)).collect()
    }

    /// Project one listing.
    ///
    /// A malformed outline is logged and replaced by an empty one; the
    /// marker itself is always produced. Position falls back from the
    /// explicit coordinate to the first outline point to `(0, 0)`.
    pub fn project(&self, listing: &ListingRecord) -> DisplayMarker {
        let way_points = listing.outline().unwrap_or_else(|error| {
            warn!(osm_id = %listing.osm_id, %error, "discarding malformed listing outline");
            Vec::new()
        });
        let position = listing
            .position
            .filter(|position| position.is_finite())
            .or_else(|| way_points.first().copied())
            .unwrap_or(Coordinate::ORIGIN);

        DisplayMarker {
            id: listing.osm_id.clone(),
            position,
            title: display_title(listing),
            way_points,
            icon: self.icon_for(listing).to_owned(),
        }
    }

    fn icon_for<'a>(&self, listing: &'a ListingRecord) -> &'a str {
        match self.icons {
            IconSource::Fixed(icon) => icon,
            IconSource::BuildingType => listing
                .building
                .as_deref()
                .filter(|building| !building.trim().is_empty())
                .unwrap_or(DEFAULT_BUILDING_ICON),
        }
    }
}

/// Title shown for a listing.
///
/// Uses the name when present, otherwise the building type followed by the
/// house number (omitted when absent). A listing with neither falls back to
/// its OSM identifier.
///
/// # Examples
/// ```
/// use explorer::domain::{ListingRecord, display_title};
///
/// let named = ListingRecord::new("w1").with_name("Villa Mare");
/// assert_eq!(display_title(&named), "Villa Mare");
///
/// let unnamed = ListingRecord::new("w2").with_building("house").with_house_number("12");
/// assert_eq!(display_title(&unnamed), "house 12");
/// ```
pub fn display_title(listing: &ListingRecord) -> String {
    if let Some(name) = non_blank(listing.name.as_deref()) {
        return name.to_owned();
    }
    let parts: Vec<&str> = [
        non_blank(listing.building.as_deref()),
        non_blank(listing.address.house_number.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if parts.is_empty() {
        return listing.osm_id.clone();
    }
    parts.join(" ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for marker projection.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::named(ListingRecord::new("1").with_name("Villa Mare"), "Villa Mare")]
    #[case::empty_name(
        ListingRecord::new("2").with_name("").with_building("house").with_house_number("12"),
        "house 12"
    )]
    #[case::no_house_number(ListingRecord::new("3").with_building("hotel"), "hotel")]
    #[case::nothing_to_show(ListingRecord::new("w99"), "w99")]
    fn titles_follow_fallback_order(#[case] listing: ListingRecord, #[case] expected: &str) {
        assert_eq!(display_title(&listing), expected);
    }

    #[rstest]
    #[case::malformed(Some("[[1.0, 2.0"))]
    #[case::wrong_shape(Some(r#"{"type": "Polygon"}"#))]
    #[case::absent(None)]
    fn bad_outlines_still_yield_markers(#[case] way: Option<&str>) {
        let mut listing = ListingRecord::new("w7").with_building("house");
        listing.way = way.map(str::to_owned);

        let marker = MarkerProjector::for_category("house").project(&listing);

        assert_eq!(marker.id, "w7");
        assert!(marker.way_points.is_empty());
        assert_eq!(marker.position, Coordinate::ORIGIN);
    }

    #[rstest]
    fn position_falls_back_to_first_outline_point() {
        let listing = ListingRecord::new("w8").with_way("[[52.1, 21.0], [52.2, 21.1]]");
        let marker = MarkerProjector::for_category("house").project(&listing);
        assert_eq!(marker.position, Coordinate::new(52.1, 21.0));
        assert_eq!(marker.way_points.len(), 2);
    }

    #[rstest]
    fn explicit_position_is_preferred() {
        let listing = ListingRecord::new("w9")
            .with_position(Coordinate::new(1.0, 1.0))
            .with_way("[[52.1, 21.0]]");
        let marker = MarkerProjector::for_category("house").project(&listing);
        assert_eq!(marker.position, Coordinate::new(1.0, 1.0));
    }

    #[rstest]
    #[case(MarkerProjector::for_category("hotel"), Some("house"), "bed")]
    #[case(MarkerProjector::for_category("unknown"), Some("house"), "map")]
    #[case(MarkerProjector::building_icons(), Some("villa"), "villa")]
    #[case(MarkerProjector::building_icons(), None, DEFAULT_BUILDING_ICON)]
    fn icons_follow_projector_mode(
        #[case] projector: MarkerProjector,
        #[case] building: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut listing = ListingRecord::new("w10");
        listing.building = building.map(str::to_owned);
        assert_eq!(projector.project(&listing).icon, expected);
    }

    #[rstest]
    fn serialises_in_surface_shape() {
        let listing = ListingRecord::new("w11")
            .with_name("Dom")
            .with_way("[[1.5, 2.5]]");
        let marker = MarkerProjector::for_category("house").project(&listing);

        let value = serde_json::to_value(&marker).expect("marker serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "w11",
                "position": [1.5, 2.5],
                "title": "Dom",
                "wayPoints": [[1.5, 2.5]],
                "icon": "home"
            })
        );
    }
}
