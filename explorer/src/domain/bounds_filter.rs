//! Client-side viewport filtering of listings.

use geo_bounds::MapBounds;

use crate::domain::ListingRecord;

/// Keep only listings whose resolved position lies inside `bounds`.
///
/// Order is preserved. Listings without a resolvable position are dropped.
/// When `bounds` is `None` the input is returned unchanged.
///
/// # Examples
/// ```
/// use explorer::domain::{ListingRecord, filter_within_bounds};
/// use geo_bounds::{Coordinate, MapBounds};
///
/// let bounds = MapBounds::new(10.0, 0.0, 10.0, 0.0).expect("valid bounds");
/// let inside = ListingRecord::new("in").with_position(Coordinate::new(5.0, 5.0));
/// let outside = ListingRecord::new("out").with_position(Coordinate::new(15.0, 5.0));
///
/// let kept = filter_within_bounds(vec![inside.clone(), outside], Some(&bounds));
/// assert_eq!(kept, vec![inside]);
/// ```
pub fn filter_within_bounds(
    listings: Vec<ListingRecord>,
    bounds: Option<&MapBounds>,
) -> Vec<ListingRecord> {
    let Some(bounds) = bounds else {
        return listings;
    };
    listings
        .into_iter()
        .filter(|listing| {
            listing
                .resolved_position()
                .is_some_and(|position| bounds.contains(position))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for viewport filtering.

    use super::*;
    use geo_bounds::Coordinate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bounds() -> MapBounds {
        MapBounds::new(10.0, 0.0, 10.0, 0.0).expect("valid bounds")
    }

    fn at(id: &str, latitude: f64, longitude: f64) -> ListingRecord {
        ListingRecord::new(id).with_position(Coordinate::new(latitude, longitude))
    }

    #[rstest]
    fn keeps_inside_and_drops_outside_and_unresolvable(bounds: MapBounds) {
        let listings = vec![
            at("inside", 5.0, 5.0),
            at("outside", 15.0, 5.0),
            ListingRecord::new("broken").with_way("not json"),
            ListingRecord::new("nowhere"),
        ];

        let kept = filter_within_bounds(listings, Some(&bounds));

        let ids: Vec<&str> = kept.iter().map(|listing| listing.osm_id.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[rstest]
    fn no_bounds_is_identity() {
        let listings = vec![at("a", 50.0, 50.0), ListingRecord::new("b")];
        assert_eq!(filter_within_bounds(listings.clone(), None), listings);
    }

    #[rstest]
    fn output_is_an_ordered_subset_inside_the_box(bounds: MapBounds) {
        let mut listings = Vec::new();
        for step in -4_i32..=14 {
            for offset in [-0.5, 0.0, 0.5] {
                let latitude = f64::from(step) + offset;
                let longitude = 10.0 - f64::from(step);
                listings.push(at(&format!("{step}:{offset}"), latitude, longitude));
            }
        }

        let kept = filter_within_bounds(listings.clone(), Some(&bounds));

        let mut remaining = listings.iter();
        for listing in &kept {
            assert!(
                remaining.any(|candidate| candidate == listing),
                "output must preserve input order"
            );
            let position = listing.resolved_position().expect("kept listings resolve");
            assert!(bounds.contains(position));
        }
        assert!(!kept.is_empty());
        assert!(kept.len() < listings.len());
    }

    #[rstest]
    fn filtering_is_idempotent(bounds: MapBounds) {
        let listings = vec![at("a", 1.0, 1.0), at("b", 20.0, 1.0), at("c", 10.0, 10.0)];
        let once = filter_within_bounds(listings, Some(&bounds));
        let twice = filter_within_bounds(once.clone(), Some(&bounds));
        assert_eq!(once, twice);
    }
}
