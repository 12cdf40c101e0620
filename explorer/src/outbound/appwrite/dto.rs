//! DTOs for decoding Appwrite REST responses.
//!
//! The adapters decode into these transport DTOs first, then map into domain
//! records in one pass. Listing documents are lenient: every schema revision
//! seen in the collection must decode, so most fields are optional and
//! loosely typed until normalisation.

use geo_bounds::Coordinate;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::ports::{AccountProfile, AccountSession, ListingPage};
use crate::domain::{ListingAddress, ListingRecord};

#[derive(Debug, Deserialize)]
pub(super) struct DocumentListDto {
    #[serde(default)]
    pub(super) total: u64,
    #[serde(default)]
    pub(super) documents: Vec<ListingDocumentDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ListingDocumentDto {
    #[serde(rename = "$id")]
    pub(super) document_id: Option<String>,
    pub(super) osm_id: Option<Value>,
    pub(super) name: Option<String>,
    pub(super) building: Option<String>,
    pub(super) amenity: Option<String>,
    pub(super) addr_street: Option<String>,
    pub(super) addr_housenumber: Option<String>,
    pub(super) addr_housename: Option<String>,
    pub(super) way_area: Option<Value>,
    pub(super) way: Option<String>,
    pub(super) center_point: Option<Value>,
    pub(super) latitude: Option<Value>,
    pub(super) longitude: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileListDto {
    #[serde(default)]
    pub(super) files: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileDto {
    #[serde(rename = "$id")]
    pub(super) id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionDto {
    #[serde(rename = "$id")]
    pub(super) id: String,
    #[serde(rename = "userId")]
    pub(super) user_id: String,
    #[serde(default)]
    pub(super) secret: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AccountDto {
    #[serde(rename = "$id")]
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) email: String,
}

impl DocumentListDto {
    /// Normalise every document; documents without any identifier are
    /// logged and skipped.
    pub(super) fn into_listing_page(self) -> ListingPage {
        let listings = self
            .documents
            .into_iter()
            .filter_map(ListingDocumentDto::into_listing)
            .collect();
        ListingPage {
            listings,
            total: self.total,
        }
    }
}

impl ListingDocumentDto {
    fn into_listing(self) -> Option<ListingRecord> {
        let Some(osm_id) = self
            .osm_id
            .as_ref()
            .and_then(identifier)
            .or_else(|| non_blank(self.document_id.clone()))
        else {
            warn!("skipping listing document without osm_id or $id");
            return None;
        };
        let position = self.position();

        Some(ListingRecord {
            osm_id,
            name: non_blank(self.name),
            building: non_blank(self.building),
            amenity: non_blank(self.amenity),
            address: ListingAddress {
                street: non_blank(self.addr_street),
                house_number: non_blank(self.addr_housenumber),
                house_name: non_blank(self.addr_housename),
            },
            way_area: self.way_area.as_ref().and_then(number),
            way: non_blank(self.way),
            position,
        })
    }

    /// Explicit coordinate: `latitude`/`longitude` first, then
    /// `center_point`.
    fn position(&self) -> Option<Coordinate> {
        let explicit = match (
            self.latitude.as_ref().and_then(number),
            self.longitude.as_ref().and_then(number),
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        };
        explicit
            .filter(|point| point.is_finite())
            .or_else(|| self.center_point.as_ref().and_then(parse_center_point))
    }
}

impl From<SessionDto> for AccountSession {
    fn from(dto: SessionDto) -> Self {
        Self {
            id: dto.id,
            user_id: dto.user_id,
        }
    }
}

impl From<AccountDto> for AccountProfile {
    fn from(dto: AccountDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            email: dto.email,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(Some(text.trim().to_owned())),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Numbers may arrive as JSON numbers or numeric strings.
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

/// Parse a `center_point` in any of its stored shapes:
/// a `[lat, lon]` pair, a GeoJSON `Point` (`[lon, lat]`), a `"lat,lon"`
/// string, a WKT `POINT(lon lat)` string, or one of the JSON forms
/// embedded in a string.
fn parse_center_point(value: &Value) -> Option<Coordinate> {
    let point = match value {
        Value::Array(pair) => pair_coordinate(pair, false),
        Value::Object(object) => object
            .get("coordinates")
            .and_then(Value::as_array)
            .and_then(|pair| pair_coordinate(pair, true)),
        Value::String(text) => parse_center_text(text.trim()),
        _ => None,
    };
    point.filter(|point| point.is_finite())
}

fn pair_coordinate(pair: &[Value], lon_first: bool) -> Option<Coordinate> {
    let [first, second] = pair else {
        return None;
    };
    let (first, second) = (number(first)?, number(second)?);
    Some(if lon_first {
        Coordinate::new(second, first)
    } else {
        Coordinate::new(first, second)
    })
}

fn parse_center_text(text: &str) -> Option<Coordinate> {
    if text.starts_with('[') || text.starts_with('{') {
        let nested: Value = serde_json::from_str(text).ok()?;
        return match nested {
            Value::String(_) => None,
            other => parse_center_point(&other),
        };
    }
    if let Some(body) = strip_wkt_point(text) {
        let mut parts = body.split_whitespace();
        let longitude = parts.next()?.parse().ok()?;
        let latitude = parts.next()?.parse().ok()?;
        return parts
            .next()
            .is_none()
            .then(|| Coordinate::new(latitude, longitude));
    }
    let (latitude, longitude) = text.split_once(',')?;
    Some(Coordinate::new(
        latitude.trim().parse().ok()?,
        longitude.trim().parse().ok()?,
    ))
}

fn strip_wkt_point(text: &str) -> Option<&str> {
    let prefix = text.get(..5)?;
    if !prefix.eq_ignore_ascii_case("POINT") {
        return None;
    }
    text.get(5..)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

#[cfg(test)]
mod tests {
    //! Coverage for every historical listing document shape.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn decode(document: Value) -> Option<ListingRecord> {
        serde_json::from_value::<ListingDocumentDto>(document)
            .expect("document decodes")
            .into_listing()
    }

    #[rstest]
    fn latitude_longitude_revision() {
        let listing = decode(json!({
            "$id": "doc1",
            "osm_id": "w100",
            "name": "Villa Mare",
            "building": "villa",
            "addr_street": "Nadmorska",
            "addr_housenumber": "7",
            "way_area": 312.5,
            "way": "[[54.5, 18.5], [54.6, 18.6]]",
            "latitude": 54.55,
            "longitude": 18.55
        }))
        .expect("listing kept");

        assert_eq!(listing.osm_id, "w100");
        assert_eq!(listing.position, Some(Coordinate::new(54.55, 18.55)));
        assert_eq!(listing.address.street.as_deref(), Some("Nadmorska"));
        assert_eq!(listing.way_area, Some(312.5));
    }

    #[rstest]
    #[case::pair(json!([52.1, 21.0]))]
    #[case::geojson(json!({ "type": "Point", "coordinates": [21.0, 52.1] }))]
    #[case::comma_text(json!("52.1, 21.0"))]
    #[case::wkt(json!("POINT(21.0 52.1)"))]
    #[case::json_in_string(json!("[52.1, 21.0]"))]
    #[case::geojson_in_string(json!(r#"{"type":"Point","coordinates":[21.0,52.1]}"#))]
    fn center_point_revisions(#[case] center_point: Value) {
        let listing = decode(json!({
            "osm_id": 42,
            "building": "house",
            "center_point": center_point
        }))
        .expect("listing kept");

        assert_eq!(listing.osm_id, "42");
        assert_eq!(listing.position, Some(Coordinate::new(52.1, 21.0)));
    }

    #[rstest]
    fn outline_only_revision_resolves_from_way() {
        let listing = decode(json!({
            "osm_id": "w7",
            "building": "house",
            "way": "[[50.0, 19.0], [50.1, 19.1]]"
        }))
        .expect("listing kept");

        assert_eq!(listing.position, None);
        assert_eq!(listing.resolved_position(), Some(Coordinate::new(50.0, 19.0)));
    }

    #[rstest]
    #[case::garbage(json!("north-east of the church"))]
    #[case::short_pair(json!([52.1]))]
    #[case::non_numeric(json!(["a", "b"]))]
    #[case::wkt_extra_axis(json!("POINT(21.0 52.1 3.0)"))]
    fn unusable_center_points_leave_position_unset(#[case] center_point: Value) {
        let listing = decode(json!({ "osm_id": "w8", "center_point": center_point }))
            .expect("listing kept");
        assert_eq!(listing.position, None);
    }

    #[rstest]
    fn half_explicit_coordinates_fall_back_to_center_point() {
        let listing = decode(json!({
            "osm_id": "w9",
            "latitude": 10.0,
            "center_point": "1.5,2.5"
        }))
        .expect("listing kept");
        assert_eq!(listing.position, Some(Coordinate::new(1.5, 2.5)));
    }

    #[rstest]
    fn blank_text_fields_become_none() {
        let listing = decode(json!({
            "osm_id": "w10",
            "name": "",
            "building": "  ",
            "addr_housenumber": "",
            "way": ""
        }))
        .expect("listing kept");

        assert_eq!(listing.name, None);
        assert_eq!(listing.building, None);
        assert_eq!(listing.address.house_number, None);
        assert_eq!(listing.way, None);
    }

    #[rstest]
    fn missing_osm_id_falls_back_to_document_id() {
        let listing = decode(json!({ "$id": "doc-5", "building": "farm" })).expect("kept");
        assert_eq!(listing.osm_id, "doc-5");
    }

    #[rstest]
    fn documents_without_identifiers_are_skipped() {
        let page = serde_json::from_value::<DocumentListDto>(json!({
            "total": 2,
            "documents": [
                { "building": "house" },
                { "osm_id": "w1", "building": "house" }
            ]
        }))
        .expect("page decodes")
        .into_listing_page();

        assert_eq!(page.total, 2);
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].osm_id, "w1");
    }
}
