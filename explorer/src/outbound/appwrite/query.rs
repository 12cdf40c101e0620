//! Appwrite query strings.
//!
//! The REST API takes each query as a JSON object passed in a repeated
//! `queries[]` parameter.

use serde_json::{Value, json};

use crate::domain::ports::ListingQuery;

pub(super) const QUERY_PARAM: &str = "queries[]";

const CATEGORY_ATTRIBUTE: &str = "building";
const LATITUDE_ATTRIBUTE: &str = "latitude";
const LONGITUDE_ATTRIBUTE: &str = "longitude";

fn query(method: &str, attribute: Option<&str>, values: Value) -> String {
    let mut object = json!({ "method": method, "values": values });
    if let (Some(attribute), Some(fields)) = (attribute, object.as_object_mut()) {
        fields.insert("attribute".to_owned(), Value::from(attribute));
    }
    object.to_string()
}

pub(super) fn equal(attribute: &str, value: &str) -> String {
    query("equal", Some(attribute), json!([value]))
}

pub(super) fn greater_than_equal(attribute: &str, value: f64) -> String {
    query("greaterThanEqual", Some(attribute), json!([value]))
}

pub(super) fn less_than_equal(attribute: &str, value: f64) -> String {
    query("lessThanEqual", Some(attribute), json!([value]))
}

pub(super) fn starts_with(attribute: &str, prefix: &str) -> String {
    query("startsWith", Some(attribute), json!([prefix]))
}

pub(super) fn limit(limit: usize) -> String {
    query("limit", None, json!([limit]))
}

/// Queries for one listing page. Range predicates are only emitted when the
/// backend is trusted to apply them.
pub(super) fn listing_queries(request: &ListingQuery, range_filter: bool) -> Vec<String> {
    let mut queries = vec![equal(CATEGORY_ATTRIBUTE, &request.category)];
    if let (true, Some(bounds)) = (range_filter, request.bounds) {
        queries.extend([
            greater_than_equal(LATITUDE_ATTRIBUTE, bounds.south()),
            less_than_equal(LATITUDE_ATTRIBUTE, bounds.north()),
            greater_than_equal(LONGITUDE_ATTRIBUTE, bounds.west()),
            less_than_equal(LONGITUDE_ATTRIBUTE, bounds.east()),
        ]);
    }
    queries.push(limit(request.limit));
    queries
}
