//! Messages posted by the embedded map surface.
//!
//! The surface posts untyped JSON strings. They are decoded once, here, into
//! [`SurfaceMessage`]; nothing past this module sees raw JSON.

use geo_bounds::MapBounds;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Geographic centre reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Zoom level and centre after a zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MapState {
    /// Tile zoom level.
    pub zoom: f64,
    /// Map centre.
    pub center: LatLng,
}

/// A decoded surface message.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMessage {
    /// The visible viewport moved.
    BoundsChanged(MapBounds),
    /// A marker was pressed.
    MarkerClick {
        /// Identifier of the pressed marker.
        marker_id: String,
    },
    /// Zoom or centre changed.
    MapStateChanged(MapState),
}

/// Reasons a raw surface message is rejected.
#[derive(Debug, Error)]
pub enum SurfaceMessageError {
    /// The message is not a JSON object.
    #[error("surface message is not a JSON object: {0}")]
    Malformed(#[source] serde_json::Error),
    /// The object has no string `type` field.
    #[error("surface message has no `type` tag")]
    MissingType,
    /// The `type` tag names no known message.
    #[error("unknown surface message type `{0}`")]
    UnknownType(String),
    /// The payload does not match its tag, or its bounds are invalid.
    #[error("invalid `{kind}` payload: {source}")]
    InvalidPayload {
        /// Message tag whose payload failed.
        kind: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct BoundsChangedPayload {
    bounds: MapBounds,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerClickPayload {
    marker_id: String,
}

#[derive(Deserialize)]
struct MapStateChangedPayload {
    state: MapState,
}

const BOUNDS_CHANGED: &str = "boundsChanged";
const MARKER_CLICK: &str = "markerClick";
const MAP_STATE_CHANGED: &str = "mapStateChanged";

/// Decode one raw message posted by the surface.
///
/// Bounds are validated on the way in, so an inverted or non-finite viewport
/// is an [`SurfaceMessageError::InvalidPayload`].
///
/// # Errors
///
/// Returns a [`SurfaceMessageError`] describing why the message was rejected.
///
/// # Examples
/// ```
/// use explorer::inbound::map_surface::{SurfaceMessage, decode_surface_message};
///
/// let message = decode_surface_message(r#"{"type":"markerClick","markerId":"w12"}"#)
///     .expect("valid message");
/// assert_eq!(message, SurfaceMessage::MarkerClick { marker_id: "w12".to_owned() });
/// ```
pub fn decode_surface_message(raw: &str) -> Result<SurfaceMessage, SurfaceMessageError> {
    let value: Value = serde_json::from_str(raw).map_err(SurfaceMessageError::Malformed)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(SurfaceMessageError::MissingType)?;

    match kind.as_str() {
        BOUNDS_CHANGED => payload::<BoundsChangedPayload>(BOUNDS_CHANGED, value)
            .map(|payload| SurfaceMessage::BoundsChanged(payload.bounds)),
        MARKER_CLICK => payload::<MarkerClickPayload>(MARKER_CLICK, value).map(|payload| {
            SurfaceMessage::MarkerClick {
                marker_id: payload.marker_id,
            }
        }),
        MAP_STATE_CHANGED => payload::<MapStateChangedPayload>(MAP_STATE_CHANGED, value)
            .map(|payload| SurfaceMessage::MapStateChanged(payload.state)),
        other => Err(SurfaceMessageError::UnknownType(other.to_owned())),
    }
}

fn payload<T: for<'de> Deserialize<'de>>(
    kind: &'static str,
    value: Value,
) -> Result<T, SurfaceMessageError> {
    serde_json::from_value(value)
        .map_err(|source| SurfaceMessageError::InvalidPayload { kind, source })
}
