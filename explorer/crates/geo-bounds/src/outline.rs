//! Wire codec for listing outlines.
//!
//! Outlines travel as a JSON-encoded string holding an ordered array of
//! `[latitude, longitude]` pairs. A blank string is an empty outline.

use crate::Coordinate;

/// Errors raised while decoding or encoding an outline.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    /// The payload is not a JSON array of `[lat, lon]` pairs.
    #[error("outline is not a JSON array of coordinate pairs: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A point carries a NaN or infinite component.
    #[error("outline point {index} is not finite")]
    NonFinite {
        /// Zero-based position of the offending point.
        index: usize,
    },
}

/// Decode the wire `way` string into an ordered outline.
///
/// # Errors
///
/// Returns [`OutlineError::Malformed`] when the text is not a JSON array of
/// two-element numeric arrays.
///
/// # Examples
/// ```
/// use geo_bounds::{Coordinate, decode_outline};
///
/// let points = decode_outline("[[52.1, 21.0], [52.2, 21.1]]").expect("valid outline");
/// assert_eq!(points.first(), Some(&Coordinate::new(52.1, 21.0)));
/// assert!(decode_outline("").expect("blank outline").is_empty());
/// ```
pub fn decode_outline(raw: &str) -> Result<Vec<Coordinate>, OutlineError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let points: Vec<Coordinate> = serde_json::from_str(raw)?;
    check_finite(&points)?;
    Ok(points)
}

/// Encode an outline into the wire `way` string.
///
/// # Errors
///
/// Returns [`OutlineError::NonFinite`] when a point cannot be represented
/// in JSON.
pub fn encode_outline(points: &[Coordinate]) -> Result<String, OutlineError> {
    check_finite(points)?;
    Ok(serde_json::to_string(points)?)
}

fn check_finite(points: &[Coordinate]) -> Result<(), OutlineError> {
    match points.iter().position(|point| !point.is_finite()) {
        Some(index) => Err(OutlineError::NonFinite { index }),
        None => Ok(()),
    }
}
