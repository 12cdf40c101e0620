//! Script commands injected into the embedded map surface.

use std::fmt;

use crate::domain::DisplayMarker;

/// Tile layers offered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapLayer {
    /// Light vector basemap.
    #[default]
    Carto,
    /// Standard OpenStreetMap tiles.
    Standard,
    /// Aerial imagery.
    Satellite,
}

impl MapLayer {
    /// Layer name understood by the surface's `changeMapType`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carto => "carto",
            Self::Standard => "standard",
            Self::Satellite => "satellite",
        }
    }

    /// The layer after this one in the toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Carto => Self::Standard,
            Self::Standard => Self::Satellite,
            Self::Satellite => Self::Carto,
        }
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command for the surface, rendered as the script that performs it.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// Replace every marker and outline.
    UpdateMarkers(Vec<DisplayMarker>),
    /// Switch the tile layer.
    ChangeMapType(MapLayer),
}

impl SurfaceCommand {
    /// Script source to inject.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error if the marker payload cannot be
    /// encoded as JSON.
    pub fn to_script(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::UpdateMarkers(markers) => {
                Ok(format!("updateMarkers({})", serde_json::to_string(markers)?))
            }
            Self::ChangeMapType(layer) => Ok(format!("changeMapType('{layer}')")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for script rendering.

    use super::*;
    use geo_bounds::Coordinate;
    use rstest::rstest;

    #[rstest]
    #[case(MapLayer::Carto, MapLayer::Standard)]
    #[case(MapLayer::Standard, MapLayer::Satellite)]
    #[case(MapLayer::Satellite, MapLayer::Carto)]
    fn layers_cycle(#[case] current: MapLayer, #[case] expected: MapLayer) {
        assert_eq!(current.next(), expected);
    }

    #[rstest]
    fn renders_change_map_type() {
        let script = SurfaceCommand::ChangeMapType(MapLayer::Satellite)
            .to_script()
            .expect("script renders");
        assert_eq!(script, "changeMapType('satellite')");
    }

    #[rstest]
    fn renders_update_markers_payload() {
        let marker = DisplayMarker {
            id: "w1".to_owned(),
            position: Coordinate::new(1.0, 2.0),
            title: "house 3".to_owned(),
            way_points: Vec::new(),
            icon: "home".to_owned(),
        };
        let script = SurfaceCommand::UpdateMarkers(vec![marker])
            .to_script()
            .expect("script renders");
        assert_eq!(
            script,
            r#"updateMarkers([{"id":"w1","position":[1.0,2.0],"title":"house 3","wayPoints":[],"icon":"home"}])"#
        );
    }

    #[rstest]
    fn empty_marker_list_clears_surface() {
        let script = SurfaceCommand::UpdateMarkers(Vec::new())
            .to_script()
            .expect("script renders");
        assert_eq!(script, "updateMarkers([])");
    }
}
