//! Dispatch of surface messages into the viewport controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::commands::{MapLayer, SurfaceCommand};
use super::messages::{MapState, SurfaceMessage, decode_surface_message};
use crate::domain::{DisplayMarker, MarkerProjector, PipelineOutcome, ViewportController};

#[derive(Debug, Default)]
struct SurfaceState {
    layer: MapLayer,
    map_state: Option<MapState>,
}

/// Connects one embedded map surface to a [`ViewportController`].
pub struct MapSurfaceBridge {
    controller: Arc<ViewportController>,
    popups: MarkerProjector,
    state: Mutex<SurfaceState>,
}

impl MapSurfaceBridge {
    /// Create a bridge over `controller`, starting on the default layer.
    pub fn new(controller: Arc<ViewportController>) -> Self {
        Self {
            controller,
            popups: MarkerProjector::building_icons(),
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// Decode and dispatch one raw message.
    ///
    /// Returns the command to inject in response, if any. Rejected messages
    /// are logged and yield `None`.
    pub async fn handle_message(&self, raw: &str) -> Option<SurfaceCommand> {
        match decode_surface_message(raw) {
            Ok(message) => self.dispatch(message).await,
            Err(error) => {
                warn!(%error, "ignoring surface message");
                None
            }
        }
    }

    /// Dispatch a decoded message.
    ///
    /// A bounds change re-runs the listing pipeline and answers with fresh
    /// markers once its response is published; a superseded or failed fetch
    /// answers with nothing, leaving the surface as it is.
    pub async fn dispatch(&self, message: SurfaceMessage) -> Option<SurfaceCommand> {
        match message {
            SurfaceMessage::BoundsChanged(bounds) => {
                match self.controller.bounds_changed(bounds).await {
                    PipelineOutcome::Applied { .. } => Some(self.render_markers()),
                    PipelineOutcome::Superseded { .. } | PipelineOutcome::Failed { .. } => None,
                }
            }
            SurfaceMessage::MarkerClick { marker_id } => {
                if self.controller.select_marker(&marker_id).is_none() {
                    debug!(marker_id = %marker_id, "marker press for unknown listing");
                }
                None
            }
            SurfaceMessage::MapStateChanged(map_state) => {
                self.lock_state().map_state = Some(map_state);
                None
            }
        }
    }

    /// Command drawing the currently published markers.
    pub fn render_markers(&self) -> SurfaceCommand {
        SurfaceCommand::UpdateMarkers(self.controller.snapshot().markers)
    }

    /// Advance to the next tile layer and return the command applying it.
    pub fn cycle_layer(&self) -> SurfaceCommand {
        let mut state = self.lock_state();
        state.layer = state.layer.next();
        SurfaceCommand::ChangeMapType(state.layer)
    }

    /// Active tile layer.
    pub fn layer(&self) -> MapLayer {
        self.lock_state().layer
    }

    /// Last zoom and centre reported by the surface.
    pub fn map_state(&self) -> Option<MapState> {
        self.lock_state().map_state
    }

    /// Popup marker for the selected listing, tagged with its building type.
    pub fn selected_marker(&self) -> Option<DisplayMarker> {
        self.controller
            .selected()
            .map(|listing| self.popups.project(&listing))
    }

    fn lock_state(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
