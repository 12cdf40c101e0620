//! End-to-end coverage of the viewport pipeline.
//!
//! Drives the controller through the map surface bridge with raw surface
//! messages, substituting a scripted listing source for the backend.

use std::sync::Arc;

use explorer::domain::ports::ListingSourceError;
use explorer::domain::{PipelineOutcome, ViewportConfig, ViewportController};
use explorer::inbound::map_surface::{MapSurfaceBridge, SurfaceCommand};
use explorer::test_support::{ScriptedListingSource, listing_at};
use geo_bounds::MapBounds;
use rstest::{fixture, rstest};
use tokio::sync::mpsc;

const VIEWPORT_MESSAGE: &str =
    r#"{"type":"boundsChanged","bounds":{"north":10,"south":0,"east":10,"west":0}}"#;

#[fixture]
fn viewport() -> MapBounds {
    MapBounds::new(10.0, 0.0, 10.0, 0.0).expect("valid bounds")
}

fn scripted() -> ScriptedListingSource {
    ScriptedListingSource::default()
        .with_category(
            "apartments",
            vec![listing_at("a-in", 5.0, 5.0), listing_at("a-out", 15.0, 5.0)],
        )
        .with_category("house", vec![listing_at("h-in", 2.0, 2.0)])
}

fn controller(source: Arc<ScriptedListingSource>) -> Arc<ViewportController> {
    Arc::new(ViewportController::new(source, ViewportConfig::default()))
}

fn marker_ids(command: &SurfaceCommand) -> Vec<String> {
    match command {
        SurfaceCommand::UpdateMarkers(markers) => {
            markers.iter().map(|marker| marker.id.clone()).collect()
        }
        SurfaceCommand::ChangeMapType(layer) => panic!("unexpected layer command {layer}"),
    }
}

#[rstest]
#[tokio::test]
async fn pan_then_category_change_renders_matching_markers() {
    let controller = controller(Arc::new(scripted()));
    let bridge = MapSurfaceBridge::new(Arc::clone(&controller));

    let after_pan = bridge
        .handle_message(VIEWPORT_MESSAGE)
        .await
        .expect("markers after pan");
    assert_eq!(marker_ids(&after_pan), vec!["a-in"]);

    let outcome = controller
        .category_changed("house")
        .await
        .expect("category accepted");
    assert!(matches!(outcome, PipelineOutcome::Applied { count: 1, .. }));
    assert_eq!(marker_ids(&bridge.render_markers()), vec!["h-in"]);
    assert_eq!(
        bridge
            .render_markers()
            .to_script()
            .expect("script renders"),
        r#"updateMarkers([{"id":"h-in","position":[2.0,2.0],"title":"house","wayPoints":[],"icon":"home"}])"#
    );
}

#[rstest]
#[tokio::test]
async fn bounds_go_to_the_backend_only_when_it_filters(viewport: MapBounds) {
    let filtering = Arc::new(scripted().with_range_filter());
    let plain = Arc::new(scripted());

    for source in [&filtering, &plain] {
        let bridge = MapSurfaceBridge::new(controller(Arc::clone(source)));
        let command = bridge
            .handle_message(VIEWPORT_MESSAGE)
            .await
            .expect("markers rendered");
        assert_eq!(marker_ids(&command), vec!["a-in"]);
    }

    assert_eq!(filtering.calls()[0].bounds, Some(viewport));
    assert_eq!(plain.calls()[0].bounds, None);
}

#[rstest]
#[tokio::test]
async fn slow_category_response_does_not_overwrite_newer_one() {
    let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
    let mut source = scripted().with_entry_signal(entered_tx);
    let release_apartments = source.gate("apartments");
    let controller = controller(Arc::new(source));

    let slow = controller.category_changed("apartments");
    let fast = async {
        assert_eq!(entered_rx.recv().await.as_deref(), Some("apartments"));
        let outcome = controller.category_changed("house").await;
        release_apartments.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(
        slow.expect("category accepted"),
        PipelineOutcome::Superseded {
            generation: 1,
            latest: 2,
        }
    );
    assert!(matches!(
        fast.expect("category accepted"),
        PipelineOutcome::Applied { generation: 2, .. }
    ));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.category, "house");
    assert_eq!(snapshot.listings[0].osm_id, "h-in");
}

#[rstest]
#[tokio::test]
async fn failed_fetch_keeps_previous_markers() {
    let source = scripted().failing("castle", ListingSourceError::timeout("30s elapsed"));
    let controller = controller(Arc::new(source));
    let bridge = MapSurfaceBridge::new(Arc::clone(&controller));
    bridge.handle_message(VIEWPORT_MESSAGE).await;

    let outcome = controller
        .category_changed("castle")
        .await
        .expect("category accepted");

    assert!(matches!(outcome, PipelineOutcome::Failed { .. }));
    assert_eq!(controller.active_category(), "castle");
    assert_eq!(marker_ids(&bridge.render_markers()), vec!["a-in"]);
}

#[rstest]
#[tokio::test]
async fn subscribers_observe_published_snapshots() {
    let controller = controller(Arc::new(scripted()));
    let mut snapshots = controller.subscribe();

    controller.refresh().await;

    snapshots.changed().await.expect("controller alive");
    let snapshot = snapshots.borrow_and_update().clone();
    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.listings.len(), 2);
}
