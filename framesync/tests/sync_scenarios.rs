//! End-to-end synchronization scenarios against the headless chart and view.

use std::time::{Duration, Instant};

use framesync::mock::{MockChart, RecordingView, ViewOp};
use framesync::sync::{HighlightEvent, HoverState, Synchronizer};
use framesync::view::chart::ChartState;
use framesync::{FrameSync, Message};
use framesync_common::{
    FrameSyncConfig, ThumbnailConfig, Timestamp, ViewportConfig, load_dataset,
};

const DATASET: [&str; 3] = [
    "2024-01-01T00:00:00Z",
    "2024-01-01T00:00:10Z",
    "2024-01-01T00:00:20Z",
];

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

fn synchronizer(container_width: f32, thumbnail_width: f32) -> Synchronizer<RecordingView> {
    let config = ThumbnailConfig {
        width: thumbnail_width,
        debounce_ms: 50,
        pointer_y: 80.0,
    };
    let mut sync = Synchronizer::new(RecordingView::new(container_width), &config);
    sync.load(DATASET.iter().map(|s| ts(s)).collect()).unwrap();
    sync
}

fn rendered(sync: &Synchronizer<RecordingView>) -> Vec<String> {
    sync.view()
        .strip
        .thumbnails()
        .iter()
        .map(|d| d.url.clone())
        .collect()
}

#[test]
fn test_full_viewport_samples_to_capacity() {
    let mut sync = synchronizer(200.0, 100.0);
    let chart = MockChart::spanning(DATASET[0], DATASET[2], 200.0);

    assert_eq!(sync.on_viewport_change(&chart).unwrap(), 2);
    assert_eq!(
        rendered(&sync),
        vec![
            "/frames/f-2024-01-01-00-00-00.jpg",
            "/frames/f-2024-01-01-00-00-20.jpg",
        ]
    );
}

#[test]
fn test_rerender_is_idempotent() {
    let mut sync = synchronizer(400.0, 100.0);
    let chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);

    sync.on_viewport_change(&chart).unwrap();
    let first = rendered(&sync);
    sync.on_viewport_change(&chart).unwrap();

    assert_eq!(rendered(&sync), first);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_highlight_places_target_and_clamps() {
    let mut sync = synchronizer(400.0, 178.0);
    let chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);
    let start = Instant::now();

    sync.on_highlight(&HighlightEvent::at(1), start).unwrap();
    sync.tick(&chart, start + Duration::from_millis(50));

    let target = sync.target().unwrap();
    assert_eq!(target.descriptor.url, "/frames/f-2024-01-01-00-00-10.jpg");
    assert_eq!(target.offset, 200.0);

    // x = 400 would overflow the container; clamped to 400 - 178
    sync.on_highlight(&HighlightEvent::at(2), start + Duration::from_millis(100))
        .unwrap();
    sync.tick(&chart, start + Duration::from_millis(150));
    assert_eq!(sync.target().unwrap().offset, 222.0);

    assert_eq!(
        sync.view()
            .count(|op| matches!(op, ViewOp::RemoveHighlighted)),
        0
    );
}

#[test]
fn test_downplay_within_window_cancels_highlight() {
    let mut sync = synchronizer(400.0, 178.0);
    let chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);
    let start = Instant::now();

    sync.on_highlight(&HighlightEvent::at(1), start).unwrap();
    sync.on_downplay(start + Duration::from_millis(10));

    assert!(!sync.tick(&chart, start + Duration::from_millis(50)));
    sync.tick(&chart, start + Duration::from_millis(60));
    assert!(!sync.has_pending());
    assert!(sync.target().is_none());
    assert_eq!(
        sync.view()
            .count(|op| matches!(op, ViewOp::Upsert { .. })),
        0
    );
}

#[test]
fn test_repeated_show_keeps_one_target() {
    let mut sync = synchronizer(400.0, 178.0);
    let chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);

    assert!(sync.show_target(&ts(DATASET[1]), &chart));
    assert!(!sync.show_target(&ts(DATASET[1]), &chart));

    assert!(sync.view().strip.showing_target());
    assert_eq!(
        sync.view()
            .count(|op| matches!(op, ViewOp::Upsert { .. })),
        1
    );
}

#[test]
fn test_hover_suppresses_chart_echo() {
    let mut sync = synchronizer(400.0, 178.0);
    let mut chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);
    let start = Instant::now();

    sync.show_target(&ts(DATASET[0]), &chart);
    sync.on_thumbnail_enter(ts(DATASET[2]), &mut chart);
    assert_eq!(
        sync.hover_state(),
        &HoverState::Suppressed {
            timestamp: ts(DATASET[2])
        }
    );
    assert_eq!(chart.dispatched, vec![(400.0, 80.0)]);

    // The chart echoes the dispatched highlight
    sync.on_highlight(&HighlightEvent::at(2), start).unwrap();
    sync.tick(&chart, start + Duration::from_millis(50));
    assert_eq!(
        sync.target().unwrap().descriptor.url,
        "/frames/f-2024-01-01-00-00-00.jpg"
    );

    sync.on_thumbnail_leave(&ts(DATASET[2]));
    assert_eq!(sync.hover_state(), &HoverState::Idle);
}

#[test]
fn test_moving_between_thumbnails_suppresses_pending_echo() {
    let mut sync = synchronizer(400.0, 178.0);
    let mut chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);
    let start = Instant::now();

    sync.show_target(&ts(DATASET[0]), &chart);
    sync.on_thumbnail_enter(ts(DATASET[1]), &mut chart);
    sync.on_highlight(&HighlightEvent::at(1), start).unwrap();

    // Entering the next tile arrives before leaving the previous one
    sync.on_thumbnail_enter(ts(DATASET[2]), &mut chart);
    sync.on_highlight(&HighlightEvent::at(2), start + Duration::from_millis(5))
        .unwrap();
    sync.on_thumbnail_leave(&ts(DATASET[1]));
    assert_eq!(
        sync.hover_state(),
        &HoverState::Suppressed {
            timestamp: ts(DATASET[2])
        }
    );

    assert!(!sync.tick(&chart, start + Duration::from_millis(55)));
    assert!(!sync.has_pending());
    assert_eq!(
        sync.target().unwrap().descriptor.url,
        "/frames/f-2024-01-01-00-00-00.jpg"
    );

    sync.on_thumbnail_leave(&ts(DATASET[2]));
    assert!(!sync.is_suppressed());
}

#[test]
fn test_sub_millisecond_timestamp_at_viewport_edge() {
    let data = [
        "2024-01-01T00:00:00Z",
        "2024-01-01T00:00:10Z",
        "2024-01-01T00:00:20.000500Z",
    ];
    let config = ThumbnailConfig {
        width: 100.0,
        debounce_ms: 50,
        pointer_y: 80.0,
    };
    let mut sync = Synchronizer::new(RecordingView::new(400.0), &config);
    sync.load(data.iter().map(|s| ts(s)).collect()).unwrap();

    let mut chart = ChartState::new(400.0);
    let viewport = ViewportConfig {
        start_percent: 0.0,
        end_percent: 100.0,
    };
    chart
        .set_data(sync.index().timestamps().unwrap(), Vec::new(), &viewport)
        .unwrap();

    assert_eq!(sync.on_viewport_change(&chart).unwrap(), 3);
    assert_eq!(
        rendered(&sync).last().map(String::as_str),
        Some("/frames/f-2024-01-01-00-00-20.jpg")
    );
}

#[test]
fn test_viewport_change_moves_target() {
    let mut sync = synchronizer(400.0, 100.0);
    let mut chart = MockChart::spanning(DATASET[0], DATASET[2], 400.0);

    sync.show_target(&ts(DATASET[1]), &chart);
    assert_eq!(sync.target().unwrap().offset, 200.0);

    chart.set_viewport(DATASET[1], DATASET[2]);
    sync.on_viewport_change(&chart).unwrap();
    assert_eq!(sync.target().unwrap().offset, 0.0);
    assert_eq!(rendered(&sync).len(), 2);
}

#[tokio::test]
async fn test_dataset_file_through_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let payload = serde_json::json!({
        "timestamp": DATASET,
        "speed": [1.0, 2.0, 3.0],
    });
    std::fs::write(&path, payload.to_string()).unwrap();

    let timestamps = load_dataset(path.to_str().unwrap()).await.unwrap();
    assert_eq!(timestamps.len(), 3);

    let mut config = FrameSyncConfig::default();
    config.viewport.end_percent = 100.0;
    let mut app = FrameSync::new(config);
    let _ = app.update(Message::DatasetLoaded(Ok(timestamps)));

    let urls: Vec<_> = app
        .sync()
        .view()
        .thumbnails()
        .iter()
        .map(|d| d.url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            "/frames/f-2024-01-01-00-00-00.jpg",
            "/frames/f-2024-01-01-00-00-10.jpg",
            "/frames/f-2024-01-01-00-00-20.jpg",
        ]
    );
}
