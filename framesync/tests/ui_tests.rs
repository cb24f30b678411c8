//! UI tests using iced_test Simulator.
//!
//! These tests verify the UI behavior without a window or frame images on disk.

use std::path::Path;

use iced_test::simulator;

use framesync::app::FrameSync;
use framesync::message::Message;
use framesync::sync::{StripState, ThumbnailView, render};
use framesync::view::chart::{ChartState, chart_view};
use framesync::view::thumbnails::{EMPTY_TEXT, thumbnails_view};
use framesync_common::{FrameSyncConfig, ThumbnailDescriptor, Timestamp};

fn descriptors(values: &[&str]) -> Vec<ThumbnailDescriptor> {
    values
        .iter()
        .map(|s| ThumbnailDescriptor::new(Timestamp::parse(*s).unwrap()))
        .collect()
}

/// Test that an empty strip shows the empty-state text.
#[test]
fn test_strip_empty_state() {
    let mut strip = StripState::new(800.0);
    render(&mut strip, Vec::new());

    let mut ui = simulator(thumbnails_view(&strip, Path::new("frames"), 178.0));
    assert!(ui.find(EMPTY_TEXT).is_ok());
}

/// Test that rendered thumbnails are captioned with their timestamps.
#[test]
fn test_strip_with_thumbnails() {
    let mut strip = StripState::new(800.0);
    render(
        &mut strip,
        descriptors(&["2024-01-01T00:00:00Z", "2024-01-01T00:00:10Z"]),
    );

    let mut ui = simulator(thumbnails_view(&strip, Path::new("frames"), 178.0));
    assert!(ui.find("2024-01-01T00:00:00Z").is_ok());
    assert!(ui.find("2024-01-01T00:00:10Z").is_ok());
    assert!(ui.find(EMPTY_TEXT).is_err());
}

/// Test that the target thumbnail is drawn over the strip.
#[test]
fn test_strip_shows_target() {
    let mut strip = StripState::new(800.0);
    render(&mut strip, descriptors(&["2024-01-01T00:00:00Z"]));
    let target = descriptors(&["2024-01-01T00:00:42Z"]);
    strip.upsert_highlighted(&target[0], 120.0);

    let mut ui = simulator(thumbnails_view(&strip, Path::new("frames"), 178.0));
    assert!(ui.find("2024-01-01T00:00:42Z").is_ok());
}

/// Test that the chart canvas renders without data.
#[test]
fn test_chart_without_data() {
    let chart = ChartState::new(800.0);
    let _ui = simulator(chart_view(&chart));
}

/// Test that the application shows its loading status.
#[test]
fn test_app_loading() {
    let app = FrameSync::new(FrameSyncConfig::default());
    let mut ui = simulator(app.view());

    assert!(ui.find("FrameSync").is_ok());
    assert!(ui.find("Loading dataset from data.json").is_ok());
}

/// Test that the application shows the frame count once loaded.
#[test]
fn test_app_loaded() {
    let mut app = FrameSync::new(FrameSyncConfig::default());
    let timestamps = ["2024-01-01T00:00:00Z", "2024-01-01T00:00:10Z"]
        .iter()
        .map(|s| Timestamp::parse(*s).unwrap())
        .collect();
    let _ = app.update(Message::DatasetLoaded(Ok(timestamps)));

    let mut ui = simulator(app.view());
    assert!(ui.find("2 frames").is_ok());
    assert!(ui.find("2024-01-01T00:00:00Z").is_ok());
}

/// Test that a failed load is reported.
#[test]
fn test_app_load_failure() {
    let mut app = FrameSync::new(FrameSyncConfig::default());
    let _ = app.update(Message::DatasetLoaded(Err("connection refused".to_string())));

    let mut ui = simulator(app.view());
    assert!(ui.find("Failed to load dataset: connection refused").is_ok());
}
