//! Headless chart and view doubles for testing.
//!
//! Provides a linear [`MockChart`] and a [`RecordingView`] that logs every
//! view operation, so the synchronizer can be exercised without a window.

use framesync_common::{ThumbnailDescriptor, Timestamp, ViewportRange};

use crate::sync::{ChartAdapter, StripState, ThumbnailView};

/// Chart that maps its viewport linearly onto `0..width` pixels.
#[derive(Debug, Clone)]
pub struct MockChart {
    pub viewport: Option<ViewportRange>,
    pub width: f32,
    /// Every `(x, y)` passed to `dispatch_highlight_at`.
    pub dispatched: Vec<(f32, f32)>,
}

impl MockChart {
    pub fn new(viewport: ViewportRange, width: f32) -> Self {
        Self {
            viewport: Some(viewport),
            width,
            dispatched: Vec::new(),
        }
    }

    /// Chart whose viewport spans two RFC 3339 timestamps.
    ///
    /// Panics on invalid input; test use only.
    pub fn spanning(start: &str, end: &str, width: f32) -> Self {
        Self::new(range(start, end), width)
    }

    pub fn set_viewport(&mut self, start: &str, end: &str) {
        self.viewport = Some(range(start, end));
    }
}

fn range(start: &str, end: &str) -> ViewportRange {
    let start = Timestamp::parse(start).expect("valid start timestamp");
    let end = Timestamp::parse(end).expect("valid end timestamp");
    ViewportRange::new(start.utc(), end.utc()).expect("start <= end")
}

impl ChartAdapter for MockChart {
    fn viewport_range(&self) -> Option<ViewportRange> {
        self.viewport
    }

    fn time_to_pixel(&self, timestamp: &Timestamp) -> f32 {
        let Some(viewport) = self.viewport else {
            return 0.0;
        };
        let span = viewport.span_millis();
        if span == 0 {
            return 0.0;
        }
        let offset = timestamp.millis() - viewport.start_millis();
        (offset as f64 / span as f64 * self.width as f64) as f32
    }

    fn dispatch_highlight_at(&mut self, x: f32, y: f32) {
        self.dispatched.push((x, y));
    }
}

/// A recorded view operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOp {
    Clear,
    Append(String),
    SetEmptyState(bool),
    Upsert { url: String, offset: f32 },
    RemoveHighlighted,
}

/// [`StripState`] that also logs every operation applied to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub strip: StripState,
    pub ops: Vec<ViewOp>,
}

impl RecordingView {
    pub fn new(width: f32) -> Self {
        Self {
            strip: StripState::new(width),
            ops: Vec::new(),
        }
    }

    /// Number of recorded operations matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&ViewOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl ThumbnailView for RecordingView {
    fn container_width(&self) -> f32 {
        self.strip.container_width()
    }

    fn clear(&mut self) {
        self.ops.push(ViewOp::Clear);
        self.strip.clear();
    }

    fn append(&mut self, descriptor: ThumbnailDescriptor) {
        self.ops.push(ViewOp::Append(descriptor.url.clone()));
        self.strip.append(descriptor);
    }

    fn set_empty_state(&mut self, empty: bool) {
        self.ops.push(ViewOp::SetEmptyState(empty));
        self.strip.set_empty_state(empty);
    }

    fn upsert_highlighted(&mut self, descriptor: &ThumbnailDescriptor, offset: f32) {
        self.ops.push(ViewOp::Upsert {
            url: descriptor.url.clone(),
            offset,
        });
        self.strip.upsert_highlighted(descriptor, offset);
    }

    fn remove_highlighted(&mut self) {
        self.ops.push(ViewOp::RemoveHighlighted);
        self.strip.remove_highlighted();
    }
}
