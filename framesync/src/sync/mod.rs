//! Synchronization between the chart viewport, the thumbnail strip and the
//! target thumbnail.
//!
//! The [`Synchronizer`] owns every piece of shared state (timeline index,
//! target highlight, hover suppression, pending debounced action) and is
//! driven by the host's event loop through its `on_*` handlers. The chart and
//! the strip are reached only through the [`ChartAdapter`] and
//! [`ThumbnailView`] capabilities, so the whole flow runs headless in tests.

pub mod bridge;
pub mod debounce;
pub mod strip;
pub mod tracker;

use std::time::{Duration, Instant};

use framesync_common::{
    Result, ThumbnailConfig, ThumbnailDescriptor, TimelineIndex, Timestamp, ViewportRange, sample,
};

pub use bridge::{HighlightAction, HoverBridge, HoverState};
pub use debounce::Debouncer;
pub use strip::{StripState, render};
pub use tracker::{TargetHighlight, TargetTracker, placement};

/// What the synchronizer needs from the chart widget.
///
/// Chart events (viewport change, highlight, downplay, resize) are delivered
/// by the host calling the matching `Synchronizer::on_*` handler.
pub trait ChartAdapter {
    /// Visible time window, or `None` when the chart has no zoom state yet.
    fn viewport_range(&self) -> Option<ViewportRange>;

    /// Horizontal pixel coordinate of `timestamp` in chart space.
    fn time_to_pixel(&self, timestamp: &Timestamp) -> f32;

    /// Highlight whatever lies under `(x, y)`, drawing crosshair and tooltip.
    fn dispatch_highlight_at(&mut self, x: f32, y: f32);
}

/// What the synchronizer needs from the thumbnail strip surface.
pub trait ThumbnailView {
    fn container_width(&self) -> f32;

    /// Remove every rendered strip thumbnail (not the target).
    fn clear(&mut self);

    /// Add a thumbnail at the end of the strip.
    fn append(&mut self, descriptor: ThumbnailDescriptor);

    /// Show the empty-state indicator and hide the row, or the opposite.
    fn set_empty_state(&mut self, empty: bool);

    /// Create the target thumbnail, or update the existing one in place.
    fn upsert_highlighted(&mut self, descriptor: &ThumbnailDescriptor, offset: f32);

    fn remove_highlighted(&mut self);
}

/// One highlighted data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightItem {
    pub series_index: usize,
    pub data_index: usize,
}

/// A chart highlight event; may carry several series at the same data index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightEvent {
    pub batch: Vec<HighlightItem>,
}

impl HighlightEvent {
    /// Highlight of a single data index on the first series.
    pub fn at(data_index: usize) -> Self {
        Self {
            batch: vec![HighlightItem {
                series_index: 0,
                data_index,
            }],
        }
    }

    /// Data index of the first highlighted item.
    pub fn data_index(&self) -> Option<usize> {
        self.batch.first().map(|item| item.data_index)
    }
}

/// Keeps the strip and the target thumbnail consistent with the chart.
#[derive(Debug)]
pub struct Synchronizer<V> {
    index: TimelineIndex,
    view: V,
    tracker: TargetTracker,
    bridge: HoverBridge,
    thumbnail_width: f32,
}

impl<V: ThumbnailView> Synchronizer<V> {
    pub fn new(view: V, config: &ThumbnailConfig) -> Self {
        Self {
            index: TimelineIndex::new(),
            view,
            tracker: TargetTracker::new(config.width),
            bridge: HoverBridge::new(Duration::from_millis(config.debounce_ms), config.pointer_y),
            thumbnail_width: config.width,
        }
    }

    /// Store the dataset timestamps. Call once the dataset is available.
    ///
    /// A highlight still pending from a previous dataset is dropped.
    pub fn load(&mut self, timestamps: Vec<Timestamp>) -> Result<()> {
        self.index.load(timestamps)?;
        if let Some(dropped) = self.bridge.cancel_pending() {
            tracing::debug!(?dropped, "Dropped pending highlight on reload");
        }
        Ok(())
    }

    pub fn index(&self) -> &TimelineIndex {
        &self.index
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn target(&self) -> Option<&TargetHighlight> {
        self.tracker.current()
    }

    pub fn hover_state(&self) -> &HoverState {
        self.bridge.state()
    }

    pub fn is_suppressed(&self) -> bool {
        self.bridge.is_suppressed()
    }

    /// Whether a debounced highlight/downplay is waiting to be applied.
    pub fn has_pending(&self) -> bool {
        self.bridge.has_pending()
    }

    /// Re-sample and re-render the strip for the chart's current viewport.
    ///
    /// Returns the number of thumbnails rendered. A chart without a viewport
    /// leaves the strip untouched.
    pub fn on_viewport_change<C>(&mut self, chart: &C) -> Result<usize>
    where
        C: ChartAdapter + ?Sized,
    {
        let Some(range) = chart.viewport_range() else {
            tracing::debug!("Chart has no viewport, strip left unchanged");
            return Ok(0);
        };

        let visible = self.index.range(&range)?;
        let picked = sample(visible, self.view.container_width(), self.thumbnail_width);
        tracing::debug!(
            visible = visible.len(),
            picked = picked.len(),
            start = %range.start(),
            end = %range.end(),
            "Viewport changed"
        );

        let descriptors: Vec<_> = picked.into_iter().map(ThumbnailDescriptor::new).collect();
        let count = descriptors.len();
        render(&mut self.view, descriptors);
        self.tracker.reposition(chart, &mut self.view);
        Ok(count)
    }

    /// Relayout after the host resized the chart and the strip container.
    pub fn on_resize<C>(&mut self, chart: &C) -> Result<usize>
    where
        C: ChartAdapter + ?Sized,
    {
        tracing::debug!(width = self.view.container_width(), "Resized");
        self.on_viewport_change(chart)
    }

    /// Chart highlight event; applied after the debounce window.
    pub fn on_highlight(&mut self, event: &HighlightEvent, now: Instant) -> Result<()> {
        let timestamp = match event.data_index() {
            Some(data_index) => self.index.get(data_index)?.cloned(),
            None => None,
        };
        self.bridge.chart_highlight(timestamp, now);
        Ok(())
    }

    /// Chart downplay event; applied after the debounce window.
    pub fn on_downplay(&mut self, now: Instant) {
        self.bridge.chart_downplay(now);
    }

    /// Pointer entered the strip thumbnail for `timestamp`.
    pub fn on_thumbnail_enter<C>(&mut self, timestamp: Timestamp, chart: &mut C)
    where
        C: ChartAdapter + ?Sized,
    {
        self.bridge.pointer_enter(timestamp, chart);
    }

    /// Pointer left the strip thumbnail for `timestamp`.
    pub fn on_thumbnail_leave(&mut self, timestamp: &Timestamp) {
        self.bridge.pointer_leave(timestamp);
    }

    /// Apply the pending debounced action if its window has closed.
    ///
    /// Returns `true` when the target changed.
    pub fn tick<C>(&mut self, chart: &C, now: Instant) -> bool
    where
        C: ChartAdapter + ?Sized,
    {
        match self.bridge.poll(now) {
            Some(HighlightAction::Show(timestamp)) => self.show_target(&timestamp, chart),
            Some(HighlightAction::Hide) => self.hide_target(),
            None => false,
        }
    }

    /// Point the target at `timestamp`, unless a thumbnail is being hovered.
    pub fn show_target<C>(&mut self, timestamp: &Timestamp, chart: &C) -> bool
    where
        C: ChartAdapter + ?Sized,
    {
        if self.bridge.is_suppressed() {
            tracing::trace!(timestamp = %timestamp, "Target update suppressed while hovering strip");
            return false;
        }
        self.tracker.show(timestamp, chart, &mut self.view)
    }

    pub fn hide_target(&mut self) -> bool {
        self.tracker.hide(&mut self.view)
    }
}
