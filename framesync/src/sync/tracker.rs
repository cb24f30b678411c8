//! Target thumbnail tracking the chart highlight.

use framesync_common::{ThumbnailDescriptor, Timestamp};

use super::{ChartAdapter, ThumbnailView};

/// The single highlighted thumbnail and its horizontal offset in the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetHighlight {
    pub descriptor: ThumbnailDescriptor,
    pub offset: f32,
}

/// Left offset for a thumbnail at chart coordinate `x`, kept inside the
/// container's right edge.
pub fn placement(x: f32, container_width: f32, thumbnail_width: f32) -> f32 {
    x.min(container_width - thumbnail_width)
}

/// Owns the target highlight state. At most one target exists at a time.
#[derive(Debug)]
pub struct TargetTracker {
    thumbnail_width: f32,
    current: Option<TargetHighlight>,
}

impl TargetTracker {
    pub fn new(thumbnail_width: f32) -> Self {
        Self {
            thumbnail_width,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&TargetHighlight> {
        self.current.as_ref()
    }

    /// Point the target at `timestamp`.
    ///
    /// An existing target is updated in place. Returns `false` when nothing
    /// changed.
    pub fn show<C, V>(&mut self, timestamp: &Timestamp, chart: &C, view: &mut V) -> bool
    where
        C: ChartAdapter + ?Sized,
        V: ThumbnailView + ?Sized,
    {
        let x = chart.time_to_pixel(timestamp);
        let next = TargetHighlight {
            descriptor: ThumbnailDescriptor::new(timestamp.clone()),
            offset: placement(x, view.container_width(), self.thumbnail_width),
        };

        if self.current.as_ref() == Some(&next) {
            tracing::trace!(timestamp = %timestamp, "Target unchanged");
            return false;
        }

        tracing::debug!(
            timestamp = %timestamp,
            url = %next.descriptor.url,
            offset = next.offset,
            "Showing target thumbnail"
        );
        view.upsert_highlighted(&next.descriptor, next.offset);
        self.current = Some(next);
        true
    }

    /// Remove the target. No-op when there is none.
    pub fn hide<V>(&mut self, view: &mut V) -> bool
    where
        V: ThumbnailView + ?Sized,
    {
        if self.current.take().is_none() {
            return false;
        }
        tracing::debug!("Removed target thumbnail");
        view.remove_highlighted();
        true
    }

    /// Recompute the offset of the current target after the chart moved.
    pub fn reposition<C, V>(&mut self, chart: &C, view: &mut V) -> bool
    where
        C: ChartAdapter + ?Sized,
        V: ThumbnailView + ?Sized,
    {
        let Some(timestamp) = self
            .current
            .as_ref()
            .map(|target| target.descriptor.timestamp.clone())
        else {
            return false;
        };
        self.show(&timestamp, chart, view)
    }
}
