//! Hover bridge between the chart and the thumbnail strip.
//!
//! Chart to strip: highlight/downplay events are debounced into a single
//! pending [`HighlightAction`]. Strip to chart: hovering a thumbnail moves
//! the chart crosshair to that timestamp and suppresses target updates until
//! the pointer leaves, so the chart's own highlight echo cannot move the
//! target away from the thumbnail being hovered.

use std::time::{Duration, Instant};

use framesync_common::Timestamp;

use super::ChartAdapter;
use super::debounce::Debouncer;

/// What to do with the target thumbnail once the debounce window closes.
#[derive(Debug, Clone, PartialEq)]
pub enum HighlightAction {
    Show(Timestamp),
    Hide,
}

/// Hover state of the thumbnail strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    /// The pointer is over the thumbnail for `timestamp`.
    Suppressed { timestamp: Timestamp },
}

#[derive(Debug)]
pub struct HoverBridge {
    state: HoverState,
    debounce: Debouncer<HighlightAction>,
    pointer_y: f32,
}

impl HoverBridge {
    pub fn new(debounce: Duration, pointer_y: f32) -> Self {
        Self {
            state: HoverState::Idle,
            debounce: Debouncer::new(debounce),
            pointer_y,
        }
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// True while the pointer is over a thumbnail.
    pub fn is_suppressed(&self) -> bool {
        matches!(self.state, HoverState::Suppressed { .. })
    }

    /// Pointer entered the thumbnail for `timestamp`.
    ///
    /// Suppression is set before the chart is asked to highlight, so a
    /// synchronous echo from the chart is already gated.
    pub fn pointer_enter<C>(&mut self, timestamp: Timestamp, chart: &mut C)
    where
        C: ChartAdapter + ?Sized,
    {
        let x = chart.time_to_pixel(&timestamp);
        tracing::debug!(timestamp = %timestamp, x, "Thumbnail hovered, driving chart crosshair");
        self.state = HoverState::Suppressed { timestamp };
        chart.dispatch_highlight_at(x, self.pointer_y);
    }

    /// Pointer left the thumbnail for `timestamp`.
    ///
    /// Only ends suppression when it belongs to that thumbnail: moving
    /// between tiles reports the new enter before the old leave.
    pub fn pointer_leave(&mut self, timestamp: &Timestamp) {
        match &self.state {
            HoverState::Suppressed { timestamp: hovered } if hovered == timestamp => {
                tracing::debug!(timestamp = %timestamp, "Thumbnail hover ended");
                self.state = HoverState::Idle;
            }
            HoverState::Suppressed { timestamp: hovered } => {
                tracing::trace!(left = %timestamp, hovered = %hovered, "Ignoring stale thumbnail leave");
            }
            HoverState::Idle => {}
        }
    }

    /// Drop the pending debounced action, if any.
    pub fn cancel_pending(&mut self) -> Option<HighlightAction> {
        self.debounce.cancel()
    }

    /// Chart highlighted a point; `None` means the event carried no point.
    pub fn chart_highlight(&mut self, timestamp: Option<Timestamp>, now: Instant) {
        let Some(timestamp) = timestamp else {
            tracing::trace!("Ignoring empty highlight");
            return;
        };
        self.schedule(HighlightAction::Show(timestamp), now);
    }

    /// Chart highlight ended.
    pub fn chart_downplay(&mut self, now: Instant) {
        self.schedule(HighlightAction::Hide, now);
    }

    /// The debounced action, once its window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<HighlightAction> {
        self.debounce.take_due(now)
    }

    pub fn has_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    fn schedule(&mut self, action: HighlightAction, now: Instant) {
        if let Some(replaced) = self.debounce.schedule(action, now) {
            tracing::trace!(?replaced, "Coalesced highlight");
        }
    }
}
