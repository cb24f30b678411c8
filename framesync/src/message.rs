use iced::Size;

use framesync_common::Timestamp;

use crate::sync::HighlightEvent;

/// Messages for the FrameSync application.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dataset fetched and parsed, or the error that stopped it.
    DatasetLoaded(Result<Vec<Timestamp>, String>),

    /// Wheel zoom: scale the viewport span by `factor` around chart x `anchor`.
    ChartZoom { factor: f64, anchor: f32 },

    /// Drag pan by a horizontal pixel delta.
    ChartPan(f32),

    /// Pointer highlighted a data index on the chart.
    ChartHighlight(HighlightEvent),

    /// Chart highlight ended.
    ChartDownplay,

    /// Pointer entered a strip thumbnail.
    ThumbnailEntered(Timestamp),

    /// Pointer left the strip thumbnail for this timestamp.
    ThumbnailLeft(Timestamp),

    /// Main window resized.
    WindowResized(Size),

    /// Tick while a debounced highlight is pending.
    Tick,
}
