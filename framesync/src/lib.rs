//! FrameSync - time-series chart with a synchronized frame thumbnail strip.
//!
//! This library exposes the core components for testing.

pub mod app;
pub mod args;
pub mod demo;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod sync;
pub mod view;

// Re-export commonly used types
pub use app::FrameSync;
pub use message::Message;
pub use sync::{ChartAdapter, HighlightEvent, Synchronizer, ThumbnailView};
