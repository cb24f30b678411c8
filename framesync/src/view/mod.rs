//! View components for the FrameSync application.

pub mod chart;
pub mod formatting;
pub mod theme;
pub mod thumbnails;
