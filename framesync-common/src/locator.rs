//! Mapping from timestamps to thumbnail resources.
//!
//! Thumbnails live at `/frames/f-{YYYY}-{MM}-{DD}-{HH}-{mm}-{ss}.jpg`. Every
//! component except the year is zero-padded to two digits. Components are taken
//! in the offset the timestamp was written with, so `...Z` timestamps map to
//! their UTC wall-clock time. Timestamps within the same second share a path.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};

use crate::timeline::Timestamp;

/// Resource prefix all thumbnail paths share.
pub const FRAMES_PREFIX: &str = "/frames/";

/// Canonical thumbnail resource path for a timestamp.
pub fn locate(timestamp: &Timestamp) -> String {
    let t = timestamp.instant();
    format!(
        "{}f-{}-{:02}-{:02}-{:02}-{:02}-{:02}.jpg",
        FRAMES_PREFIX,
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

/// Map a resource path produced by [`locate`] onto a local frames directory.
///
/// Paths outside the frames prefix are joined as-is (minus any leading `/`).
pub fn resolve(frames_dir: &Path, resource: &str) -> PathBuf {
    let relative = resource
        .strip_prefix(FRAMES_PREFIX)
        .unwrap_or_else(|| resource.trim_start_matches('/'));
    frames_dir.join(relative)
}

/// A thumbnail to display: the source timestamp and its resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailDescriptor {
    pub timestamp: Timestamp,
    pub url: String,
}

impl ThumbnailDescriptor {
    pub fn new(timestamp: Timestamp) -> Self {
        let url = locate(&timestamp);
        Self { timestamp, url }
    }
}
