//! Timeline model: parsed timestamps, viewport ranges and the ordered index.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::error::{Error, Result};

/// Naive layouts accepted when a timestamp carries no offset (read as UTC).
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A dataset timestamp: the original string plus its parsed instant.
///
/// The original string is kept verbatim because it is what the chart and the
/// thumbnail strip display, and what hover lookups are keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parse an ISO-8601-like timestamp.
    ///
    /// Accepts RFC 3339 (`2024-01-01T00:00:10Z`, `2024-01-01T02:00:10+02:00`) and
    /// offset-less `YYYY-MM-DDTHH:MM:SS[.fff]`, which is interpreted as UTC.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self { raw, instant });
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                let instant = naive.and_utc().fixed_offset();
                return Ok(Self { raw, instant });
            }
        }

        Err(Error::InvalidTimestamp {
            reason: "expected an ISO-8601 date-time".to_string(),
            value: raw,
        })
    }

    /// Build a timestamp from a UTC instant, rendering it as RFC 3339.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self {
            raw: instant.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            instant: instant.fixed_offset(),
        }
    }

    /// The original string, as found in the dataset.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The instant in the offset it was written with.
    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    /// The instant in UTC.
    pub fn utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }

    /// Unix epoch milliseconds.
    pub fn millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The visible time window of the chart. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ViewportRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange(format!(
                "viewport start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a range from Unix epoch milliseconds.
    pub fn from_millis(start_ms: i64, end_ms: i64) -> Result<Self> {
        let start = Utc.timestamp_millis_opt(start_ms).single().ok_or_else(|| {
            Error::InvalidRange(format!("start {} ms is out of range", start_ms))
        })?;
        let end = Utc
            .timestamp_millis_opt(end_ms)
            .single()
            .ok_or_else(|| Error::InvalidRange(format!("end {} ms is out of range", end_ms)))?;
        Self::new(start, end)
    }

    /// Range covering every instant inside the millisecond slots
    /// `start_ms..=end_ms`, so sub-millisecond timestamps in the last slot
    /// stay inside.
    pub fn covering_millis(start_ms: i64, end_ms: i64) -> Result<Self> {
        let range = Self::from_millis(start_ms, end_ms)?;
        let end = range
            .end
            .checked_add_signed(TimeDelta::nanoseconds(999_999))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(range.start, end)
    }

    /// A range covering every representable instant.
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Span in milliseconds.
    pub fn span_millis(&self) -> i64 {
        self.end_millis() - self.start_millis()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, timestamp: &Timestamp) -> bool {
        let instant = timestamp.utc();
        self.start <= instant && instant <= self.end
    }
}

/// Ordered index of every timestamp in the loaded dataset.
///
/// Empty until [`TimelineIndex::load`] is called; every query before that
/// fails with [`Error::TimelineNotLoaded`].
#[derive(Debug, Default)]
pub struct TimelineIndex {
    timestamps: Option<Vec<Timestamp>>,
}

impl TimelineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the dataset timestamps.
    ///
    /// The sequence must be chronologically non-decreasing; duplicates are kept.
    pub fn load(&mut self, timestamps: Vec<Timestamp>) -> Result<()> {
        if let Some(pair) = timestamps
            .windows(2)
            .find(|pair| pair[1].instant < pair[0].instant)
        {
            return Err(Error::InvalidTimestamp {
                value: pair[1].raw.clone(),
                reason: format!("earlier than the preceding timestamp {}", pair[0].raw),
            });
        }

        if self.timestamps.is_some() {
            tracing::warn!("Timeline reloaded, replacing previous dataset");
        }
        tracing::info!(count = timestamps.len(), "Loaded timeline");
        self.timestamps = Some(timestamps);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.timestamps.is_some()
    }

    /// All stored timestamps.
    pub fn timestamps(&self) -> Result<&[Timestamp]> {
        self.timestamps
            .as_deref()
            .ok_or(Error::TimelineNotLoaded)
    }

    pub fn len(&self) -> usize {
        self.timestamps.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every timestamp `t` with `start <= t <= end`, in dataset order.
    pub fn range(&self, range: &ViewportRange) -> Result<&[Timestamp]> {
        let positions = self.positions(range)?;
        Ok(&self.timestamps()?[positions])
    }

    /// Data indices of the timestamps inside `range`.
    pub fn positions(&self, range: &ViewportRange) -> Result<std::ops::Range<usize>> {
        let all = self.timestamps()?;
        let lo = all.partition_point(|t| t.utc() < range.start());
        let hi = all.partition_point(|t| t.utc() <= range.end());
        Ok(lo..hi.max(lo))
    }

    /// The timestamp at a chart data index.
    pub fn get(&self, data_index: usize) -> Result<Option<&Timestamp>> {
        Ok(self.timestamps()?.get(data_index))
    }

    /// Index of the stored timestamp closest to `instant`; ties go to the earlier one.
    pub fn nearest_index(&self, instant: DateTime<Utc>) -> Result<Option<usize>> {
        self.nearest_index_within(&ViewportRange::unbounded(), instant)
    }

    /// Like [`nearest_index`](Self::nearest_index), considering only the
    /// timestamps inside `range`.
    pub fn nearest_index_within(
        &self,
        range: &ViewportRange,
        instant: DateTime<Utc>,
    ) -> Result<Option<usize>> {
        let positions = self.positions(range)?;
        let window = &self.timestamps()?[positions.clone()];
        if window.is_empty() {
            return Ok(None);
        }

        let after = window.partition_point(|t| t.utc() < instant);
        let local = if after == 0 {
            0
        } else if after == window.len() {
            window.len() - 1
        } else {
            let before_gap = instant - window[after - 1].utc();
            let after_gap = window[after].utc() - instant;
            if after_gap < before_gap { after } else { after - 1 }
        };
        Ok(Some(positions.start + local))
    }

    /// The stored timestamp closest to `instant`.
    pub fn nearest(&self, instant: DateTime<Utc>) -> Result<Option<&Timestamp>> {
        let index = self.nearest_index(instant)?;
        Ok(index.and_then(|i| self.timestamps.as_ref()?.get(i)))
    }

    /// Range from the first to the last stored timestamp.
    pub fn bounds(&self) -> Result<Option<ViewportRange>> {
        let all = self.timestamps()?;
        match (all.first(), all.last()) {
            (Some(first), Some(last)) => Ok(Some(ViewportRange::new(first.utc(), last.utc())?)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn loaded(values: &[&str]) -> TimelineIndex {
        let mut index = TimelineIndex::new();
        index.load(values.iter().map(|s| ts(s)).collect()).unwrap();
        index
    }

    #[test]
    fn test_parse_formats() {
        let utc = ts("2024-01-01T00:00:10Z");
        assert_eq!(utc.as_str(), "2024-01-01T00:00:10Z");
        assert_eq!(utc.millis(), 1_704_067_210_000);

        let offset = ts("2024-01-01T02:00:10+02:00");
        assert_eq!(offset.millis(), utc.millis());

        let naive = ts("2024-01-01T00:00:10");
        assert_eq!(naive.millis(), utc.millis());

        let spaced = ts("2024-01-01 00:00:10.250");
        assert_eq!(spaced.millis(), utc.millis() + 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Timestamp::parse("yesterday").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp { ref value, .. } if value == "yesterday"));
    }

    #[test]
    fn test_viewport_range_invariant() {
        assert!(ViewportRange::from_millis(10, 5).is_err());
        let range = ViewportRange::from_millis(5, 5).unwrap();
        assert_eq!(range.span_millis(), 0);
    }

    #[test]
    fn test_query_before_load_fails() {
        let index = TimelineIndex::new();
        assert!(!index.is_loaded());
        assert!(matches!(
            index.range(&ViewportRange::unbounded()),
            Err(Error::TimelineNotLoaded)
        ));
        assert!(matches!(index.get(0), Err(Error::TimelineNotLoaded)));
    }

    #[test]
    fn test_load_rejects_unordered() {
        let mut index = TimelineIndex::new();
        let result = index.load(vec![ts("2024-01-01T00:00:10Z"), ts("2024-01-01T00:00:00Z")]);
        assert!(result.is_err());
        assert!(!index.is_loaded());
    }

    #[test]
    fn test_range_inclusive_and_ordered() {
        let index = loaded(&[
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:10Z",
            "2024-01-01T00:00:10Z",
            "2024-01-01T00:00:20Z",
            "2024-01-01T00:00:30Z",
        ]);

        let range = ViewportRange::new(
            ts("2024-01-01T00:00:10Z").utc(),
            ts("2024-01-01T00:00:20Z").utc(),
        )
        .unwrap();
        let hits: Vec<_> = index.range(&range).unwrap().iter().map(|t| t.as_str()).collect();
        assert_eq!(
            hits,
            vec![
                "2024-01-01T00:00:10Z",
                "2024-01-01T00:00:10Z",
                "2024-01-01T00:00:20Z"
            ]
        );

        let outside = ViewportRange::from_millis(0, 1000).unwrap();
        assert!(index.range(&outside).unwrap().is_empty());
    }

    #[test]
    fn test_nearest() {
        let index = loaded(&[
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:10Z",
            "2024-01-01T00:00:20Z",
        ]);

        let closest = |s: &str| index.nearest(ts(s).utc()).unwrap().unwrap().as_str().to_string();
        assert_eq!(closest("2023-12-31T23:59:00Z"), "2024-01-01T00:00:00Z");
        assert_eq!(closest("2024-01-01T00:00:04Z"), "2024-01-01T00:00:00Z");
        assert_eq!(closest("2024-01-01T00:00:05Z"), "2024-01-01T00:00:00Z");
        assert_eq!(closest("2024-01-01T00:00:06Z"), "2024-01-01T00:00:10Z");
        assert_eq!(closest("2024-01-01T01:00:00Z"), "2024-01-01T00:00:20Z");

        let empty = loaded(&[]);
        assert!(empty.nearest(Utc::now()).unwrap().is_none());
    }

    #[test]
    fn test_nearest_within_window() {
        let index = loaded(&[
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:10Z",
            "2024-01-01T00:00:20Z",
            "2024-01-01T00:00:30Z",
        ]);
        let window = ViewportRange::new(
            ts("2024-01-01T00:00:10Z").utc(),
            ts("2024-01-01T00:00:20Z").utc(),
        )
        .unwrap();

        let at = |s: &str| index.nearest_index_within(&window, ts(s).utc()).unwrap();
        assert_eq!(at("2024-01-01T00:00:01Z"), Some(1));
        assert_eq!(at("2024-01-01T00:00:15Z"), Some(1));
        assert_eq!(at("2024-01-01T00:00:16Z"), Some(2));
        assert_eq!(at("2024-01-01T00:00:29Z"), Some(2));

        let outside = ViewportRange::from_millis(0, 1000).unwrap();
        assert_eq!(index.nearest_index_within(&outside, Utc::now()).unwrap(), None);
    }

    #[test]
    fn test_covering_millis_keeps_sub_millisecond_end() {
        let index = loaded(&[
            "2024-01-01T00:00:00Z",
            "2024-01-01T00:00:10Z",
            "2024-01-01T00:00:20.000500Z",
        ]);
        let last = index.get(2).unwrap().unwrap().clone();
        let first_ms = index.get(0).unwrap().unwrap().millis();

        let truncated = ViewportRange::from_millis(first_ms, last.millis()).unwrap();
        assert!(!truncated.contains(&last));
        assert_eq!(index.range(&truncated).unwrap().len(), 2);

        let covering = ViewportRange::covering_millis(first_ms, last.millis()).unwrap();
        assert!(covering.contains(&last));
        assert_eq!(index.range(&covering).unwrap().len(), 3);
        assert_eq!(covering.end_millis(), last.millis());
        assert!(ViewportRange::covering_millis(10, 5).is_err());
    }

    #[test]
    fn test_bounds_and_get() {
        let index = loaded(&["2024-01-01T00:00:00Z", "2024-01-01T00:00:20Z"]);
        let bounds = index.bounds().unwrap().unwrap();
        assert_eq!(bounds.span_millis(), 20_000);
        assert_eq!(index.get(1).unwrap().unwrap().as_str(), "2024-01-01T00:00:20Z");
        assert!(index.get(2).unwrap().is_none());
    }
}
