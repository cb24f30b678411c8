//! Demo series generation.
//!
//! The dataset only carries timestamps, so the chart plots synthetic series:
//! bounded random walks, one value per timestamp.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use framesync_common::{Error, Result, Timestamp};

use crate::view::chart::Series;

/// Parameters of one generated series.
#[derive(Debug, Clone, Copy)]
pub struct SeriesParams {
    pub name: &'static str,
    pub unit: &'static str,
    /// Axis range the series is drawn against.
    pub axis: (f64, f64),
    /// Bounds the generated values stay within.
    pub lower: f64,
    pub upper: f64,
    /// Largest step between consecutive values.
    pub max_delta: f64,
}

/// The series shown by default.
pub const DEFAULT_SERIES: [SeriesParams; 6] = [
    SeriesParams {
        name: "Speed",
        unit: "km/h",
        axis: (0.0, 180.0),
        lower: 0.0,
        upper: 100.0,
        max_delta: 5.0,
    },
    SeriesParams {
        name: "Altitude",
        unit: "m",
        axis: (0.0, 50.0),
        lower: 10.0,
        upper: 20.0,
        max_delta: 1.0,
    },
    SeriesParams {
        name: "Acc X",
        unit: "g",
        axis: (-3.0, 3.0),
        lower: -2.0,
        upper: 2.0,
        max_delta: 0.1,
    },
    SeriesParams {
        name: "Acc Y",
        unit: "g",
        axis: (-3.0, 3.0),
        lower: -2.0,
        upper: 2.0,
        max_delta: 0.1,
    },
    SeriesParams {
        name: "Temperature",
        unit: "℃",
        axis: (0.0, 50.0),
        lower: 25.0,
        upper: 35.0,
        max_delta: 1.0,
    },
    SeriesParams {
        name: "Humidity",
        unit: "%",
        axis: (0.0, 100.0),
        lower: 30.0,
        upper: 50.0,
        max_delta: 1.0,
    },
];

/// Generate `count` values as a random walk within `[lower, upper]`.
///
/// The walk starts uniformly inside the bounds and moves by at most
/// `max_delta` per step. Values are rounded to 6 decimal places.
pub fn generate_records<R: Rng>(
    rng: &mut R,
    count: usize,
    lower: f64,
    upper: f64,
    max_delta: f64,
) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(Error::InvalidRange("no points to generate".to_string()));
    }
    if !(lower <= upper) {
        return Err(Error::InvalidRange(format!(
            "lower bound {} exceeds upper bound {}",
            lower, upper
        )));
    }
    if !(max_delta >= 0.0) {
        return Err(Error::InvalidRange(format!(
            "max delta must be non-negative, got {}",
            max_delta
        )));
    }

    let mut values = Vec::with_capacity(count);
    let mut previous = rng.random::<f64>() * (upper - lower) + lower;

    for _ in 0..count {
        let step = rng.random::<f64>() * (max_delta * 2.0) - max_delta;
        let next = (previous + step).clamp(lower, upper);
        let next = (next * 1_000_000.0).round() / 1_000_000.0;
        values.push(next);
        previous = next;
    }

    Ok(values)
}

/// Generate the default series over `timestamps`.
///
/// An empty timeline yields no series.
pub fn demo_series(timestamps: &[Timestamp]) -> Result<Vec<Series>> {
    if timestamps.is_empty() {
        return Ok(Vec::new());
    }

    let mut rng = SmallRng::from_os_rng();
    DEFAULT_SERIES
        .iter()
        .map(|params| {
            let values = generate_records(
                &mut rng,
                timestamps.len(),
                params.lower,
                params.upper,
                params.max_delta,
            )?;
            Ok(Series {
                name: params.name.to_string(),
                unit: params.unit.to_string(),
                axis: params.axis,
                values,
            })
        })
        .collect()
}
