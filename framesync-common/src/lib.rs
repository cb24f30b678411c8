//! FrameSync Common Library
//!
//! Shared types and utilities for the FrameSync chart/thumbnail viewer:
//!
//! - [`timeline`] - Timestamps, viewport ranges and the ordered timeline index
//! - [`locator`] - Timestamp to thumbnail resource mapping
//! - [`sampler`] - Downsampling of visible timestamps to the strip capacity
//! - [`dataset`] - Dataset decoding and loading (file or HTTP)
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod config;
pub mod dataset;
pub mod error;
pub mod locator;
pub mod sampler;
pub mod timeline;

// Re-export commonly used types at the crate root
pub use config::{
    FrameSyncConfig, LogFormat, LoggingConfig, ThumbnailConfig, ViewportConfig, load_config,
    parse_config,
};
pub use dataset::{Dataset, load_dataset, parse_dataset};
pub use error::{Error, Result};
pub use locator::{FRAMES_PREFIX, ThumbnailDescriptor, locate, resolve};
pub use sampler::{capacity, sample};
pub use timeline::{TimelineIndex, Timestamp, ViewportRange};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
