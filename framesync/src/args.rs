//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use framesync_common::FrameSyncConfig;

/// Default configuration file, used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "framesync.json5";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "framesync",
    version,
    about = "Time-series chart with a synchronized frame thumbnail strip"
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Dataset file path or http(s) URL, overriding the configuration.
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Directory serving `/frames/`, overriding the configuration.
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut FrameSyncConfig) {
        if let Some(dataset) = &self.dataset {
            config.dataset = dataset.clone();
        }
        if let Some(frames_dir) = &self.frames_dir {
            config.frames_dir = frames_dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
