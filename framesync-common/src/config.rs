use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Thumbnail strip settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Width of a single thumbnail in pixels (default: 178).
    #[serde(default = "default_thumbnail_width")]
    pub width: f32,

    /// Window in which chart highlight/downplay bursts are coalesced (default: 50).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Vertical pixel position used when hovering a thumbnail drives the chart crosshair.
    #[serde(default = "default_pointer_y")]
    pub pointer_y: f32,
}

fn default_thumbnail_width() -> f32 {
    178.0
}

fn default_debounce_ms() -> u64 {
    50
}

fn default_pointer_y() -> f32 {
    80.0
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: default_thumbnail_width(),
            debounce_ms: default_debounce_ms(),
            pointer_y: default_pointer_y(),
        }
    }
}

/// Initial chart zoom, as percentages of the dataset span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub start_percent: f64,

    #[serde(default = "default_end_percent")]
    pub end_percent: f64,
}

fn default_end_percent() -> f64 {
    20.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            start_percent: 0.0,
            end_percent: default_end_percent(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSyncConfig {
    /// Dataset location: a file path or an http(s) URL.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Local directory that backs the `/frames/` resource path.
    #[serde(default = "default_frames_dir")]
    pub frames_dir: PathBuf,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_dataset() -> String {
    "data.json".to_string()
}

fn default_frames_dir() -> PathBuf {
    PathBuf::from("frames")
}

impl Default for FrameSyncConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            frames_dir: default_frames_dir(),
            thumbnails: ThumbnailConfig::default(),
            viewport: ViewportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FrameSyncConfig {
    /// Validate value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !(self.thumbnails.width > 0.0) {
            return Err(Error::Config(format!(
                "thumbnails.width must be positive, got {}",
                self.thumbnails.width
            )));
        }

        let ViewportConfig {
            start_percent,
            end_percent,
        } = self.viewport;
        if !(0.0..=100.0).contains(&start_percent)
            || !(0.0..=100.0).contains(&end_percent)
            || start_percent > end_percent
        {
            return Err(Error::Config(format!(
                "viewport must satisfy 0 <= start_percent <= end_percent <= 100, got {}..{}",
                start_percent, end_percent
            )));
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json5 = r#"
        {
            dataset: "https://example.org/data.json",
            frames_dir: "/srv/frames",
            thumbnails: {
                width: 120,
                debounce_ms: 80,
            },
            viewport: { start_percent: 10, end_percent: 30 },
            logging: {
                level: "debug",
            },
        }
        "#;

        let config: FrameSyncConfig = parse_config(json5).unwrap();

        assert_eq!(config.dataset, "https://example.org/data.json");
        assert_eq!(config.frames_dir, PathBuf::from("/srv/frames"));
        assert_eq!(config.thumbnails.width, 120.0);
        assert_eq!(config.thumbnails.debounce_ms, 80);
        assert_eq!(config.thumbnails.pointer_y, 80.0);
        assert_eq!(config.viewport.start_percent, 10.0);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config: FrameSyncConfig = parse_config("{}").unwrap();

        assert_eq!(config.dataset, "data.json");
        assert_eq!(config.thumbnails.width, 178.0);
        assert_eq!(config.thumbnails.debounce_ms, 50);
        assert_eq!(config.viewport.start_percent, 0.0);
        assert_eq!(config.viewport.end_percent, 20.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"{ logging: { level: "debug", format: "json" } }"#;
        let config: FrameSyncConfig = parse_config(json5).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FrameSyncConfig::default();
        config.thumbnails.width = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = FrameSyncConfig::default();
        config.viewport.start_percent = 60.0;
        config.viewport.end_percent = 40.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framesync.json5");
        std::fs::write(&path, "{ dataset: 'frames.json', thumbnails: { width: 90 } }").unwrap();

        let config: FrameSyncConfig = load_config(&path).unwrap();
        assert_eq!(config.dataset, "frames.json");
        assert_eq!(config.thumbnails.width, 90.0);

        let missing = load_config::<FrameSyncConfig>(dir.path().join("nope.json5"));
        assert!(matches!(missing, Err(Error::Config(_))));
    }
}
