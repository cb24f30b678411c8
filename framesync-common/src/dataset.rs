//! Dataset decoding and loading.
//!
//! The dataset is a JSON object whose `timestamp` field is an ordered array of
//! ISO-8601 strings. Any other fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timeline::Timestamp;

/// Raw dataset payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub timestamp: Vec<String>,
}

impl Dataset {
    /// Parse every timestamp string, failing on the first invalid one.
    pub fn timestamps(&self) -> Result<Vec<Timestamp>> {
        self.timestamp.iter().map(Timestamp::parse).collect()
    }
}

/// Decode a JSON dataset payload into parsed timestamps.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<Timestamp>> {
    let dataset: Dataset = serde_json::from_slice(bytes)?;
    dataset.timestamps()
}

/// Load the dataset from an `http(s)://` URL or a local file path.
pub async fn load_dataset(source: &str) -> Result<Vec<Timestamp>> {
    let bytes = if is_url(source) {
        tracing::info!(url = %source, "Fetching dataset");
        reqwest::get(source)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    } else {
        tracing::info!(path = %source, "Reading dataset");
        tokio::fs::read(source).await?
    };

    let timestamps = parse_dataset(&bytes)?;
    tracing::debug!(count = timestamps.len(), bytes = bytes.len(), "Decoded dataset");
    Ok(timestamps)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
