use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// Uploads larger than this are rejected.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Simulated processing time before a result is delivered.
pub const ANALYSIS_DELAY_MS: u64 = 2500;

/// Runtime tunables for the studio and the command-line tool.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.  The set of accepted MIME types is fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetalConfig {
    /// Address the studio binds to.
    pub bind_addr: String,
    /// Artificial delay between analysis start and result delivery.
    pub analysis_delay_ms: u64,
    /// Upload size limit in bytes.
    pub max_upload_bytes: u64,
}

impl Default for PetalConfig {
    fn default() -> Self {
        PetalConfig {
            bind_addr: "127.0.0.1:7878".to_owned(),
            analysis_delay_ms: ANALYSIS_DELAY_MS,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl PetalConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a config previously written by `save_json` (or by hand).
    pub fn load_json(path: &str) -> Result<PetalConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
