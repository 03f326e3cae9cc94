use serde::{Deserialize, Serialize};

use crate::analysis::flower_type::FlowerType;

/// Outcome of one completed analysis.
///
/// Serialized with the field names the result card and `--json` output use:
/// `petalCount`, `confidence`, `processingTime`, `flowerType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Estimated petals, always in `[3, 50]`.
    pub petal_count: u32,
    /// Percentage in `[85, 95)`.
    pub confidence: f64,
    /// Wall-clock milliseconds from analysis start to delivery.
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    pub flower_type: FlowerType,
}

impl AnalysisResult {
    pub fn processing_time_secs(&self) -> f64 {
        self.processing_time_ms as f64 / 1000.0
    }
}
