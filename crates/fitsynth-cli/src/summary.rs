use serde::Serialize;

use fitsynth_generator::DatasetSummary;

/// Printed to stdout as JSON once a run completes.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    #[serde(flatten)]
    pub dataset: DatasetSummary,
    pub output_dir: String,
    pub archive: String,
    pub seed: u64,
}

impl RunSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
