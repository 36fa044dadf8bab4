use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A strain listing as scraped from the menu, before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrainInfo {
    pub strain_name: String,
    pub thc_percentage: String,
}

/// A strain with the model's analysis attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedStrain {
    pub strain_name: String,
    pub thc_percentage: String,
    pub analysis: String,
}

/// Outcome of a full scrape-and-analyze run.
///
/// `output_path` is `None` when writing the report failed; the run itself
/// still counts as successful and the strains stay available for the
/// recommendation loop.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub strains: Vec<AnalyzedStrain>,
    pub output_path: Option<String>,
    pub duration: Duration,
}
