pub mod engine;
pub mod interactive;
pub mod ollama;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod scrape;

pub use crate::domain::model::{AnalyzedStrain, RunReport, StrainInfo};
pub use crate::domain::ports::{ConfigProvider, ModelClient, Pipeline, Storage};
pub use crate::utils::error::Result;
