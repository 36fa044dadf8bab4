use crate::domain::model::{AnalyzedStrain, StrainInfo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn menu_url(&self) -> &str;
    fn pages(&self) -> usize;
    fn model_endpoint(&self) -> &str;
    fn model_name(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delay_ms(&self) -> u64;
    fn timeout_secs(&self) -> u64;

    /// Extra request headers on top of the browser-mimicking defaults.
    fn extra_headers(&self) -> Option<&HashMap<String, String>> {
        None
    }
}

/// Seam to the inference endpoint, so the pipeline and the recommendation
/// loop can be driven by a mock in tests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<StrainInfo>>;
    async fn transform(&self, listings: Vec<StrainInfo>) -> Result<Vec<AnalyzedStrain>>;
    async fn load(&self, strains: &[AnalyzedStrain]) -> Result<String>;
}
