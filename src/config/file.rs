use crate::config::{DEFAULT_MODEL_ENDPOINT, DEFAULT_MODEL_NAME};
use crate::core::ConfigProvider;
use crate::utils::error::{BudtenderError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// TOML configuration file. Only `[scrape].url` is required; everything else
/// falls back to the CLI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub scrape: ScrapeSection,
    pub model: Option<ModelSection>,
    pub output: Option<OutputSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSection {
    pub url: String,
    pub pages: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BudtenderError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BudtenderError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with environment variable values. Unknown
    /// variables are left in place.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for FileConfig {
    fn menu_url(&self) -> &str {
        &self.scrape.url
    }

    fn pages(&self) -> usize {
        self.scrape.pages.unwrap_or(2)
    }

    fn model_endpoint(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.endpoint.as_deref())
            .unwrap_or(DEFAULT_MODEL_ENDPOINT)
    }

    fn model_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or(DEFAULT_MODEL_NAME)
    }

    fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or("./output")
    }

    fn delay_ms(&self) -> u64 {
        self.model.as_ref().and_then(|m| m.delay_ms).unwrap_or(1000)
    }

    fn timeout_secs(&self) -> u64 {
        self.scrape.timeout_seconds.unwrap_or(10)
    }

    fn extra_headers(&self) -> Option<&HashMap<String, String>> {
        self.scrape.headers.as_ref()
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("scrape.url", &self.scrape.url)?;
        validation::validate_page_placeholder("scrape.url", &self.scrape.url)?;
        validation::validate_positive_number("scrape.pages", self.pages(), 1)?;
        validation::validate_url("model.endpoint", self.model_endpoint())?;
        validation::validate_non_empty_string("model.name", self.model_name())?;
        validation::validate_path("output.path", self.output_path())?;
        Ok(())
    }
}
