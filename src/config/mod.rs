pub mod cli;
pub mod file;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MENU_URL: &str = "https://livwell.com/order_ahead/pre-weighed-flower?page={page}";
pub const DEFAULT_MODEL_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL_NAME: &str = "mistral";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "budtender")]
#[command(about = "Scrapes a dispensary menu and analyzes strains with a local model")]
pub struct CliConfig {
    /// Listing URL template; {page} is replaced with the page number
    #[arg(long, default_value = DEFAULT_MENU_URL)]
    pub menu_url: String,

    /// Number of listing pages to fetch
    #[arg(long, default_value = "2")]
    pub pages: usize,

    /// Base URL of the Ollama endpoint
    #[arg(long, default_value = DEFAULT_MODEL_ENDPOINT)]
    pub model_endpoint: String,

    /// Model to request from the endpoint
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    pub model_name: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Delay between model calls, in milliseconds
    #[arg(long, default_value = "1000")]
    pub delay_ms: u64,

    /// Per-request timeout for listing pages, in seconds
    #[arg(long, default_value = "10")]
    pub timeout_secs: u64,

    /// Optional TOML configuration file; CLI flags below still apply
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Skip the interactive recommendation loop")]
    pub no_interactive: bool,
}

impl ConfigProvider for CliConfig {
    fn menu_url(&self) -> &str {
        &self.menu_url
    }

    fn pages(&self) -> usize {
        self.pages
    }

    fn model_endpoint(&self) -> &str {
        &self.model_endpoint
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("menu_url", &self.menu_url)?;
        validation::validate_page_placeholder("menu_url", &self.menu_url)?;
        validation::validate_positive_number("pages", self.pages, 1)?;
        validation::validate_url("model_endpoint", &self.model_endpoint)?;
        validation::validate_non_empty_string("model_name", &self.model_name)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("timeout_secs", self.timeout_secs as usize, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            menu_url: DEFAULT_MENU_URL.to_string(),
            pages: 2,
            model_endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            output_path: "./output".to_string(),
            delay_ms: 1000,
            timeout_secs: 10,
            config: None,
            verbose: false,
            monitor: false,
            no_interactive: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_menu_url_requires_page_placeholder() {
        let mut config = base_config();
        config.menu_url = "https://example.com/menu?page=1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pages_is_rejected() {
        let mut config = base_config();
        config.pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_model_name_is_rejected() {
        let mut config = base_config();
        config.model_name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
