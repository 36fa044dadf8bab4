pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, file::FileConfig, CliConfig};
pub use core::{engine::Engine, ollama::OllamaClient, pipeline::MenuPipeline};
pub use utils::error::{BudtenderError, Result};
