use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudtenderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model endpoint error: {message}")]
    ModelError { message: String },

    #[error("Scrape error: {message}")]
    ScrapeError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Model,
    Config,
}

impl BudtenderError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BudtenderError::HttpError(_) => ErrorSeverity::Medium,
            BudtenderError::ScrapeError { .. } => ErrorSeverity::Medium,
            BudtenderError::ModelError { .. } => ErrorSeverity::Medium,
            BudtenderError::IoError(_) => ErrorSeverity::High,
            BudtenderError::SerializationError(_) => ErrorSeverity::High,
            BudtenderError::ConfigError { .. } => ErrorSeverity::Critical,
            BudtenderError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BudtenderError::HttpError(_) => ErrorCategory::Network,
            BudtenderError::ScrapeError { .. } => ErrorCategory::Network,
            BudtenderError::ModelError { .. } => ErrorCategory::Model,
            BudtenderError::IoError(_) => ErrorCategory::Io,
            BudtenderError::SerializationError(_) => ErrorCategory::Data,
            BudtenderError::ConfigError { .. } => ErrorCategory::Config,
            BudtenderError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BudtenderError::HttpError(_) => {
                "Check your network connection and that the menu URL is reachable"
            }
            BudtenderError::ScrapeError { .. } => {
                "Open the listing URL in a browser to confirm the page still exists"
            }
            BudtenderError::ModelError { .. } => {
                "Make sure Ollama is running locally (ollama serve) and the model has been pulled"
            }
            BudtenderError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            BudtenderError::SerializationError(_) => {
                "The endpoint returned a payload in an unexpected format; retry or check the endpoint version"
            }
            BudtenderError::ConfigError { .. } | BudtenderError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BudtenderError::HttpError(e) => format!("Could not reach the remote server: {}", e),
            BudtenderError::ScrapeError { message } => {
                format!("Could not read the menu page: {}", message)
            }
            BudtenderError::ModelError { message } => {
                format!("The analysis model is not responding: {}", message)
            }
            BudtenderError::IoError(e) => format!("Could not access local files: {}", e),
            BudtenderError::SerializationError(e) => {
                format!("Received a malformed response: {}", e)
            }
            BudtenderError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            BudtenderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem with '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BudtenderError>;
