use thiserror::Error;

#[derive(Error, Debug)]
pub enum BulkError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BulkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BulkError::CsvError(_) => ErrorCategory::Input,
            BulkError::IoError(_) => ErrorCategory::Output,
            BulkError::SerializationError(_) => ErrorCategory::Output,
            BulkError::ConfigError { .. }
            | BulkError::InvalidConfigValueError { .. }
            | BulkError::MissingConfigError { .. }
            | BulkError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BulkError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BulkError::CsvError(_) => ErrorSeverity::High,
            BulkError::IoError(_) => ErrorSeverity::Critical,
            BulkError::SerializationError(_) => ErrorSeverity::Critical,
            BulkError::ProcessingError { .. } => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Check that the input file is a comma-separated CSV with a header row"
            }
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => {
                "Review the command line flags and the TOML policy file"
            }
            ErrorCategory::Processing => "Re-run with --verbose to see which row was rejected",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BulkError::CsvError(e) => format!("Could not read the CSV input: {}", e),
            BulkError::IoError(e) => format!("File access failed: {}", e),
            BulkError::MissingConfigError { field } => {
                format!("The setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BulkError>;
