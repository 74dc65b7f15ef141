use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressBookError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Storage error at '{path}': {source}")]
    StorageError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl AddressBookError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::StorageError { .. } => ErrorCategory::Storage,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 對應錯誤嚴重程度的程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File system error: {}", e),
            Self::StorageError { path, source } => {
                format!("Could not read or write '{}': {}", path, source)
            }
            Self::SerializationError(e) => {
                format!("The contacts file is not valid contact data: {}", e)
            }
            Self::CsvError(e) => format!("Export failed: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) | Self::StorageError { .. } => {
                "Check that the file path exists and that you have read/write permission"
            }
            Self::SerializationError(_) => {
                "Fix or remove the contacts file; it must be a JSON array of {name, phone, email, address} objects"
            }
            Self::CsvError(_) => "Check the export destination and try again",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressBookError>;
