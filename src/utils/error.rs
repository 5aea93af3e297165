use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Cannot open input file {}: {source}", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: u64 },

    #[error("Row at line {line} has {found} fields, expected at least {expected}")]
    ShortRow {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Email column '{name}' not found in header")]
    UnknownColumn { name: String },

    #[error("Email column {index} is out of range, the header has {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 非致命錯誤：email 欄位中找不到 `@`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no '@' found in email address '{email}'")]
pub struct InvalidAddress {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程序退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::FileError { .. }
            | ImportError::CsvError(_)
            | ImportError::UnterminatedQuote { .. }
            | ImportError::ShortRow { .. }
            | ImportError::UnknownColumn { .. }
            | ImportError::ColumnOutOfRange { .. } => ErrorCategory::Input,
            ImportError::ConfigError { .. }
            | ImportError::MissingConfigError { .. }
            | ImportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ImportError::IoError(_) | ImportError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ImportError::FileError { path, .. } => format!(
                "Check that {} exists and is readable",
                path.display()
            ),
            ImportError::CsvError(_) => {
                "Make sure the input is UTF-8, comma-separated and has balanced quotes".to_string()
            }
            ImportError::UnterminatedQuote { line } => {
                format!("Close the quoted field that starts at line {}", line)
            }
            ImportError::ShortRow { line, expected, .. } => format!(
                "Fix line {} so it has at least {} comma-separated fields",
                line, expected
            ),
            ImportError::UnknownColumn { .. } | ImportError::ColumnOutOfRange { .. } => {
                "Pass the exact header name or a zero-based position to --email-column".to_string()
            }
            ImportError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            ImportError::ConfigError { .. } | ImportError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the config file".to_string()
            }
            ImportError::IoError(_) => {
                "Check that the output location is writable and has free space".to_string()
            }
            ImportError::SerializationError(_) => "Try the csv output format".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read customer data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
