use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),

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

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Rendering,
    Watch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BuildError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuildError::IoError(_) => ErrorCategory::FileSystem,
            BuildError::SerializationError(_) | BuildError::RenderError { .. } => {
                ErrorCategory::Rendering
            }
            BuildError::WatchError(_) => ErrorCategory::Watch,
            BuildError::ConfigError { .. }
            | BuildError::ConfigValidationError { .. }
            | BuildError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 監看失敗時已完成的建置仍然有效
            BuildError::WatchError(_) => ErrorSeverity::Medium,
            BuildError::RenderError { .. } | BuildError::SerializationError(_) => {
                ErrorSeverity::High
            }
            BuildError::ConfigError { .. }
            | BuildError::ConfigValidationError { .. }
            | BuildError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            BuildError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BuildError::IoError(e) => match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    "Check read/write permissions on the content and output directories".to_string()
                }
                std::io::ErrorKind::NotFound => {
                    "Make sure the referenced file or directory exists".to_string()
                }
                _ => "Check disk space and file system state, then rebuild".to_string(),
            },
            BuildError::SerializationError(_) => {
                "Course data could not be serialized; rebuild with --verbose for details".to_string()
            }
            BuildError::WatchError(_) => {
                "Restart watch mode, or run a one-off build instead".to_string()
            }
            BuildError::ConfigError { .. } => {
                "Check the --config path points to a readable TOML file".to_string()
            }
            BuildError::ConfigValidationError { .. } => {
                "Check the configuration file is valid TOML".to_string()
            }
            BuildError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration or command line", field)
            }
            BuildError::RenderError { .. } => {
                "Check the HTML template contains the modules placeholder".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BuildError::IoError(e) => format!("File system error: {}", e),
            BuildError::SerializationError(_) => "Failed to serialize course data".to_string(),
            BuildError::WatchError(e) => format!("Watching for changes failed: {}", e),
            BuildError::ConfigError { message } => format!("Configuration problem: {}", message),
            BuildError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            BuildError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' = '{}' is not allowed ({})", field, value, reason)
            }
            BuildError::RenderError { message } => format!("Could not render site: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
