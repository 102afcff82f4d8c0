use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhaseListError {
    #[error("Travel-time request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid origin time '{value}': {source}")]
    InvalidOriginTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Travel-time engine error: {message}")]
    EngineError { message: String },

    #[error("Unparseable engine response at line {line}: {message}")]
    EngineResponseError { line: usize, message: String },

    #[error("Input closed before {field} was entered")]
    InputClosed { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Engine,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PhaseListError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PhaseListError::InvalidOriginTime { .. }
            | PhaseListError::InputClosed { .. }
            | PhaseListError::ProcessingError { .. } => ErrorCategory::Input,
            PhaseListError::HttpError(_)
            | PhaseListError::EngineError { .. }
            | PhaseListError::EngineResponseError { .. } => ErrorCategory::Engine,
            PhaseListError::ConfigError { .. }
            | PhaseListError::ConfigValidationError { .. }
            | PhaseListError::InvalidConfigValueError { .. }
            | PhaseListError::MissingConfigError { .. }
            | PhaseListError::CsvError(_) => ErrorCategory::Configuration,
            PhaseListError::IoError(_) | PhaseListError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 決定退出碼用的嚴重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Engine => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PhaseListError::HttpError(e) if e.is_timeout() => {
                "The travel-time service did not answer in time".to_string()
            }
            PhaseListError::HttpError(_) => "Could not reach the travel-time service".to_string(),
            PhaseListError::InvalidOriginTime { value, .. } => {
                format!("Origin time '{}' is not a valid timestamp", value)
            }
            PhaseListError::InputClosed { field } => {
                format!("Input ended before the {} was entered", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Use the origin time format yyyy-mm-ddTHH:MM:SS and decimal degrees for coordinates"
            }
            ErrorCategory::Engine => {
                "Check network access and the --engine-url setting, then try again"
            }
            ErrorCategory::Configuration => {
                "Check the config file and station file for typos or invalid values"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, PhaseListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_use_retry_exit_code() {
        let err = PhaseListError::EngineError {
            message: "HTTP 503".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Engine);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_origin_time_error_is_input_error() {
        let source = chrono::NaiveDateTime::parse_from_str("bogus", "%Y").unwrap_err();
        let err = PhaseListError::InvalidOriginTime {
            value: "bogus".to_string(),
            source,
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("bogus"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = PhaseListError::MissingConfigError {
            field: "engine.endpoint".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
