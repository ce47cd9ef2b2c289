use std::fmt;

use crate::risk::RiskError;

#[derive(Debug)]
pub enum AppError {
    ConfigError(String),
    ValidationError(String),
    IoError(String),
    AssessmentError(RiskError),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::IoError(msg) => write!(f, "I/O error: {}", msg),
            AppError::AssessmentError(err) => write!(f, "Assessment error: {}", err),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::AssessmentError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        AppError::AssessmentError(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_error_keeps_detail() {
        let err: AppError = RiskError::InvalidDate {
            field: "audits[0].date".to_string(),
            value: "yesterday".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Assessment error: Unparseable date in audits[0].date: \"yesterday\""
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json").into();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
