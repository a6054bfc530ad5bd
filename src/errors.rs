use serde::Serialize;

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(
        #[from]
        #[serde(skip)]
        std::io::Error,
    ),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl ServiceError {
    /// Machine-readable code for this error.
    /// This is the single source of truth for error classification at the UI boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "validation_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::Conflict(_) => "conflict",
            Self::SerializationError(_) => "serialization_error",
            Self::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn service_error_code_mapping() {
        assert_eq!(
            ServiceError::ValidationError("x".into()).code(),
            "validation_error"
        );
        assert_eq!(ServiceError::InvalidInput("x".into()).code(), "invalid_input");
        assert_eq!(ServiceError::Conflict("x".into()).code(), "conflict");
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(ServiceError::from(io).code(), "io_error");
    }

    #[test]
    fn validation_errors_convert_to_validation_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));
        let err: ServiceError = errors.into();
        assert!(matches!(err, ServiceError::ValidationError(ref msg) if msg.contains("name")));
    }

    #[test]
    fn json_errors_convert_to_serialization_error() {
        let err: ServiceError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "serialization_error");
    }
}
