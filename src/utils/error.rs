use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("the request content must be of '{expected}' type")]
    InvalidDiscriminator { expected: &'static str },

    #[error("{kind} was not found")]
    NotFound { kind: &'static str },

    #[error("unit is invalid or not supported")]
    InvalidUnit { unit: String },

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{store} store is unavailable")]
    StoreUnavailable { store: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ServiceError {
    /// HTTP status a request failing with this error is answered with.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidDiscriminator { .. }
            | ServiceError::InvalidUnit { .. }
            | ServiceError::MalformedBody(_) => 400,
            ServiceError::NotFound { .. } => 404,
            ServiceError::StoreUnavailable { .. }
            | ServiceError::IoError(_)
            | ServiceError::ConfigValidationError { .. }
            | ServiceError::InvalidConfigValueError { .. } => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
