use std::fmt;
use thiserror::Error;

/// Upstream resource kinds the façade looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Pokemon,
    PokemonType,
}

impl Resource {
    /// Path segment of the resource on the upstream API.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Resource::Pokemon => "pokemon",
            Resource::PokemonType => "type",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Pokemon => write!(f, "Pokemon"),
            Resource::PokemonType => write!(f, "Pokemon type"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{resource} '{identifier}' not found upstream")]
    NotFoundError {
        resource: Resource,
        identifier: String,
    },

    #[error("Upstream request failed: {0}")]
    UpstreamCommunicationError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamStatusError { status: u16, body: String },

    #[error("Malformed upstream response: {message}")]
    MalformedResponseError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse classification consumed by the error mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    UpstreamCommunication,
    MalformedResponse,
    Internal,
}

impl FacadeError {
    pub fn validation(message: impl Into<String>) -> Self {
        FacadeError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(resource: Resource, identifier: impl Into<String>) -> Self {
        FacadeError::NotFoundError {
            resource,
            identifier: identifier.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FacadeError::MalformedResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FacadeError::ValidationError { .. } => ErrorCategory::Validation,
            FacadeError::NotFoundError { .. } => ErrorCategory::NotFound,
            FacadeError::UpstreamCommunicationError(_)
            | FacadeError::UpstreamStatusError { .. } => ErrorCategory::UpstreamCommunication,
            FacadeError::MalformedResponseError { .. } => ErrorCategory::MalformedResponse,
            FacadeError::SerializationError(_)
            | FacadeError::IoError(_)
            | FacadeError::StorageError { .. }
            | FacadeError::ConfigError { .. }
            | FacadeError::MissingConfigError { .. }
            | FacadeError::InvalidConfigValueError { .. } => ErrorCategory::Internal,
        }
    }

    /// HTTP status the façade answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::UpstreamCommunication
            | ErrorCategory::MalformedResponse
            | ErrorCategory::Internal => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, FacadeError>;
