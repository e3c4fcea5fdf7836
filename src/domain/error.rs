use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown entity: {name}")]
    UnknownEntity { name: String },

    #[error("Not found: {entity} '{id}'")]
    RecordNotFound { entity: String, id: String },

    #[error("Malformed storage for {entity}: {message}")]
    MalformedStorage { entity: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    pub fn record_not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn malformed_storage(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedStorage {
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// True for the errors the boundary reports as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownEntity { .. } | Self::RecordNotFound { .. })
    }
}
