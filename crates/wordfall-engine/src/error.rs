use thiserror::Error;

/// Failure loading or validating a [`SessionConfig`](crate::core::config::SessionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure loading a [`VocabularyCatalog`](crate::assets::vocabulary::VocabularyCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse vocabulary catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("vocabulary catalog defines no entries")]
    Empty,
}

/// Failure reported by a host collaborator (audio, rendering, persistence).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}
