use models::ModelError;
use thiserror::Error;

/// Failures raised by [`crate::storage::EntityStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("invalid record id `{0}`")]
    InvalidId(String),
    /// The store already holds a record under this ID. Raised by `add` only
    /// if the allocator is broken.
    #[error("record id {0} is already in use")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{entity} {id} not found")) }

    /// Fails with `Validation` when `violations` is not empty.
    pub fn check(violations: Vec<String>) -> Result<(), Self> {
        if violations.is_empty() { Ok(()) } else { Err(Self::Validation(violations)) }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        Self::Validation(e.messages())
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Model(m) => m.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}
