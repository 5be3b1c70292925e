use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// One human readable message per violation, suitable for clients.
    #[error("validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

impl ModelError {
    /// Violations as client facing messages.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(msgs) => msgs.clone(),
            Self::UnknownField(name) => vec![format!("'{name}' is not an updatable field.")],
        }
    }
}
