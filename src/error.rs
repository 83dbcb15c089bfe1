use thiserror::Error;

pub type Result<T> = std::result::Result<T, HabitoError>;

#[derive(Debug, Error)]
pub enum HabitoError {
    #[error("Habit name cannot be empty")]
    EmptyName,

    #[error("A habit named '{0}' already exists")]
    DuplicateName(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(u32),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl HabitoError {
    /// True for the validation failures that should be surfaced to the user
    /// as an actionable message (the operation was aborted, state unchanged).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyName | Self::DuplicateName(_))
    }
}
