use shared::domain::ClipId;
use thiserror::Error;

/// Rejected user input. Recovered locally: state is left unchanged and the
/// message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{input}' is not a whole number")]
    NotAnInteger { input: String },
    #[error("limit must not be negative (got {value})")]
    Negative { value: i128 },
    #[error("'{input}' is too large for a limit")]
    TooLarge { input: String },
    #[error("unknown sound clip '{clip}'")]
    UnknownClip { clip: ClipId },
}

#[derive(Debug, Error)]
pub enum CounterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("permission denied for {resource}")]
    PermissionDenied { resource: String },
    #[error("settings overlay is not open")]
    NoOpenDraft,
    #[error("clip picker failed: {0}")]
    Picker(#[source] anyhow::Error),
}

impl CounterError {
    /// Whether the error should be shown to the user rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CounterError::Picker(_))
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
