use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Script not found: {0}")]
    ScriptNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(#[from] DeniedReason),

    #[error("Concurrent update on script {0}")]
    Conflict(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The specific guard condition that failed.
///
/// Every denial surfaces as `FlowError::PermissionDenied`; the reason is
/// carried so tests and logs can tell which check tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeniedReason {
    #[error("script is not at the stage this action requires")]
    WrongStage,

    #[error("user's role does not gate this stage")]
    WrongRole,

    #[error("script is assigned to another user")]
    NotAssignee,

    #[error("approver already voted on this script")]
    AlreadyVoted,
}

impl FlowError {
    /// Conflicts are the only errors worth retrying; a denial or a missing
    /// entity will not change without new input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::Conflict(_))
    }
}
