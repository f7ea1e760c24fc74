use serde::Deserialize;
use thiserror::Error;

/// Failure of a single user action. Nothing here is fatal to the process;
/// each variant is scoped to the action that produced it.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error (status {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request already in progress")]
    Busy,

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

impl ActionError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ActionError::Validation(reason.into())
    }

    /// Builds a `Server` error, preferring the service's `{"error": "..."}`
    /// message over the raw body.
    pub fn from_response(status: u16, body: String) -> Self {
        let body = serde_json::from_str::<ServiceErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        ActionError::Server { status, body }
    }

    /// Short label used as the prefix of a rendered failure line.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "Invalid input",
            ActionError::Network(_) => "Network failure",
            ActionError::Server { .. } => "Service failure",
            ActionError::Decode(_) => "Unexpected response",
            ActionError::Busy => "Busy",
            ActionError::Io(_) => "File error",
        }
    }

    /// The user-facing reason. Validation messages are shown verbatim.
    pub fn reason(&self) -> String {
        match self {
            ActionError::Validation(msg) => msg.clone(),
            ActionError::Server { body, .. } if !body.trim().is_empty() => body.clone(),
            ActionError::Server { status, .. } => format!("Server error: {status}"),
            other => other.to_string(),
        }
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

/// Where an action stands. Views hold one of these per action instead of
/// separate busy/error flags.
#[derive(Debug, Default)]
pub enum ActionState<T> {
    #[default]
    Idle,
    Busy,
    Done(T),
    Failed(ActionError),
}

impl<T> ActionState<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, ActionState::Busy)
    }

    pub fn done(&self) -> Option<&T> {
        match self {
            ActionState::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn from_result(result: ActionResult<T>) -> Self {
        match result {
            Ok(value) => ActionState::Done(value),
            Err(err) => ActionState::Failed(err),
        }
    }
}

/// Renders the visible line for a failed action.
pub fn failure_line(err: &ActionError) -> String {
    match err {
        ActionError::Validation(msg) => msg.clone(),
        other => format!("{}: {}", other.kind(), other.reason()),
    }
}
