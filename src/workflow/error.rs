//! Workflow error taxonomy.
//!
//! Every variant except [`WorkflowError::InvalidTransition`] ends the current
//! request and is shown in the Error phase; its `Display` text is exactly the
//! message the user sees.

use thiserror::Error;

use crate::input::Rejection;
use crate::service::ServiceError;

use super::state::PhaseKind;

/// Shown when the service reports failure without a usable message.
pub const SERVICE_FALLBACK_MESSAGE: &str = "Transcription failed. Please try again.";

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The file was refused by the input validator.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Submission attempted with an empty selection.
    #[error("Please select a file first.")]
    NoFileSelected,

    /// The service answered but reported failure.
    #[error("{0}")]
    Service(String),

    /// No response could be obtained from the service.
    #[error("Network error. Please check your connection and try again.")]
    Transport(#[source] ServiceError),

    /// The selected file could not be read from disk.
    #[error("Could not read {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The action is not available in the current phase; nothing changed.
    #[error("cannot {action} during the {phase} phase")]
    InvalidTransition {
        action: &'static str,
        phase: PhaseKind,
    },
}

impl WorkflowError {
    /// Service failure carrying the generic fallback message.
    pub fn service_fallback() -> Self {
        WorkflowError::Service(SERVICE_FALLBACK_MESSAGE.to_string())
    }

    /// `true` when this error put the workflow into the Error phase.
    pub fn enters_error_phase(&self) -> bool {
        !matches!(self, WorkflowError::InvalidTransition { .. })
    }
}
