//! Workflow phase state machine and the per-session workflow context.
//!
//! [`WorkflowPhase`] is the single active stage; [`WorkflowContext`] pairs it
//! with the [`Selection`] and owns every transition.  Each transition assigns
//! the whole phase value at once, so a renderer never observes two phases or
//! a half-applied change.

use std::fmt;

use crate::input::{validate, CandidateFile, Selection, Verdict};
use crate::service::TranscriptionResult;

use super::error::WorkflowError;

// ---------------------------------------------------------------------------
// WorkflowPhase
// ---------------------------------------------------------------------------

/// Phases of the upload-to-result lifecycle.
///
/// ```text
/// Upload ──choose_file(rejected)──────────────▶ Error
/// Upload (Ready) ──submit──▶ Processing ──ok──▶ Result
///                                       ──err─▶ Error
/// Error ──try_again──▶ Upload (selection kept)
/// any   ──new_transcription──▶ Upload (selection + result cleared)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowPhase {
    /// Waiting for a file, or holding one awaiting submission (Ready).
    #[default]
    Upload,
    /// A request is in flight.
    Processing { progress: String },
    /// The last request succeeded.
    Result(TranscriptionResult),
    /// The last action failed.
    Error { message: String },
}

impl WorkflowPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            WorkflowPhase::Upload => PhaseKind::Upload,
            WorkflowPhase::Processing { .. } => PhaseKind::Processing,
            WorkflowPhase::Result(_) => PhaseKind::Result,
            WorkflowPhase::Error { .. } => PhaseKind::Error,
        }
    }

    /// `true` while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowPhase::Processing { .. })
    }
}

/// Payload-free discriminant of [`WorkflowPhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Upload,
    Processing,
    Result,
    Error,
}

impl PhaseKind {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Upload => "upload",
            PhaseKind::Processing => "processing",
            PhaseKind::Result => "result",
            PhaseKind::Error => "error",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// WorkflowContext
// ---------------------------------------------------------------------------

/// Mutable state of one workflow session.
///
/// Created at session start and passed by `&mut` to the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    phase: WorkflowPhase,
    selection: Selection,
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &WorkflowPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The result being displayed, only while in the Result phase.
    pub fn result(&self) -> Option<&TranscriptionResult> {
        match &self.phase {
            WorkflowPhase::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            WorkflowPhase::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Upload phase with a file selected: the only state that can submit.
    pub fn is_ready(&self) -> bool {
        self.kind() == PhaseKind::Upload && !self.selection.is_empty()
    }

    /// Fail with [`WorkflowError::InvalidTransition`] unless the current
    /// phase is `expected`.
    pub fn ensure(&self, action: &'static str, expected: PhaseKind) -> Result<(), WorkflowError> {
        let phase = self.kind();
        if phase == expected {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition { action, phase })
        }
    }

    // -----------------------------------------------------------------------
    // User actions
    // -----------------------------------------------------------------------

    /// Validate `file` and select it, replacing any previous choice.
    ///
    /// A rejected file moves the workflow to Error and leaves the previous
    /// selection untouched.
    pub fn choose_file(&mut self, file: CandidateFile) -> Result<(), WorkflowError> {
        self.ensure("choose a file", PhaseKind::Upload)?;

        match validate(file) {
            Verdict::Accepted(file) => {
                log::debug!("workflow: selected {} ({} bytes)", file.name(), file.size());
                self.selection.select(file);
                Ok(())
            }
            Verdict::Rejected(reason) => Err(self.fail(reason.into())),
        }
    }

    /// Drop the selected file.
    pub fn remove_file(&mut self) -> Result<(), WorkflowError> {
        self.ensure("remove the file", PhaseKind::Upload)?;
        self.selection.clear();
        Ok(())
    }

    /// Start over from any phase: clears the selection and any result.
    pub fn new_transcription(&mut self) {
        self.selection.clear();
        self.phase = WorkflowPhase::Upload;
    }

    /// Leave the Error phase keeping the selection, so the same file can be
    /// resubmitted.
    pub fn try_again(&mut self) -> Result<(), WorkflowError> {
        self.ensure("try again", PhaseKind::Error)?;
        self.phase = WorkflowPhase::Upload;
        Ok(())
    }

    /// Enter the Error phase with `err`'s message and hand the error back.
    ///
    /// The selection is not touched.
    pub fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        self.phase = WorkflowPhase::Error {
            message: err.to_string(),
        };
        err
    }

    // -----------------------------------------------------------------------
    // Orchestrator transitions
    // -----------------------------------------------------------------------

    pub(crate) fn begin_processing(&mut self, progress: &str) {
        self.phase = WorkflowPhase::Processing {
            progress: progress.to_string(),
        };
    }

    pub(crate) fn complete(&mut self, result: TranscriptionResult) {
        self.phase = WorkflowPhase::Result(result);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
