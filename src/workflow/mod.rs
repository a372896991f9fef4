//! Workflow core — the upload → processing → result/error state machine and
//! the orchestrator that drives a submission through it.
//!
//! # Architecture
//!
//! ```text
//! CandidateFile ──WorkflowContext::choose_file──▶ Selection (Ready)
//!                                                    │
//!                TranscriptionOrchestrator::submit ◀─┘
//!                        │
//!                        ├─ TranscriptionService::transcribe (await)
//!                        ▼
//!                WorkflowPhase::{Result | Error}
//!                        │
//!                view::render ──▶ View
//! ```

pub mod error;
pub mod runner;
pub mod state;

pub use error::{WorkflowError, SERVICE_FALLBACK_MESSAGE};
pub use runner::{EventSender, TranscriptionOrchestrator, WorkflowEvent, UPLOADING_LABEL};
pub use state::{PhaseKind, WorkflowContext, WorkflowPhase};
