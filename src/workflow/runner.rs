//! Transcription request orchestrator — drives one submission from Ready to
//! Result or Error.
//!
//! # Submission flow
//!
//! ```text
//! submit(ctx, options)
//!   ├─ phase ≠ Upload          → InvalidTransition (nothing changes)
//!   ├─ no selection            → Error "Please select a file first."
//!   ├─ open file for upload    → Error on I/O failure
//!   ├─ Processing "Uploading file..."
//!   └─ service.transcribe(request)
//!         ├─ Ok(reply), success  → Result
//!         ├─ Ok(reply), failure  → Error (server message or fallback)
//!         └─ Err(transport)      → Error (generic network message)
//! ```
//!
//! `submit` borrows the context mutably for the whole request, so a second
//! submission cannot start while one is in flight.  There is no timeout,
//! cancel or automatic retry.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::service::{
    ServiceReply, TranscriptionOptions, TranscriptionRequest, TranscriptionResult,
    TranscriptionService,
};

use super::error::WorkflowError;
use super::state::{PhaseKind, WorkflowContext};

/// Progress label shown while the request is in flight.
pub const UPLOADING_LABEL: &str = "Uploading file...";

// ---------------------------------------------------------------------------
// WorkflowEvent
// ---------------------------------------------------------------------------

/// Progress notifications published while a submission runs.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// The request has been handed to the service.
    Processing { label: String },
    /// The Result phase was entered.
    Completed,
    /// The Error phase was entered.
    Failed { message: String },
}

pub type EventSender = mpsc::UnboundedSender<WorkflowEvent>;

// ---------------------------------------------------------------------------
// TranscriptionOrchestrator
// ---------------------------------------------------------------------------

/// Builds requests from the selection and options, calls the service and
/// maps its answer onto the workflow context.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use media_transcriber::config::AppConfig;
/// use media_transcriber::input::CandidateFile;
/// use media_transcriber::service::{HttpTranscriptionService, TranscriptionOptions};
/// use media_transcriber::workflow::{TranscriptionOrchestrator, WorkflowContext};
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let service = Arc::new(HttpTranscriptionService::from_config(&config.service));
/// let orchestrator = TranscriptionOrchestrator::new(service);
///
/// let mut ctx = WorkflowContext::new();
/// ctx.choose_file(CandidateFile::from_path("talk.mp4").await.unwrap()).unwrap();
/// let _ = orchestrator.submit(&mut ctx, &TranscriptionOptions::default()).await;
/// println!("{:?}", ctx.phase());
/// # }
/// ```
pub struct TranscriptionOrchestrator {
    service: Arc<dyn TranscriptionService>,
    events: Option<EventSender>,
}

impl TranscriptionOrchestrator {
    pub fn new(service: Arc<dyn TranscriptionService>) -> Self {
        Self {
            service,
            events: None,
        }
    }

    /// Publish [`WorkflowEvent`]s on `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Submit the selected file with `options`.
    ///
    /// On return the context is in Result (`Ok`) or Error (`Err`), except for
    /// [`WorkflowError::InvalidTransition`], which leaves it untouched.
    pub async fn submit(
        &self,
        ctx: &mut WorkflowContext,
        options: &TranscriptionOptions,
    ) -> Result<(), WorkflowError> {
        ctx.ensure("submit", PhaseKind::Upload)?;

        let Some(file) = ctx.selection().file().cloned() else {
            return Err(self.fail(ctx, WorkflowError::NoFileSelected));
        };

        let request = match TranscriptionRequest::open(&file, options).await {
            Ok(request) => request,
            Err(source) => {
                let err = WorkflowError::FileRead {
                    name: file.name().to_string(),
                    source,
                };
                return Err(self.fail(ctx, err));
            }
        };

        ctx.begin_processing(UPLOADING_LABEL);
        log::debug!("workflow: Upload → Processing ({})", file.name());
        self.emit(WorkflowEvent::Processing {
            label: UPLOADING_LABEL.to_string(),
        });

        let outcome = match self.service.transcribe(request).await {
            Ok(reply) => interpret(reply),
            Err(e) => Err(WorkflowError::Transport(e)),
        };

        match outcome {
            Ok(result) => {
                log::info!(
                    "transcription complete: {:.1}s, language={}, {} segments",
                    result.duration,
                    result.language,
                    result.segments.len()
                );
                ctx.complete(result);
                self.emit(WorkflowEvent::Completed);
                Ok(())
            }
            Err(err) => Err(self.fail(ctx, err)),
        }
    }

    fn fail(&self, ctx: &mut WorkflowContext, err: WorkflowError) -> WorkflowError {
        match std::error::Error::source(&err) {
            Some(cause) => log::error!("transcription failed: {err} ({cause})"),
            None => log::error!("transcription failed: {err}"),
        }
        let err = ctx.fail(err);
        self.emit(WorkflowEvent::Failed {
            message: err.to_string(),
        });
        err
    }

    fn emit(&self, event: WorkflowEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is rendering progress.
            let _ = tx.send(event);
        }
    }
}

/// Map a service reply onto a result or a service error.
///
/// A success reply missing its `transcription` or `files` section counts as
/// a service failure with the fallback message.
fn interpret(reply: ServiceReply) -> Result<TranscriptionResult, WorkflowError> {
    if !reply.is_success() {
        let message = reply
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| super::error::SERVICE_FALLBACK_MESSAGE.to_string());
        return Err(WorkflowError::Service(message));
    }

    let (Some(transcription), Some(files)) = (&reply.body.transcription, &reply.body.files) else {
        log::warn!("success reply without transcription/files sections");
        return Err(WorkflowError::service_fallback());
    };

    TranscriptionResult::from_parts(transcription, files).map_err(|e| {
        log::warn!("malformed success reply: {e}");
        WorkflowError::service_fallback()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
