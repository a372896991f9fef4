//! Phase → view mapping.
//!
//! [`render`] is a pure function of the workflow context: it never mutates
//! state, so views can be rebuilt after every transition.  The `Display`
//! impls produce the plain-text screens used by the terminal session.

use std::fmt;

use crate::input::MediaKind;
use crate::service::DownloadLinks;
use crate::workflow::{WorkflowContext, WorkflowPhase};

use super::format::{format_duration, format_file_size};

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Upload(UploadView),
    Processing { label: String },
    Result(ResultView),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadView {
    /// `None` shows the drop zone.
    pub file: Option<FileCard>,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileCard {
    pub name: String,
    pub size: String,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub duration: String,
    pub language: String,
    pub segments: usize,
    pub text: String,
    pub downloads: Vec<DownloadLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    pub label: &'static str,
    pub url: String,
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

pub fn render(ctx: &WorkflowContext, links: &DownloadLinks) -> View {
    match ctx.phase() {
        WorkflowPhase::Upload => View::Upload(UploadView {
            file: ctx.selection().get().map(|selected| FileCard {
                name: selected.file.name().to_string(),
                size: format_file_size(selected.file.size()),
                kind: selected.kind,
            }),
            submit_enabled: ctx.is_ready(),
        }),
        WorkflowPhase::Processing { progress } => View::Processing {
            label: progress.clone(),
        },
        WorkflowPhase::Result(result) => View::Result(ResultView {
            duration: format_duration(result.duration),
            language: result.language.to_uppercase(),
            segments: result.segments.len(),
            text: result.text.clone(),
            downloads: vec![
                DownloadLink {
                    label: "Document",
                    url: links.url(&result.artifacts.document),
                },
                DownloadLink {
                    label: "Subtitles (SRT)",
                    url: links.url(&result.artifacts.subtitles),
                },
                DownloadLink {
                    label: "JSON",
                    url: links.url(&result.artifacts.json),
                },
            ],
        }),
        WorkflowPhase::Error { message } => View::Error {
            message: message.clone(),
        },
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Upload(upload) => {
                writeln!(f, "── Upload ──")?;
                match &upload.file {
                    Some(card) => {
                        writeln!(f, "[{}] {} ({})", card.kind.label(), card.name, card.size)?;
                        write!(f, "`submit` to transcribe, `remove` to pick another file")
                    }
                    None => write!(f, "No file selected. `select <path>` to choose a video or audio file"),
                }
            }
            View::Processing { label } => write!(f, "── Processing ──\n{label}"),
            View::Result(result) => {
                writeln!(f, "── Result ──")?;
                writeln!(
                    f,
                    "Duration {}  Language {}  Segments {}",
                    result.duration, result.language, result.segments
                )?;
                writeln!(f)?;
                writeln!(f, "{}", result.text.trim())?;
                writeln!(f)?;
                for link in &result.downloads {
                    writeln!(f, "{:<16} {}", link.label, link.url)?;
                }
                write!(f, "`new` to start another transcription")
            }
            View::Error { message } => {
                write!(f, "── Error ──\n{message}\n`retry` to go back, `new` to start over")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
