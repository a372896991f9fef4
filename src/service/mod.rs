//! Transcription service collaborator.
//!
//! * [`TranscriptionService`] — async trait the orchestrator talks to.
//! * [`HttpTranscriptionService`] — `reqwest` implementation.
//! * [`ServiceReply`] / [`TranscriptionResult`] — response and result types.
//! * [`LanguageCatalog`] / [`LanguageSelector`] / [`load_languages`] — the
//!   language list fetched once at startup.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use media_transcriber::config::AppConfig;
//! use media_transcriber::service::{load_languages, HttpTranscriptionService, LanguageSelector};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let service = HttpTranscriptionService::from_config(&config.service);
//!
//!     let mut languages = LanguageSelector::new();
//!     load_languages(&service, &mut languages).await;
//!     for lang in languages.options() {
//!         println!("{} — {}", lang.code, lang.name);
//!     }
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod types;

pub use catalog::{
    load_languages, Language, LanguageCatalog, LanguageSelector, UnknownLanguage, AUTO_LANGUAGE,
};
pub use client::{DownloadLinks, HttpTranscriptionService, ServiceError, TranscriptionService};
pub use types::{
    Artifacts, Segment, ServiceReply, Task, TranscribeResponse, TranscriptionOptions,
    TranscriptionRequest, TranscriptionResult,
};
