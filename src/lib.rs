//! Client-side workflow controller for a remote media transcription service.
//!
//! A user picks a video or audio file, chooses a language and task, submits
//! it, and sees either the transcript (with download links for the generated
//! document, subtitles and JSON) or a single error message.
//!
//! * [`input`]    — candidate files, validation, selection.
//! * [`workflow`] — phase state machine and request orchestrator.
//! * [`service`]  — transcription service contract, HTTP client, languages.
//! * [`view`]     — formatting and phase → view rendering.
//! * [`app`]      — interactive session mapping user actions to transitions.
//! * [`config`]   — settings for the host binary.

pub mod app;
pub mod config;
pub mod input;
pub mod service;
pub mod view;
pub mod workflow;
