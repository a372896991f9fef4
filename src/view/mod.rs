//! Presentation — formatting helpers and the phase → view rendering step.

pub mod format;
pub mod render;

pub use format::{format_duration, format_file_size};
pub use render::{render, DownloadLink, FileCard, ResultView, UploadView, View};
