//! Input handling — candidate files, validation and the selection holder.
//!
//! # Flow
//!
//! ```text
//! path ──CandidateFile::from_path──▶ CandidateFile
//!                                        │
//!                                   validate()
//!                                   ├─ Rejected(reason) ──▶ Error phase
//!                                   └─ Accepted(file)   ──▶ Selection::select
//! ```

pub mod file;
pub mod selection;
pub mod validate;

pub use file::{media_type_for, CandidateFile, MediaKind, VIDEO_EXTENSIONS};
pub use selection::{SelectedFile, Selection};
pub use validate::{validate, Rejection, Verdict, ALLOWED_EXTENSIONS, MAX_FILE_SIZE_BYTES};
