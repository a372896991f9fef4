//! Input validation — table-driven accept/reject of candidate files.
//!
//! Only the extension and the byte size are inspected.  No codec sniffing or
//! magic-byte check is done, so an accepted file may still be refused by the
//! transcription service.

use thiserror::Error;

use super::file::CandidateFile;

/// Extensions the service accepts (lower-case, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "webm", "mp3", "wav", "m4a", "ogg", "flac",
];

/// 500 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 500 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// Why a candidate file was refused.  `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid file type. Please upload a video or audio file.")]
    UnsupportedType { extension: String },

    #[error("File size too large. Maximum size is 500MB.")]
    TooLarge { size: u64 },
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(CandidateFile),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

/// Classify `file`.  Rules run in order and the first failure wins:
/// extension first, then size.
///
/// ```
/// use media_transcriber::input::{validate, CandidateFile, Rejection, Verdict};
///
/// let notes = CandidateFile::new("notes.txt", 12, "text/plain", "notes.txt");
/// assert!(matches!(validate(notes), Verdict::Rejected(Rejection::UnsupportedType { .. })));
///
/// let song = CandidateFile::new("song.MP3", 4_000_000, "audio/mpeg", "song.MP3");
/// assert!(validate(song).is_accepted());
/// ```
pub fn validate(file: CandidateFile) -> Verdict {
    let extension = file.extension();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Verdict::Rejected(Rejection::UnsupportedType { extension });
    }

    if file.size() > MAX_FILE_SIZE_BYTES {
        return Verdict::Rejected(Rejection::TooLarge { size: file.size() });
    }

    Verdict::Accepted(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, size, "", name)
    }

    #[test]
    fn every_allowed_extension_is_accepted() {
        for ext in ALLOWED_EXTENSIONS {
            let verdict = validate(file(&format!("media.{ext}"), 1024));
            assert!(verdict.is_accepted(), "{ext} should be accepted");
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(validate(file("CLIP.MkV", 1)).is_accepted());
    }

    #[test]
    fn unsupported_extension_rejected_regardless_of_size() {
        for size in [0, 1, MAX_FILE_SIZE_BYTES, MAX_FILE_SIZE_BYTES + 1] {
            assert_eq!(
                validate(file("slides.pdf", size)),
                Verdict::Rejected(Rejection::UnsupportedType {
                    extension: "pdf".into()
                })
            );
        }
    }

    #[test]
    fn name_without_extension_is_rejected() {
        assert!(!validate(file("README", 10)).is_accepted());
        assert!(!validate(file("wav", 10)).is_accepted());
    }

    #[test]
    fn size_at_limit_is_accepted() {
        assert!(validate(file("long.mp4", MAX_FILE_SIZE_BYTES)).is_accepted());
    }

    #[test]
    fn size_over_limit_rejected_for_allowed_extension() {
        let verdict = validate(file("long.mp4", MAX_FILE_SIZE_BYTES + 1));
        assert_eq!(
            verdict,
            Verdict::Rejected(Rejection::TooLarge {
                size: MAX_FILE_SIZE_BYTES + 1
            })
        );
    }

    #[test]
    fn type_failure_wins_over_size_failure() {
        let verdict = validate(file("huge.iso", u64::MAX));
        assert!(matches!(
            verdict,
            Verdict::Rejected(Rejection::UnsupportedType { .. })
        ));
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            Rejection::UnsupportedType {
                extension: "txt".into()
            }
            .to_string(),
            "Invalid file type. Please upload a video or audio file."
        );
        assert_eq!(
            Rejection::TooLarge { size: 1 }.to_string(),
            "File size too large. Maximum size is 500MB."
        );
    }
}
