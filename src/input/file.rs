//! Candidate files and media classification.
//!
//! A [`CandidateFile`] describes a local file the user picked.  It is never
//! mutated once built; a new choice replaces it wholesale.

use std::path::{Path, PathBuf};

/// Extensions classified as video regardless of the declared media type.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Extension → declared media type, used when the file comes from disk and
/// no type was supplied by the picker.
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("avi", "video/avi"),
    ("mov", "video/quicktime"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/x-m4a"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
];

// ---------------------------------------------------------------------------
// MediaKind
// ---------------------------------------------------------------------------

/// Display classification of a selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Classify from the declared media type, falling back to the extension.
    ///
    /// ```
    /// use media_transcriber::input::MediaKind;
    ///
    /// assert_eq!(MediaKind::classify("video/webm", "webm"), MediaKind::Video);
    /// assert_eq!(MediaKind::classify("", "mkv"), MediaKind::Video);
    /// assert_eq!(MediaKind::classify("audio/mpeg", "mp3"), MediaKind::Audio);
    /// ```
    pub fn classify(media_type: &str, extension: &str) -> Self {
        if media_type.starts_with("video") || VIDEO_EXTENSIONS.contains(&extension) {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

// ---------------------------------------------------------------------------
// CandidateFile
// ---------------------------------------------------------------------------

/// A user-chosen local file awaiting validation and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    size: u64,
    media_type: String,
    path: PathBuf,
}

impl CandidateFile {
    /// Build a candidate from already-known attributes.
    ///
    /// `media_type` may be empty; it is only a hint.
    pub fn new(
        name: impl Into<String>,
        size: u64,
        media_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            path: path.into(),
        }
    }

    /// Stat a file on disk and derive its candidate attributes.
    ///
    /// The declared media type is guessed from the extension; unknown
    /// extensions get an empty type.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = media_type_for(&extension_of(&name)).unwrap_or_default();

        Ok(Self::new(name, metadata.len(), media_type, path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Declared media type; may be empty.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lower-cased suffix after the last `.` of the name, or `""` when the
    /// name has no dot.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::classify(&self.media_type, &self.extension())
    }
}

fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Look up the declared media type for a lower-cased extension.
pub fn media_type_for(extension: &str) -> Option<String> {
    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| (*mime).to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, media_type: &str) -> CandidateFile {
        CandidateFile::new(name, 10, media_type, name)
    }

    #[test]
    fn extension_is_lowercased_suffix_after_last_dot() {
        assert_eq!(candidate("Holiday.Clip.MP4", "").extension(), "mp4");
        assert_eq!(candidate("track.flac", "").extension(), "flac");
    }

    #[test]
    fn name_without_dot_has_no_extension() {
        assert_eq!(candidate("mp4", "").extension(), "");
        assert_eq!(candidate("trailing.", "").extension(), "");
    }

    #[test]
    fn declared_video_type_wins_over_audio_extension() {
        assert_eq!(candidate("clip.ogg", "video/ogg").kind(), MediaKind::Video);
    }

    #[test]
    fn missing_type_falls_back_to_extension() {
        assert_eq!(candidate("clip.mov", "").kind(), MediaKind::Video);
        assert_eq!(candidate("memo.m4a", "").kind(), MediaKind::Audio);
    }

    #[test]
    fn ambiguous_type_with_video_extension_is_video() {
        // Browsers sometimes report mp4 containers as audio/mp4.
        assert_eq!(candidate("talk.mp4", "audio/mp4").kind(), MediaKind::Video);
    }

    #[test]
    fn media_type_table_lookup() {
        assert_eq!(media_type_for("mov").as_deref(), Some("video/quicktime"));
        assert_eq!(media_type_for("mp3").as_deref(), Some("audio/mpeg"));
        assert_eq!(media_type_for("txt"), None);
    }

    #[tokio::test]
    async fn from_path_reads_name_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Interview.WAV");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();

        assert_eq!(file.name(), "Interview.WAV");
        assert_eq!(file.size(), 2048);
        assert_eq!(file.media_type(), "audio/wav");
        assert_eq!(file.kind(), MediaKind::Audio);
        assert_eq!(file.path(), path.as_path());
    }

    #[tokio::test]
    async fn from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CandidateFile::from_path(dir.path().join("gone.mp3"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CandidateFile::from_path(dir.path()).await.is_err());
    }
}
