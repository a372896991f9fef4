//! Selection state — at most one accepted file plus its display metadata.

use super::file::{CandidateFile, MediaKind};

/// The currently selected file and the classification derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file: CandidateFile,
    pub kind: MediaKind,
}

/// Holds zero or one [`SelectedFile`].
///
/// The selection is only ever replaced or cleared as a whole.  Callers must
/// run [`validate`](super::validate) before [`select`](Self::select).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing selection with `file`.
    pub fn select(&mut self, file: CandidateFile) {
        let kind = file.kind();
        self.current = Some(SelectedFile { file, kind });
    }

    /// Drop the selection.  Idempotent.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.current.as_ref().map(|s| &s.file)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert!(Selection::new().is_empty());
    }

    #[test]
    fn select_holds_exactly_that_file() {
        let mut sel = Selection::new();
        let clip = CandidateFile::new("clip.webm", 42, "video/webm", "/tmp/clip.webm");

        sel.select(clip.clone());

        let held = sel.get().unwrap();
        assert_eq!(held.file, clip);
        assert_eq!(held.kind, MediaKind::Video);
    }

    #[test]
    fn second_select_fully_replaces_first() {
        let mut sel = Selection::new();
        sel.select(CandidateFile::new("clip.webm", 42, "video/webm", "/tmp/clip.webm"));
        let memo = CandidateFile::new("memo.wav", 7, "", "/tmp/memo.wav");

        sel.select(memo.clone());

        let held = sel.get().unwrap();
        assert_eq!(held.file, memo);
        assert_eq!(held.kind, MediaKind::Audio);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut sel = Selection::new();
        sel.select(CandidateFile::new("a.mp3", 1, "", "a.mp3"));

        sel.clear();
        assert!(sel.is_empty());
        sel.clear();
        assert!(sel.is_empty());
        assert!(sel.file().is_none());
    }
}
