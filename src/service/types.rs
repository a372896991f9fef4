//! Request, reply and result types exchanged with the transcription service.
//!
//! [`TranscriptionRequest`] is what the orchestrator hands to a
//! [`TranscriptionService`](super::TranscriptionService).  [`ServiceReply`]
//! is the raw, loosely-typed answer; the orchestrator decides whether it is a
//! success and, if so, converts it into a [`TranscriptionResult`].

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::CandidateFile;

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// What the service should do with the speech.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Keep the source language.
    #[default]
    Transcribe,
    /// Translate into English.
    Translate,
}

impl Task {
    /// Wire value of the `task` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Transcribe => "transcribe",
            Task::Translate => "translate",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transcribe" => Ok(Task::Transcribe),
            "translate" => Ok(Task::Translate),
            other => Err(format!("unknown task {other:?} (expected transcribe or translate)")),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionOptions
// ---------------------------------------------------------------------------

/// User-chosen parameters, read fresh from the selectors at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionOptions {
    /// Catalog language code, `"auto"` for detection.
    pub language: String,
    pub task: Task,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            task: Task::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionRequest
// ---------------------------------------------------------------------------

/// Everything that goes into the multipart `POST /transcribe` body.
///
/// The media is held as an open file and streamed into the upload, so a
/// large video is never buffered in memory.
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub file_name: String,
    /// Declared media type of the file part; empty means "let the client pick".
    pub media_type: String,
    pub media: tokio::fs::File,
    /// Byte length of `media` when it was opened.
    pub length: u64,
    pub language: String,
    pub task: Task,
}

impl TranscriptionRequest {
    /// Open the selected file for upload.
    ///
    /// Fails if the file can no longer be opened or stat'ed, before anything
    /// is sent.
    pub async fn open(file: &CandidateFile, options: &TranscriptionOptions) -> io::Result<Self> {
        let media = tokio::fs::File::open(file.path()).await?;
        let length = media.metadata().await?.len();

        Ok(Self {
            file_name: file.name().to_string(),
            media_type: file.media_type().to_string(),
            media,
            length,
            language: options.language.clone(),
            task: options.task,
        })
    }
}

// ---------------------------------------------------------------------------
// ServiceReply
// ---------------------------------------------------------------------------

/// JSON body of a `/transcribe` response.
///
/// Every field is kept as raw JSON and read leniently: error bodies from the
/// service often omit `success`, send it as `null`, or carry a non-string
/// `error`.  Any JSON value is a usable body; only text that is not JSON at
/// all is a decode failure.  Absent and `null` fields are both `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscribeResponse {
    pub success: Option<Value>,
    pub error: Option<Value>,
    pub transcription: Option<Value>,
    pub files: Option<Value>,
}

impl TranscribeResponse {
    /// `true` only for a literal `"success": true`.
    pub fn succeeded(&self) -> bool {
        matches!(self.success, Some(Value::Bool(true)))
    }

    /// The `error` field when it is a string.
    pub fn error_text(&self) -> Option<&str> {
        self.error.as_ref().and_then(Value::as_str)
    }
}

impl From<Value> for TranscribeResponse {
    fn from(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());

        Self {
            success: take("success"),
            error: take("error"),
            transcription: take("transcription"),
            files: take("files"),
        }
    }
}

/// HTTP status plus decoded body of a `/transcribe` call.
#[derive(Debug, Clone)]
pub struct ServiceReply {
    pub status: u16,
    pub body: TranscribeResponse,
}

impl ServiceReply {
    /// Build a reply from a status code and a JSON value.
    ///
    /// ```
    /// use media_transcriber::service::ServiceReply;
    ///
    /// let reply = ServiceReply::from_json(400, serde_json::json!({ "error": "No file provided" }));
    /// assert!(!reply.body.succeeded());
    /// assert!(!reply.is_success());
    /// assert_eq!(reply.error_message(), Some("No file provided"));
    /// ```
    pub fn from_json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: TranscribeResponse::from(body),
        }
    }

    /// Both the HTTP status and the `success` flag must agree.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.body.succeeded()
    }

    /// The server-supplied error message, if it is a non-empty string.
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .error_text()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

// ---------------------------------------------------------------------------
// TranscriptionResult
// ---------------------------------------------------------------------------

/// Identifiers of the three generated downloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifacts {
    /// Plain-text report.
    pub document: String,
    /// SRT subtitles.
    pub subtitles: String,
    /// Structured JSON data.
    pub json: String,
}

/// A time-aligned chunk of the transcript.  Fields the service leaves out
/// default to zero / empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    fn from_value(value: &Value) -> Self {
        Self {
            start: value.get("start").and_then(Value::as_f64).unwrap_or(0.0),
            end: value.get("end").and_then(Value::as_f64).unwrap_or(0.0),
            text: value
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionBody {
    duration: f64,
    language: String,
    text: String,
    #[serde(default)]
    segments: Vec<Value>,
}

/// A successful transcription as shown in the Result phase.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Seconds of transcribed media.
    pub duration: f64,
    /// Detected or requested language code.
    pub language: String,
    pub text: String,
    pub segments: Vec<Segment>,
    pub artifacts: Artifacts,
}

impl TranscriptionResult {
    /// Convert the `transcription` and `files` sections of a success body.
    ///
    /// Every segment entry is kept (and counted) even when its fields are
    /// missing.  A negative duration is treated as malformed.
    pub fn from_parts(transcription: &Value, files: &Value) -> Result<Self, serde_json::Error> {
        let body = TranscriptionBody::deserialize(transcription)?;
        let artifacts = Artifacts::deserialize(files)?;

        if body.duration < 0.0 {
            return Err(serde::de::Error::custom("negative duration"));
        }

        Ok(Self {
            duration: body.duration,
            language: body.language,
            text: body.text,
            segments: body.segments.iter().map(Segment::from_value).collect(),
            artifacts,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_parses_and_prints_wire_values() {
        assert_eq!("Translate".parse::<Task>(), Ok(Task::Translate));
        assert_eq!(Task::Transcribe.to_string(), "transcribe");
        assert!("summarise".parse::<Task>().is_err());
    }

    #[tokio::test]
    async fn request_opens_file_and_copies_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.mp4");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let file = CandidateFile::new("talk.mp4", 3, "video/mp4", &path);
        let options = TranscriptionOptions {
            language: "fr".into(),
            task: Task::Translate,
        };

        let req = TranscriptionRequest::open(&file, &options).await.unwrap();

        assert_eq!(req.file_name, "talk.mp4");
        assert_eq!(req.media_type, "video/mp4");
        assert_eq!(req.length, 3);
        assert_eq!(req.language, "fr");
        assert_eq!(req.task, Task::Translate);
    }

    #[tokio::test]
    async fn request_for_vanished_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let file = CandidateFile::new("gone.wav", 1, "audio/wav", dir.path().join("gone.wav"));

        let err = TranscriptionRequest::open(&file, &TranscriptionOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn success_requires_status_and_flag() {
        let ok = ServiceReply::from_json(200, json!({ "success": true }));
        let flag_false = ServiceReply::from_json(200, json!({ "success": false }));
        let flag_string = ServiceReply::from_json(200, json!({ "success": "true" }));
        let bad_status = ServiceReply::from_json(500, json!({ "success": true }));

        assert!(ok.is_success());
        assert!(!flag_false.is_success());
        assert!(!flag_string.is_success());
        assert!(!bad_status.is_success());
    }

    #[test]
    fn blank_error_message_is_ignored() {
        let reply = ServiceReply::from_json(500, json!({ "error": "  " }));
        assert_eq!(reply.error_message(), None);

        let reply = ServiceReply::from_json(500, json!({ "error": "bad audio" }));
        assert_eq!(reply.error_message(), Some("bad audio"));
    }

    #[test]
    fn null_success_keeps_server_message() {
        let reply = ServiceReply::from_json(500, json!({ "success": null, "error": "boom" }));

        assert_eq!(reply.body.success, None);
        assert!(!reply.is_success());
        assert_eq!(reply.error_message(), Some("boom"));
    }

    #[test]
    fn structured_error_has_no_message() {
        let reply = ServiceReply::from_json(400, json!({ "error": { "code": 7 } }));

        assert!(!reply.is_success());
        assert_eq!(reply.error_message(), None);
        assert_eq!(reply.body.error, Some(json!({ "code": 7 })));
    }

    #[test]
    fn non_object_body_is_an_empty_failure() {
        let reply = ServiceReply::from_json(200, json!(["unexpected"]));

        assert_eq!(reply.body, TranscribeResponse::default());
        assert!(!reply.is_success());
    }

    #[test]
    fn result_from_well_formed_parts() {
        let transcription = json!({
            "duration": 12.5,
            "language": "en",
            "text": " hello there",
            "segments": [
                { "start": 0.0, "end": 4.2, "text": " hello " },
                { "start": 4.2, "end": 12.5, "text": "there" }
            ]
        });
        let files = json!({
            "document": "1_transcription.txt",
            "subtitles": "1_subtitles.srt",
            "json": "1_data.json"
        });

        let result = TranscriptionResult::from_parts(&transcription, &files).unwrap();

        assert_eq!(result.duration, 12.5);
        assert_eq!(result.language, "en");
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "hello");
        assert_eq!(result.segments[1].end, 12.5);
        assert_eq!(result.artifacts.subtitles, "1_subtitles.srt");
    }

    #[test]
    fn opaque_segments_are_still_counted() {
        let transcription = json!({
            "duration": 1, "language": "de", "text": "", "segments": ["a", 3, {}]
        });
        let files = json!({ "document": "d", "subtitles": "s", "json": "j" });

        let result = TranscriptionResult::from_parts(&transcription, &files).unwrap();

        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[0], Segment::default());
    }

    #[test]
    fn missing_fields_are_malformed() {
        let files = json!({ "document": "d", "subtitles": "s", "json": "j" });
        assert!(TranscriptionResult::from_parts(&json!({ "text": "x" }), &files).is_err());

        let transcription = json!({ "duration": 1, "language": "en", "text": "x" });
        assert!(TranscriptionResult::from_parts(&transcription, &json!({ "document": "d" })).is_err());
    }

    #[test]
    fn negative_duration_is_malformed() {
        let transcription = json!({ "duration": -1, "language": "en", "text": "x" });
        let files = json!({ "document": "d", "subtitles": "s", "json": "j" });
        assert!(TranscriptionResult::from_parts(&transcription, &files).is_err());
    }
}
