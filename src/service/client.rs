//! The transcription service contract and its HTTP implementation.
//!
//! [`HttpTranscriptionService`] talks to the service over plain HTTP:
//!
//! | Route                      | Use                                  |
//! |----------------------------|--------------------------------------|
//! | `GET /supported-languages` | language catalog                     |
//! | `POST /transcribe`         | multipart `file`, `language`, `task` |
//! | `GET /download/{id}`       | link target only, never fetched here |
//!
//! The media file is streamed from disk into the `file` part.  No request
//! timeout is configured: a stuck request stays pending until the server
//! answers or the connection drops.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::config::ServiceConfig;

use super::catalog::LanguageCatalog;
use super::types::{ServiceReply, TranscriptionRequest};

// ---------------------------------------------------------------------------
// ServiceError
// ---------------------------------------------------------------------------

/// Transport-level failures: no usable response could be obtained.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Connection, DNS or I/O failure.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The response body was not JSON at all.
    #[error("failed to decode service response: {0}")]
    Decode(String),

    /// Non-success status on a route that carries no error body.
    #[error("service answered with HTTP {0}")]
    Status(u16),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionService trait
// ---------------------------------------------------------------------------

/// Remote collaborator that performs the actual transcription.
///
/// A returned [`ServiceReply`] means the service answered, whatever it said;
/// `Err` means no answer could be obtained at all.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    async fn supported_languages(&self) -> Result<LanguageCatalog, ServiceError>;

    async fn transcribe(&self, request: TranscriptionRequest) -> Result<ServiceReply, ServiceError>;
}

// ---------------------------------------------------------------------------
// DownloadLinks
// ---------------------------------------------------------------------------

/// Builds `/download/{id}` URLs for artifact identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinks {
    base_url: String,
}

impl DownloadLinks {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// ```
    /// use media_transcriber::service::DownloadLinks;
    ///
    /// let links = DownloadLinks::new("http://localhost:5001/");
    /// assert_eq!(links.url("a.srt"), "http://localhost:5001/download/a.srt");
    /// ```
    pub fn url(&self, artifact_id: &str) -> String {
        format!("{}/download/{}", self.base_url, artifact_id)
    }
}

// ---------------------------------------------------------------------------
// HttpTranscriptionService
// ---------------------------------------------------------------------------

/// [`TranscriptionService`] over HTTP via `reqwest`.
pub struct HttpTranscriptionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranscriptionService {
    /// Build a client for the service at `config.base_url`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn links(&self) -> DownloadLinks {
        DownloadLinks::new(&self.base_url)
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    fn build_form(request: TranscriptionRequest) -> Result<Form, ServiceError> {
        let mut part =
            Part::stream_with_length(request.media, request.length).file_name(request.file_name);
        if !request.media_type.is_empty() {
            part = part.mime_str(&request.media_type)?;
        }

        Ok(Form::new()
            .part("file", part)
            .text("language", request.language)
            .text("task", request.task.as_str()))
    }
}

#[async_trait]
impl TranscriptionService for HttpTranscriptionService {
    async fn supported_languages(&self) -> Result<LanguageCatalog, ServiceError> {
        let response = self
            .client
            .get(self.endpoint("supported-languages"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn transcribe(&self, request: TranscriptionRequest) -> Result<ServiceReply, ServiceError> {
        log::debug!(
            "POST /transcribe file={} ({} bytes) language={} task={}",
            request.file_name,
            request.length,
            request.language,
            request.task
        );

        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(self.endpoint("transcribe"))
            .multipart(form)
            .send()
            .await?;

        // Any JSON answer is a reply, whatever its shape or status.
        let status = response.status().as_u16();
        let body = response.text().await?;
        let body = serde_json::from_str(&body).map_err(|e| {
            log::warn!("unparseable /transcribe response (HTTP {status}): {e}");
            ServiceError::Decode(e.to_string())
        })?;

        Ok(ServiceReply::from_json(status, body))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
