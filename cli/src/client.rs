//! HTTP client for the extraction service.
//!
//! Sends one multipart `POST` per submission (`file` + `doc_type`) and hands
//! the response to the core adapter. No retries: a failure is returned as-is
//! and the session decides what the user sees.

use std::path::Path;

use intelli_extract_core::config::{ACCEPT_JSON, DOC_TYPE_FIELD, FILE_FIELD};
use intelli_extract_core::{check_status, parse_response, ExtractError, ExtractResult, ResultSet, SchemaProfile, StagedFile};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};

/// Client bound to one endpoint and one schema profile.
#[derive(Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    endpoint: String,
    profile: SchemaProfile,
}

impl ExtractionClient {
    /// Create a client. The endpoint is the full URL to `POST` to.
    pub fn new(endpoint: impl Into<String>, profile: SchemaProfile) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            profile,
        }
    }

    /// Use an existing `reqwest` client (shared connection pool, custom TLS).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn profile(&self) -> &SchemaProfile {
        &self.profile
    }

    /// Upload a file for a category and normalize the response.
    pub async fn submit(&self, file: &StagedFile, category_id: &str) -> ExtractResult<ResultSet> {
        if self.endpoint.is_empty() {
            return Err(ExtractError::MissingEndpoint);
        }

        let part = Part::bytes(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ExtractError::Transport(format!("Invalid MIME type: {}", e)))?;

        let form = Form::new()
            .part(FILE_FIELD, part)
            .text(DOC_TYPE_FIELD, category_id.to_string());

        log::info!(
            "📤 Uploading {} ({} bytes) as '{}' to {}",
            file.filename,
            file.len(),
            category_id,
            self.endpoint
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, ACCEPT_JSON)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        let status = response.status();
        log::debug!("Response status: {}", status);
        check_status(status.as_u16(), status.canonical_reason().unwrap_or("Unknown Status"))?;

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Transport(e.to_string()))?;

        log::debug!("Received {} bytes", body.len());
        parse_response(&body, &self.profile)
    }
}

/// Read a file from disk into a [`StagedFile`].
pub fn load_staged_file(path: &Path) -> std::io::Result<StagedFile> {
    let content = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    Ok(StagedFile::new(filename, mime_for_path(path), content))
}

/// MIME type from the file extension. Unknown extensions are sent as
/// `application/octet-stream`; content is never inspected.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("scan.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("scan")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("scan.pdf")), "application/octet-stream");
    }

    #[test]
    fn test_load_staged_file() {
        let mut tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        tmp.write_all(b"\x89PNG fake").unwrap();

        let staged = load_staged_file(tmp.path()).unwrap();
        assert_eq!(staged.mime_type, "image/png");
        assert_eq!(staged.content, b"\x89PNG fake".to_vec());
        assert!(staged.filename.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_empty_endpoint_is_config_error() {
        let client = ExtractionClient::new("", SchemaProfile::auto());
        let file = StagedFile::new("a.png", "image/png", vec![1, 2, 3]);
        let err = client.submit(&file, "passport").await.unwrap_err();
        assert_eq!(err, ExtractError::MissingEndpoint);
    }
}
