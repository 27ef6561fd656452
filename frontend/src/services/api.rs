//! HTTP client for the conversion service.
//!
//! Endpoint paths are built by small pure functions so they can be tested
//! natively; the async calls go through `gloo-net`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, HealthResponse, StatusResponse, TaskList, UploadResponse};

/// Kind of artifact offered for download by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Markdown,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Markdown => "markdown",
        }
    }
}

pub fn upload_url(base: &str) -> String {
    format!("{}/api/upload", base)
}

pub fn status_url(base: &str, task_id: &str) -> String {
    format!("{}/api/status/{}", base, task_id)
}

pub fn download_url(base: &str, task_id: &str, kind: ArtifactKind) -> String {
    format!("{}/api/download/{}/{}", base, task_id, kind.as_str())
}

pub fn health_url(base: &str) -> String {
    format!("{}/api/health", base)
}

pub fn tasks_url(base: &str) -> String {
    format!("{}/api/tasks", base)
}

/// Pull the `detail` field out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Turn a non-2xx response into [`AppError::Http`].
async fn ensure_ok(response: Response) -> AppResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(AppError::Http {
        status,
        detail: error_detail(&body),
    })
}

async fn get_json<T: DeserializeOwned>(url: &str) -> AppResult<T> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    ensure_ok(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Upload a PDF as the multipart field `file`.
pub async fn upload_pdf(file: &File, base: &str) -> AppResult<UploadResponse> {
    let form_data =
        FormData::new().map_err(|e| AppError::Upload(format!("Failed to create FormData: {:?}", e)))?;
    form_data
        .append_with_blob("file", file)
        .map_err(|e| AppError::Upload(format!("Failed to append file: {:?}", e)))?;

    let request = Request::post(&upload_url(base))
        .body(form_data)
        .map_err(|e| AppError::Upload(format!("Failed to build request: {}", e)))?;
    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    ensure_ok(response)
        .await?
        .json::<UploadResponse>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Fetch the current status of a task.
pub async fn fetch_status(base: &str, task_id: &str) -> AppResult<StatusResponse> {
    get_json(&status_url(base, task_id)).await
}

/// Download the generated Markdown as text.
pub async fn fetch_markdown(base: &str, task_id: &str) -> AppResult<String> {
    let response = Request::get(&download_url(base, task_id, ArtifactKind::Markdown))
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    ensure_ok(response)
        .await?
        .text()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Probe `/api/health`.
pub async fn check_health(base: &str) -> AppResult<HealthResponse> {
    get_json(&health_url(base)).await
}

/// List every task known to the server.
pub async fn list_tasks(base: &str) -> AppResult<TaskList> {
    get_json(&tasks_url(base)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(upload_url(""), "/api/upload");
        assert_eq!(status_url("", "abc123"), "/api/status/abc123");
        assert_eq!(health_url(""), "/api/health");
        assert_eq!(tasks_url(""), "/api/tasks");
    }

    #[test]
    fn test_download_url_uses_markdown_kind() {
        assert_eq!(
            download_url("", "abc123", ArtifactKind::Markdown),
            "/api/download/abc123/markdown"
        );
        assert_eq!(
            download_url("http://localhost:8000", "t1", ArtifactKind::Markdown),
            "http://localhost:8000/api/download/t1/markdown"
        );
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "只支持PDF文件"}"#), "只支持PDF文件");
        assert_eq!(error_detail("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(error_detail(r#"{"error": 1}"#), r#"{"error": 1}"#);
    }
}
