//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **File Types** - Metadata of the selected PDF
//! - **Log Types** - Server log lines shown in the log panel
//! - **API Types** - Backend response structures
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{format_file_size, is_pdf_name};

// =============================================================================
// File Types
// =============================================================================

/// Name and size of the file picked for conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct FileMeta {
    /// File name as reported by the browser
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl FileMeta {
    /// Validate a picked or dropped file. Only the name is checked.
    pub fn from_selection(name: String, size: f64) -> AppResult<Self> {
        if !is_pdf_name(&name) {
            return Err(AppError::Validation("请选择PDF文件！".to_string()));
        }
        Ok(Self {
            name,
            size: size.max(0.0) as u64,
        })
    }

    /// Size formatted for display (`500 B`, `2.00 KB`, ...).
    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level, inferred from the marker glyphs the converter
/// writes at the start of each line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Error message
    Error,
}

impl LogLevel {
    /// Classify a raw server line such as `[10:20:30] ✓ PDF转换完成`.
    pub fn classify(line: &str) -> Self {
        let body = match line.strip_prefix('[') {
            Some(rest) => rest.split_once(']').map(|(_, msg)| msg).unwrap_or(rest),
            None => line,
        };
        let body = body.trim_start();
        if body.starts_with('✗') || body.starts_with('❌') {
            LogLevel::Error
        } else if body.starts_with('✓') || body.starts_with('🎉') || body.starts_with('✅') {
            LogLevel::Success
        } else {
            LogLevel::Info
        }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single line of the conversion log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// Line as sent by the server (already timestamped)
    pub message: String,
}

impl LogEntry {
    pub fn from_server(line: impl Into<String>) -> Self {
        let message = line.into();
        Self {
            level: LogLevel::classify(&message),
            message,
        }
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Task status reported by `/api/status/{task_id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Accepted, not yet picked up by a worker
    Queued,
    Pending,
    Processing,
    Completed,
    Failed,
    /// Anything the client does not know about; treated as still running.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether polling stops on this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }

    /// Label for the task list.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Queued => "排队中",
            TaskStatus::Pending => "等待中",
            TaskStatus::Processing => "处理中",
            TaskStatus::Completed => "已完成",
            TaskStatus::Failed => "失败",
            TaskStatus::Unknown => "未知",
        }
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "status-completed",
            TaskStatus::Failed => "status-failed",
            _ => "status-running",
        }
    }
}

/// Response from the backend upload endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Identifier used by every later request
    pub task_id: String,
    /// Human readable acknowledgement
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the task status endpoint.
///
/// The server omits or nulls fields freely, so everything but `status`
/// is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub result: Option<TaskResult>,
    /// Raw error of a failed task; `message` usually already embeds it.
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Progress in percent, `0` when missing.
    pub fn progress(&self) -> i64 {
        self.progress.unwrap_or(0)
    }

    /// Status message, empty when missing.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Message to show for a failed task: `message`, else `error`.
    pub fn failure_message(&self) -> &str {
        match self.message() {
            "" => self.error.as_deref().unwrap_or_default(),
            msg => msg,
        }
    }

    /// Log lines carried by this response, empty when missing.
    pub fn logs(&self) -> &[String] {
        self.logs.as_deref().unwrap_or_default()
    }
}

/// Metadata attached to a completed task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub summary: Summary,
    /// Source document name without extension
    #[serde(default)]
    pub pdf_name: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
}

/// Conversion statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_pages: u64,
    pub successful_pages: u64,
    pub total_characters: u64,
    /// Already formatted by the server (e.g. `90.0%`)
    pub success_rate: String,
}

/// Response from `/api/health`. Only used for display.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tasks_count: Option<u64>,
}

impl HealthResponse {
    /// Short badge text, e.g. `healthy · v1.0.0 · 3 个任务`.
    pub fn badge(&self) -> String {
        let mut badge = self.status.as_deref().unwrap_or("online").to_string();
        if let Some(version) = self.version.as_deref() {
            badge.push_str(&format!(" · v{}", version));
        }
        if let Some(count) = self.tasks_count {
            badge.push_str(&format!(" · {} 个任务", count));
        }
        badge
    }
}

/// One entry of `/api/tasks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response from `/api/tasks`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskList {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub total: usize,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AppError {
    /// The selected file cannot be converted.
    #[error("{0}")]
    Validation(String),

    /// File upload failed.
    #[error("{0}")]
    Upload(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// Response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserialization() {
        let json = r#"{
            "task_id": "abc123",
            "filename": "paper.pdf",
            "status": "processing",
            "progress": 42,
            "message": "正在识别第 3/10 页...",
            "created_at": "2024-05-01T10:20:30.123456",
            "logs": ["[10:20:31] ✓ 任务开始处理", "[10:20:32] 📄 开始转换PDF为图片..."]
        }"#;

        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, TaskStatus::Processing);
        assert_eq!(status.progress(), 42);
        assert_eq!(status.logs().len(), 2);
        assert!(status.result.is_none());
    }

    #[test]
    fn test_completed_status_carries_summary() {
        let json = r#"{
            "status": "completed",
            "progress": 100,
            "message": "处理完成！",
            "logs": [],
            "result": {
                "task_id": "abc123",
                "pdf_name": "paper",
                "processed_at": "2024-05-01T10:22:00",
                "summary": {
                    "total_pages": 10,
                    "successful_pages": 9,
                    "failed_pages": 1,
                    "total_characters": 123456,
                    "success_rate": "90%"
                },
                "files": {"markdown": "abc123/document.md"}
            }
        }"#;

        let status: StatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.status, TaskStatus::Completed);
        let result = status.result.unwrap();
        assert_eq!(result.pdf_name.as_deref(), Some("paper"));
        assert_eq!(
            result.summary,
            Summary {
                total_pages: 10,
                successful_pages: 9,
                total_characters: 123456,
                success_rate: "90%".to_string(),
            }
        );
    }

    #[test]
    fn test_sparse_status_uses_defaults() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"status": "queued", "progress": null, "logs": null}"#).unwrap();
        assert_eq!(status.status, TaskStatus::Queued);
        assert_eq!(status.progress(), 0);
        assert_eq!(status.message(), "");
        assert!(status.logs().is_empty());
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let status: StatusResponse = serde_json::from_str(r#"{"status": "paused"}"#).unwrap();
        assert_eq!(status.status, TaskStatus::Unknown);
        assert!(!status.status.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
    }

    #[test]
    fn test_upload_response_deserialization() {
        let json = r#"{"success": true, "task_id": "abc123", "message": "文件上传成功，开始处理..."}"#;
        let response: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.task_id, "abc123");
    }

    #[test]
    fn test_task_list_deserialization() {
        let json = r#"{
            "tasks": [
                {"task_id": "t1", "filename": "a.pdf", "status": "completed", "progress": 100,
                 "created_at": "2024-05-01T10:20:30.1", "logs": []},
                {"task_id": "t2", "filename": "b.pdf", "status": "queued", "progress": 0}
            ],
            "total": 2
        }"#;
        let list: TaskList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.tasks[0].status, TaskStatus::Completed);
        assert_eq!(list.tasks[1].filename.as_deref(), Some("b.pdf"));
    }

    #[test]
    fn test_health_badge() {
        let health: HealthResponse = serde_json::from_str(
            r#"{"status": "healthy", "service": "PDF to Markdown Converter", "version": "1.0.0", "tasks_count": 3}"#,
        )
        .unwrap();
        assert_eq!(health.badge(), "healthy · v1.0.0 · 3 个任务");
        assert_eq!(HealthResponse::default().badge(), "online");
    }

    #[test]
    fn test_log_classification() {
        assert_eq!(LogLevel::classify("[10:00:00] ✓ OCR模型加载完成"), LogLevel::Success);
        assert_eq!(LogLevel::classify("[10:00:00] 🎉 处理完成！"), LogLevel::Success);
        assert_eq!(LogLevel::classify("[10:00:00]     ✗ 识别失败: boom"), LogLevel::Error);
        assert_eq!(LogLevel::classify("[10:00:00]   - 处理第 1/3 页"), LogLevel::Info);
        assert_eq!(LogLevel::classify("等待开始..."), LogLevel::Info);
    }

    #[test]
    fn test_failure_message_falls_back_to_error() {
        let status: StatusResponse =
            serde_json::from_str(r#"{"status": "failed", "message": "parse error", "error": "boom"}"#).unwrap();
        assert_eq!(status.failure_message(), "parse error");

        let status: StatusResponse =
            serde_json::from_str(r#"{"status": "failed", "message": null, "error": "boom"}"#).unwrap();
        assert_eq!(status.failure_message(), "boom");

        let status: StatusResponse = serde_json::from_str(r#"{"status": "failed"}"#).unwrap();
        assert_eq!(status.failure_message(), "");
    }

    #[test]
    fn test_selection_accepts_pdf_only() {
        let meta = FileMeta::from_selection("paper.pdf".to_string(), 500.0).unwrap();
        assert_eq!(meta, FileMeta { name: "paper.pdf".to_string(), size: 500 });
        assert_eq!(meta.display_size(), "500 B");

        for name in ["paper.PDF", "notes.txt", "paper.pdf.zip"] {
            assert_eq!(
                FileMeta::from_selection(name.to_string(), 10.0),
                Err(AppError::Validation("请选择PDF文件！".to_string()))
            );
        }
    }

    #[test]
    fn test_file_meta_display_size() {
        let meta = FileMeta { name: "a.pdf".to_string(), size: 2048 };
        assert_eq!(meta.display_size(), "2.00 KB");
    }
}
