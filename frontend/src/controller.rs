//! Reactive glue between the [`Session`] state machine and the UI.
//!
//! [`Converter`] is created once in `MainContent` and handed to every
//! component. It is `Copy`: all of its fields are arena handles.

use gloo_timers::callback::Interval;
use leptos::*;
use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, File, FileList};

use crate::config::{API_BASE, POLL_FAILURE_WARN_EVERY, POLL_INTERVAL_MS};
use crate::format::{
    clamp_percent, is_pdf_name, poll_warning_text, task_failed_text, truncate_preview, upload_failed_text,
    UNREACHABLE_TEXT,
};
use crate::services::{check_health, download_url, fetch_markdown, fetch_status, list_tasks, upload_pdf, ArtifactKind};
use crate::session::{PollOutcome, Phase, Session, Ticket};
use crate::types::{
    AppError, FileMeta, HealthResponse, LogEntry, StatusResponse, Summary, TaskRecord, TaskResult,
    UploadResponse,
};

/// What the progress bar shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub percent: u8,
    pub message: String,
}

impl ProgressView {
    fn starting() -> Self {
        Self {
            percent: 0,
            message: "正在上传文件...".to_string(),
        }
    }

    fn from_status(status: &StatusResponse) -> Self {
        let message = match status.message() {
            "" => "处理中...".to_string(),
            msg => msg.to_string(),
        };
        Self {
            percent: clamp_percent(status.progress()),
            message,
        }
    }
}

/// A finished conversion, as shown in the result pane.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedTask {
    pub task_id: String,
    pub summary: Option<Summary>,
    pub pdf_name: Option<String>,
    /// Server timestamp of the end of processing
    pub processed_at: Option<String>,
}

impl CompletedTask {
    pub fn download_url(&self) -> String {
        download_url(API_BASE, &self.task_id, ArtifactKind::Markdown)
    }
}

#[derive(Clone, Copy)]
pub struct Converter {
    session: StoredValue<Session<Interval>>,
    accepted_file: StoredValue<Option<File>>,
    poll_warning_shown: StoredValue<bool>,
    /// Hidden `<input type="file">`; its `FileList` holds the file to upload.
    pub file_input: NodeRef<html::Input>,
    pub selected: RwSignal<Option<FileMeta>>,
    pub phase: RwSignal<Phase>,
    pub progress: RwSignal<ProgressView>,
    pub logs: RwSignal<Vec<LogEntry>>,
    pub result: RwSignal<Option<CompletedTask>>,
    pub preview: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub health: RwSignal<Option<HealthResponse>>,
    pub tasks: RwSignal<Vec<TaskRecord>>,
}

impl Converter {
    /// Must be called inside a reactive owner (a component body).
    pub fn new() -> Self {
        Self {
            session: store_value(Session::new()),
            accepted_file: store_value(None),
            poll_warning_shown: store_value(false),
            file_input: create_node_ref(),
            selected: create_rw_signal(None),
            phase: create_rw_signal(Phase::Idle),
            progress: create_rw_signal(ProgressView::starting()),
            logs: create_rw_signal(Vec::new()),
            result: create_rw_signal(None),
            preview: create_rw_signal(String::new()),
            error: create_rw_signal(None),
            health: create_rw_signal(None),
            tasks: create_rw_signal(Vec::new()),
        }
    }

    // =========================================================================
    // Error banner
    // =========================================================================

    /// Single display primitive for user-facing errors. Overwrites any
    /// message already shown.
    pub fn show_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub fn hide_error(&self) {
        self.error.set(None);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Upload control state (reactive).
    pub fn upload_disabled(&self) -> bool {
        let has_selection = self.selected.with(Option::is_some);
        self.phase.with(|phase| phase.upload_disabled(has_selection))
    }

    /// Accept or reject a file coming from the picker or a drop.
    pub fn select_file(&self, file: File) {
        let meta = match FileMeta::from_selection(file.name(), file.size()) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("🚫 Rejected {}: {}", file.name(), e);
                self.show_error(e.to_string());
                let previous = self.accepted_file.with_value(|f| f.clone());
                self.store_in_input(previous.as_ref());
                return;
            }
        };
        log::info!("📄 Selected {} ({})", meta.name, meta.display_size());
        self.store_in_input(Some(&file));
        self.accepted_file.set_value(Some(file));
        self.selected.set(Some(meta));
    }

    /// Put `file` into the input's `FileList` (or empty it).
    fn store_in_input(&self, file: Option<&File>) {
        let Some(input) = self.file_input.get_untracked() else {
            return;
        };
        match file.map(single_file_list) {
            Some(Ok(list)) => input.set_files(Some(&list)),
            Some(Err(e)) => log::warn!("Could not store file in input: {:?}", e),
            None => input.set_value(""),
        }
    }

    /// The file the upload will send, read back from the input.
    fn current_file(&self) -> Option<File> {
        self.file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .filter(|file| is_pdf_name(&file.name()))
            .or_else(|| self.accepted_file.with_value(|f| f.clone()))
    }

    // =========================================================================
    // Upload
    // =========================================================================

    pub fn start_upload(self) {
        let Some(file) = self.current_file() else {
            self.show_error(AppError::Validation("请先选择文件！".to_string()).to_string());
            return;
        };

        let ticket = match self.session.try_update_value(|s| s.begin_upload()) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                log::warn!("⏳ {}", e);
                return;
            }
            None => return,
        };

        self.sync_phase();
        self.hide_error();
        self.poll_warning_shown.set_value(false);
        self.result.set(None);
        self.preview.set(String::new());
        self.progress.set(ProgressView::starting());
        self.logs.set(vec![LogEntry::from_server("等待开始...")]);

        log::info!("📤 Uploading {}...", file.name());
        spawn_local(async move {
            match upload_pdf(&file, API_BASE).await {
                Ok(response) => self.on_uploaded(ticket, response),
                Err(e) => self.on_upload_error(ticket, e),
            }
        });
    }

    fn on_uploaded(self, ticket: Ticket, response: UploadResponse) {
        let UploadResponse { task_id, message } = response;
        let accepted = self
            .session
            .try_update_value(|s| s.upload_succeeded(ticket, task_id.clone()))
            .unwrap_or(false);
        if !accepted {
            log::debug!("Ignoring upload response for superseded ticket {}", ticket);
            return;
        }

        log::info!(
            "✅ Upload accepted, task {}: {}",
            task_id,
            message.as_deref().unwrap_or("no message")
        );
        self.sync_phase();

        let timer = Interval::new(POLL_INTERVAL_MS, move || self.poll_tick());
        self.session.update_value(|s| {
            s.attach_timer(ticket, timer);
        });
    }

    fn on_upload_error(self, ticket: Ticket, error: AppError) {
        let current = self
            .session
            .try_update_value(|s| s.upload_failed(ticket))
            .unwrap_or(false);
        if !current {
            return;
        }
        log::error!("❌ Upload failed: {}", error);
        self.sync_phase();
        self.show_error(upload_failed_text(&error));
    }

    // =========================================================================
    // Polling
    // =========================================================================

    fn poll_tick(self) {
        let Some(request) = self.session.try_update_value(|s| s.begin_poll()).flatten() else {
            return;
        };
        spawn_local(async move {
            match fetch_status(API_BASE, &request.task_id).await {
                Ok(status) => self.on_status(request.ticket, status),
                Err(e) => self.on_poll_error(request.ticket, e),
            }
        });
    }

    fn on_status(self, ticket: Ticket, status: StatusResponse) {
        let Some(outcome) = self.session.try_update_value(|s| s.finish_poll(ticket, &status)) else {
            return;
        };
        if outcome == PollOutcome::Stale {
            log::debug!("Ignoring status for superseded ticket {}", ticket);
            return;
        }

        if self.poll_warning_shown.get_value() {
            self.poll_warning_shown.set_value(false);
            self.hide_error();
        }
        self.render_status(&status);

        match outcome {
            PollOutcome::Running | PollOutcome::Stale => {}
            PollOutcome::Completed => {
                log::info!("🎉 Conversion completed");
                self.sync_phase();
                self.show_result(ticket, status.result);
                self.refresh_tasks();
            }
            PollOutcome::Failed(message) => {
                log::error!("❌ Conversion failed: {}", message);
                self.sync_phase();
                self.show_error(task_failed_text(&message));
                self.refresh_tasks();
            }
        }
    }

    fn on_poll_error(self, ticket: Ticket, error: AppError) {
        log::error!("❌ Status poll failed: {}", error);
        let failures = self.session.try_update_value(|s| s.poll_failed(ticket)).flatten();
        if let Some(count) = failures {
            if count % POLL_FAILURE_WARN_EVERY == 0 {
                self.poll_warning_shown.set_value(true);
                self.show_error(poll_warning_text(count));
            }
        }
    }

    fn render_status(&self, status: &StatusResponse) {
        self.progress.set(ProgressView::from_status(status));
        let lines = status.logs();
        if !lines.is_empty() {
            self.logs
                .set(lines.iter().map(|line| LogEntry::from_server(line.as_str())).collect());
        }
    }

    // =========================================================================
    // Result
    // =========================================================================

    fn show_result(self, ticket: Ticket, result: Option<TaskResult>) {
        let Some(task_id) = self.phase.with_untracked(|p| p.task_id().map(str::to_string)) else {
            return;
        };
        if result.is_none() {
            log::warn!("⚠️ Completed task {} carries no summary", task_id);
        }
        let (summary, pdf_name, processed_at) = match result {
            Some(result) => (Some(result.summary), result.pdf_name, result.processed_at),
            None => (None, None, None),
        };
        self.result.set(Some(CompletedTask {
            task_id: task_id.clone(),
            summary,
            pdf_name,
            processed_at,
        }));
        self.load_preview(ticket, task_id);
    }

    fn load_preview(self, ticket: Ticket, task_id: String) {
        spawn_local(async move {
            match fetch_markdown(API_BASE, &task_id).await {
                Ok(text) => {
                    let current = self.session.try_with_value(|s| s.is_current(ticket)).unwrap_or(false);
                    if current {
                        self.preview.set(truncate_preview(&text));
                    }
                }
                Err(e) => log::error!("❌ Failed to load preview: {}", e),
            }
        });
    }

    /// Navigate to the Markdown download of the finished task.
    pub fn download(&self) {
        let Some(url) = self.result.with_untracked(|r| r.as_ref().map(CompletedTask::download_url)) else {
            return;
        };
        if let Err(e) = window().location().set_href(&url) {
            log::error!("❌ Failed to open download: {:?}", e);
        }
    }

    // =========================================================================
    // Startup / side panels
    // =========================================================================

    /// One best-effort health probe.
    pub fn probe_health(self) {
        spawn_local(async move {
            match check_health(API_BASE).await {
                Ok(health) => {
                    log::info!("📡 Service status: {:?}", health);
                    self.health.set(Some(health));
                }
                Err(e) => {
                    log::error!("❌ Service unreachable: {}", e);
                    self.show_error(UNREACHABLE_TEXT);
                }
            }
        });
    }

    /// Reload the task list, newest first.
    pub fn refresh_tasks(self) {
        spawn_local(async move {
            match list_tasks(API_BASE).await {
                Ok(list) => {
                    let mut tasks = list.tasks;
                    tasks.reverse();
                    self.tasks.set(tasks);
                }
                Err(e) => log::warn!("Could not load task list: {}", e),
            }
        });
    }

    fn sync_phase(&self) {
        if let Some(phase) = self.session.try_with_value(|s| s.phase().clone()) {
            self.phase.set(phase);
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a one-entry `FileList`, the same shape the picker produces.
fn single_file_list(file: &File) -> Result<FileList, JsValue> {
    let transfer = DataTransfer::new()?;
    transfer.items().add_with_file(file)?;
    transfer
        .files()
        .ok_or_else(|| JsValue::from_str("DataTransfer has no files"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(json: &str) -> StatusResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_progress_view_clamps_and_falls_back() {
        let view = ProgressView::from_status(&status(r#"{"status": "processing", "progress": 140, "message": ""}"#));
        assert_eq!(view, ProgressView { percent: 100, message: "处理中...".to_string() });

        let view = ProgressView::from_status(&status(r#"{"status": "queued"}"#));
        assert_eq!(view, ProgressView { percent: 0, message: "处理中...".to_string() });

        let view = ProgressView::from_status(&status(
            r#"{"status": "processing", "progress": 42, "message": "正在识别第 3/10 页..."}"#,
        ));
        assert_eq!(view, ProgressView { percent: 42, message: "正在识别第 3/10 页...".to_string() });
    }

    #[test]
    fn test_converter_starts_idle_with_upload_disabled() {
        let runtime = create_runtime();

        let converter = Converter::new();
        assert_eq!(converter.phase.get_untracked(), Phase::Idle);
        assert!(converter.upload_disabled());
        assert_eq!(converter.progress.get_untracked().percent, 0);

        converter.selected.set(Some(FileMeta { name: "paper.pdf".to_string(), size: 2048 }));
        assert!(!converter.upload_disabled());
        converter.phase.set(Phase::Uploading);
        assert!(converter.upload_disabled());

        converter.show_error(task_failed_text("parse error"));
        assert_eq!(converter.error.get_untracked().as_deref(), Some("处理失败: parse error"));
        converter.show_error(UNREACHABLE_TEXT);
        assert_eq!(converter.error.get_untracked().as_deref(), Some(UNREACHABLE_TEXT));
        converter.hide_error();
        assert_eq!(converter.error.get_untracked(), None);

        runtime.dispose();
    }
}
