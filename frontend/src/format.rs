//! Display helpers shared by the components.
//!
//! Everything here is pure so it can be unit tested natively.

use chrono::NaiveDateTime;

use crate::config::{PDF_EXTENSION, PREVIEW_CHAR_LIMIT};
use crate::types::AppError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Whether a file name is accepted for conversion.
///
/// Only the name is checked, the content is never inspected.
pub fn is_pdf_name(name: &str) -> bool {
    name.ends_with(PDF_EXTENSION)
}

/// Human readable size: `B` below 1 KiB, then `KB` / `MB` with two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Integer with `,` thousands separators (`123456` -> `123,456`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Notice appended to a truncated preview.
pub fn truncation_notice(limit: usize) -> String {
    format!("\n\n... (预览前{}字符)", limit)
}

/// Cut a Markdown document down to the preview size.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_preview(text: &str) -> String {
    truncate_to(text, PREVIEW_CHAR_LIMIT)
}

fn truncate_to(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => {
            let mut preview = text[..cut].to_string();
            preview.push_str(&truncation_notice(limit));
            preview
        }
        None => text.to_string(),
    }
}

/// Percentage clamped to the progress bar range.
pub fn clamp_percent(progress: i64) -> u8 {
    progress.clamp(0, 100) as u8
}

// =============================================================================
// Banner texts
// =============================================================================

pub fn upload_failed_text(error: &AppError) -> String {
    format!("上传失败: {}", error)
}

/// Failure prefix followed by the server's message, verbatim.
pub fn task_failed_text(message: &str) -> String {
    format!("处理失败: {}", message)
}

pub fn poll_warning_text(failures: u32) -> String {
    format!("状态查询已连续失败 {} 次，正在继续重试...", failures)
}

pub const UNREACHABLE_TEXT: &str = "无法连接到服务器，请检查服务是否启动";

/// Render a server timestamp (`2024-05-01T10:20:30.123456`) as
/// `2024-05-01 10:20:30`. Unparseable values are shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_is_case_sensitive() {
        assert!(is_pdf_name("report.pdf"));
        assert!(is_pdf_name(".pdf"));
        assert!(!is_pdf_name("report.PDF"));
        assert!(!is_pdf_name("report.pdf.txt"));
        assert!(!is_pdf_name("notes.md"));
        assert!(!is_pdf_name("pdf"));
    }

    #[test]
    fn test_file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_short_preview_has_no_notice() {
        let text = "a".repeat(PREVIEW_CHAR_LIMIT);
        let preview = truncate_preview(&text);
        assert_eq!(preview, text);
        assert!(!preview.contains("预览前"));
    }

    #[test]
    fn test_long_preview_is_cut_with_notice() {
        let text = "b".repeat(PREVIEW_CHAR_LIMIT + 1);
        let preview = truncate_preview(&text);
        let expected = format!("{}{}", "b".repeat(PREVIEW_CHAR_LIMIT), truncation_notice(PREVIEW_CHAR_LIMIT));
        assert_eq!(preview, expected);
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "文".repeat(5);
        assert_eq!(truncate_to(&text, 3), format!("文文文{}", truncation_notice(3)));
        assert_eq!(truncate_to(&text, 5), text);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-5), 0);
        assert_eq!(clamp_percent(42), 42);
        assert_eq!(clamp_percent(250), 100);
    }

    #[test]
    fn test_banner_texts() {
        assert_eq!(task_failed_text("parse error"), "处理失败: parse error");
        assert_eq!(task_failed_text(""), "处理失败: ");
        assert_eq!(
            upload_failed_text(&AppError::Http { status: 400, detail: "只支持PDF文件".to_string() }),
            "上传失败: HTTP 400: 只支持PDF文件"
        );
        assert_eq!(
            upload_failed_text(&AppError::Network("connection refused".to_string())),
            "上传失败: Network error: connection refused"
        );
        assert_eq!(poll_warning_text(10), "状态查询已连续失败 10 次，正在继续重试...");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-05-01T10:20:30.123456"), "2024-05-01 10:20:30");
        assert_eq!(format_timestamp("2024-05-01T10:20:30"), "2024-05-01 10:20:30");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
