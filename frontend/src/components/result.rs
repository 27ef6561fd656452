//! Result pane shown once a conversion completes.

use leptos::*;

use crate::format::{format_timestamp, group_thousands};
use crate::{CompletedTask, Converter, Summary};

/// Labelled statistics in display order.
pub fn summary_stats(summary: &Summary) -> [(&'static str, String); 4] {
    [
        ("总页数", summary.total_pages.to_string()),
        ("成功页数", summary.successful_pages.to_string()),
        ("识别字符数", group_thousands(summary.total_characters)),
        ("成功率", summary.success_rate.clone()),
    ]
}

fn stats_for(task: Option<&CompletedTask>) -> Vec<(&'static str, String)> {
    match task.and_then(|t| t.summary.as_ref()) {
        Some(summary) => summary_stats(summary).to_vec(),
        None => summary_stats(&Summary::default())
            .into_iter()
            .map(|(label, _)| (label, "-".to_string()))
            .collect(),
    }
}

/// Heading of the result pane, e.g. `✅ 转换完成: paper (2024-05-01 10:22:00)`.
pub fn result_title(task: &CompletedTask) -> String {
    let mut title = match task.pdf_name.as_deref() {
        Some(name) => format!("✅ 转换完成: {}", name),
        None => "✅ 转换完成".to_string(),
    };
    if let Some(at) = task.processed_at.as_deref() {
        title.push_str(&format!(" ({})", format_timestamp(at)));
    }
    title
}

#[component]
pub fn ResultSection(converter: Converter) -> impl IntoView {
    let title = move || converter.result.with(|r| r.as_ref().map(result_title).unwrap_or_default());

    view! {
        <div class="result-section" id="resultSection">
            <div class="result-title">{title}</div>

            <div class="stats">
                {move || {
                    converter.result.with(|r| stats_for(r.as_ref()))
                        .into_iter()
                        .map(|(label, value)| view! {
                            <div class="stat-item">
                                <div class="stat-value">{value}</div>
                                <div class="stat-label">{label}</div>
                            </div>
                        })
                        .collect_view()
                }}
            </div>

            <button class="btn btn-primary" id="downloadMd" on:click=move |_| converter.download()>
                "📥 下载 Markdown"
            </button>

            <div class="preview-title">"📝 Markdown 预览"</div>
            <pre class="markdown-preview" id="markdownPreview">
                {move || converter.preview.get()}
            </pre>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats() {
        let summary = Summary {
            total_pages: 10,
            successful_pages: 9,
            total_characters: 123456,
            success_rate: "90%".to_string(),
        };
        let values: Vec<String> = summary_stats(&summary).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["10", "9", "123,456", "90%"]);
    }

    #[test]
    fn test_missing_summary_shows_placeholders() {
        let task = CompletedTask {
            task_id: "abc123".to_string(),
            summary: None,
            pdf_name: None,
            processed_at: None,
        };
        let stats = stats_for(Some(&task));
        assert_eq!(stats.len(), 4);
        assert!(stats.iter().all(|(_, v)| v == "-"));
        assert_eq!(task.download_url(), "/api/download/abc123/markdown");
        assert_eq!(result_title(&task), "✅ 转换完成");
    }

    #[test]
    fn test_result_title_with_name_and_time() {
        let task = CompletedTask {
            task_id: "abc123".to_string(),
            summary: None,
            pdf_name: Some("paper".to_string()),
            processed_at: Some("2024-05-01T10:22:00.5".to_string()),
        };
        assert_eq!(result_title(&task), "✅ 转换完成: paper (2024-05-01 10:22:00)");
    }
}
