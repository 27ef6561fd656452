//! Recent tasks known to the conversion service.

use leptos::*;

use crate::config::API_BASE;
use crate::format::{clamp_percent, format_timestamp};
use crate::services::{download_url, ArtifactKind};
use crate::{Converter, TaskStatus};

#[component]
pub fn TaskHistory(converter: Converter) -> impl IntoView {
    view! {
        <div class="history-section">
            <div class="history-header">
                <span class="history-title">"🗂️ 最近任务"</span>
                <button class="btn btn-secondary" on:click=move |_| converter.refresh_tasks()>
                    "刷新"
                </button>
            </div>

            <Show
                when=move || !converter.tasks.with(Vec::is_empty)
                fallback=|| view! { <div class="history-empty">"暂无任务"</div> }
            >
                <div class="history-list">
                    <For
                        each=move || converter.tasks.get()
                        key=|task| (task.task_id.clone(), task.status, task.progress)
                        children=move |task| {
                            let name = task.filename.clone().unwrap_or_else(|| task.task_id.clone());
                            let created = task.created_at.as_deref().map(format_timestamp).unwrap_or_default();
                            let progress = clamp_percent(task.progress.unwrap_or(0));
                            let link = (task.status == TaskStatus::Completed)
                                .then(|| download_url(API_BASE, &task.task_id, ArtifactKind::Markdown));

                            view! {
                                <div class="history-item">
                                    <div class="history-item-name">{name}</div>
                                    <div class="history-item-details">
                                        <span class=task.status.css_class()>{task.status.label()}</span>
                                        " • " {progress} "% • " {created}
                                    </div>
                                    {link.map(|href| view! {
                                        <a class="history-download" href=href>"下载"</a>
                                    })}
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
