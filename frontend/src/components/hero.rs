//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"PDF 转 Markdown"</h1>
            <p class="subtitle">
                "上传 PDF 文档，服务端逐页 OCR 识别后生成 Markdown。"
                "处理进度与日志会实时显示在下方。"
            </p>
        </div>
    }
}
