//! PDF selection with drag & drop support.
//!
//! Both the picker and a drop end up in [`Converter::select_file`], which
//! keeps the accepted file in the hidden input's `FileList`.

use leptos::*;
use web_sys::{DragEvent, Event, HtmlInputElement};

use crate::session::Phase;
use crate::Converter;

#[component]
pub fn UploadSection(converter: Converter) -> impl IntoView {
    let (drag_over, set_drag_over) = create_signal(false);
    let file_input = converter.file_input;

    // Handler pour le changement de fichier
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            converter.select_file(file);
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(true);
    };

    let on_drag_leave = move |_: DragEvent| set_drag_over.set(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        let dropped = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = dropped {
            converter.select_file(file);
        }
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let file_name = move || {
        converter
            .selected
            .with(|s| s.as_ref().map(|meta| meta.name.clone()).unwrap_or_default())
    };
    let file_size = move || {
        converter
            .selected
            .with(|s| s.as_ref().map(|meta| meta.display_size()).unwrap_or_default())
    };

    view! {
        <div class="upload-section">
            <div
                class="upload-area"
                id="uploadArea"
                class:dragover=move || drag_over.get()
                on:click=trigger_file_input
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <div class="upload-icon">"📄"</div>
                <div class="upload-text">"拖拽PDF文件到此处"</div>
                <div class="upload-hint">"或点击选择文件"</div>
            </div>

            <input
                type="file"
                id="fileInput"
                accept=".pdf"
                style="display:none"
                node_ref=file_input
                on:change=on_file_change
            />

            <Show
                when=move || converter.selected.with(Option::is_some)
                fallback=|| view! { }
            >
                <div class="file-info" id="fileInfo">
                    <span class="file-name">{file_name}</span>
                    <span class="file-size">{file_size}</span>
                </div>
            </Show>

            <button
                class="btn btn-primary"
                id="uploadBtn"
                disabled=move || converter.upload_disabled()
                on:click=move |_| converter.start_upload()
            >
                {move || if converter.phase.with(Phase::is_busy) {
                    "⏳ 处理中..."
                } else {
                    "开始转换"
                }}
            </button>
        </div>
    }
}
