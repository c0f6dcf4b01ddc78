//! Spreadsheet drop zone.
//!
//! Accepts one `.xls`/`.xlsx` by drag & drop or through the file picker.
//! Drops are refused while an upload is in flight; the outcome of the last
//! attempt is shown underneath.

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, HtmlInputElement};

use vaultage::{Submission, UploadAttempt, UploadController, UploadStatus};

use crate::services::{BrowserFile, BrowserGateway};
use crate::ACCEPTED_FILES;

#[component]
pub fn DropZone(
    controller: Rc<UploadController<BrowserGateway>>,
    attempt: ReadSignal<UploadAttempt>,
) -> impl IntoView {
    let (dragging, set_dragging) = create_signal(false);
    let busy = move || attempt.with(UploadAttempt::is_busy);

    let submit = {
        let controller = controller.clone();
        move |files: Vec<BrowserFile>| {
            let controller = controller.clone();
            spawn_local(async move {
                if let Submission::Ignored(rejection) = controller.submit(files).await {
                    log::info!("🚫 Selection ignored: {:?}", rejection);
                }
            });
        }
    };

    let on_drop = {
        let submit = submit.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_dragging.set(false);
            if busy() {
                log::warn!("⚠️ Upload in progress, drop refused");
                return;
            }
            let files = ev
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .map(|list| BrowserFile::from_list(&list))
                .unwrap_or_default();
            submit(files);
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        if !busy() {
            set_dragging.set(true);
        }
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = input
            .files()
            .map(|list| BrowserFile::from_list(&list))
            .unwrap_or_default();
        // Let the same file be picked again.
        input.set_value("");
        submit(files);
    };

    let open_picker = move |_| {
        if busy() {
            return;
        }
        let input = document()
            .get_element_by_id("fileInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        if let Some(input) = input {
            input.click();
        }
    };

    view! {
        <div
            class="upload-section"
            id="uploadZone"
            class:dragging=move || dragging.get()
            class:disabled=busy
            on:click=open_picker
            on:dragover=on_drag_over
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=on_drop
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if busy() {
                    "⏳ Uploading..."
                } else {
                    "Drop an Excel file here"
                }}
            </div>

            <Show
                when=move || !busy()
                fallback=|| view! { }
            >
                <div class="upload-hint">"or click to browse (.xls, .xlsx)"</div>
            </Show>

            <input
                type="file"
                id="fileInput"
                accept=ACCEPTED_FILES
                style="display:none"
                prop:disabled=busy
                on:click=|ev| ev.stop_propagation()
                on:change=on_file_change
            />

            <Show
                when=move || attempt.with(UploadAttempt::has_outcome)
                fallback=|| view! { }
            >
                <div
                    class="status-message"
                    class:success=move || attempt.with(|a| a.status == UploadStatus::Succeeded)
                    class:error-message=move || attempt.with(|a| a.status == UploadStatus::Failed)
                >
                    {move || attempt.with(|a| a.message.clone())}
                </div>
            </Show>
        </div>
    }
}
