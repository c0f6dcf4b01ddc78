//! File viewer for the selected batch.

use leptos::*;
use std::rc::Rc;

use vaultage::{FileEntry, FileListController, Navigation};

use crate::services::BrowserGateway;

#[component]
pub fn FileViewer(
    controller: Rc<FileListController<BrowserGateway>>,
    changed: Trigger,
    navigation: ReadSignal<Navigation>,
) -> impl IntoView {
    {
        let controller = controller.clone();
        create_effect(move |_| {
            navigation.with(|_| ());
            let controller = controller.clone();
            spawn_local(async move { controller.sync().await });
        });
    }

    let view_state = {
        let controller = controller.clone();
        move || {
            changed.track();
            controller.snapshot()
        }
    };
    let title = {
        let view_state = view_state.clone();
        move || {
            view_state()
                .batch_id
                .map(|id| id.to_string())
                .unwrap_or_default()
        }
    };
    let loading = {
        let view_state = view_state.clone();
        move || view_state().loading
    };
    let empty = {
        let view_state = view_state.clone();
        move || view_state().shows_empty_state()
    };
    let on_back = {
        let controller = controller.clone();
        move |_| controller.back()
    };

    view! {
        <div class="files-section">
            <div class="section-header">
                <button class="btn btn-secondary" on:click=on_back>"← Back"</button>
                <div class="section-title">"📂 " {title}</div>
            </div>

            <Show
                when=loading
                fallback=|| view! { }
            >
                <div class="loading">"Loading files..."</div>
            </Show>

            <Show
                when=empty
                fallback=|| view! { }
            >
                <div class="empty-state">"No files found in this folder."</div>
            </Show>

            <div class="file-list">
                <For
                    each=move || view_state().files
                    key=|entry| entry.path.clone()
                    children=move |entry| {
                        view! { <FileRow entry=entry controller=controller.clone()/> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn FileRow(entry: FileEntry, controller: Rc<FileListController<BrowserGateway>>) -> impl IntoView {
    let name = entry.name.clone();
    let size = entry.size_label();

    view! {
        <div class="file-item">
            <div class="file-name">"📄 " {name}</div>
            <div class="file-meta">{size}</div>
            <button class="btn btn-primary" on:click=move |_| controller.download(&entry)>
                "Download"
            </button>
        </div>
    }
}
