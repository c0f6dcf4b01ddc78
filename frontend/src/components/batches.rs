//! Processed batches list.

use chrono::Local;
use leptos::*;
use std::rc::Rc;

use vaultage::{Batch, BatchListController, RefreshToken};

use crate::services::BrowserGateway;

#[component]
pub fn BatchList(
    controller: Rc<BatchListController<BrowserGateway>>,
    /// Notified on every controller change.
    changed: Trigger,
    refresh_token: ReadSignal<RefreshToken>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    // Mount load, then one fetch per newer token.
    {
        let controller = controller.clone();
        create_effect(move |_| {
            let token = refresh_token.get();
            let controller = controller.clone();
            spawn_local(async move { controller.observe(token).await });
        });
    }

    let view_state = {
        let controller = controller.clone();
        move || {
            changed.track();
            controller.snapshot()
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

    view! {
        <div class="batches-section">
            <div class="section-header">
                <div class="section-title">"📦 Processed files"</div>
                <button
                    class="btn btn-secondary"
                    class:spinning=loading.clone()
                    on:click=move |_| on_refresh.call(())
                >
                    {move || if loading() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <Show
                when=empty
                fallback=|| view! { }
            >
                <div class="empty-state">"No processed files yet"</div>
            </Show>

            <div class="batch-list">
                <For
                    each=move || view_state().batches
                    key=|batch| batch.id.clone()
                    children=move |batch| {
                        view! { <BatchRow batch=batch controller=controller.clone()/> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn BatchRow(batch: Batch, controller: Rc<BatchListController<BrowserGateway>>) -> impl IntoView {
    let created = batch.created_label(&Local);
    let file_count = batch.file_count_label();
    let id = batch.id.clone();

    view! {
        <div class="batch-item" on:click=move |_| controller.select(id.clone())>
            <div class="batch-name">"📁 " {batch.name}</div>
            <div class="batch-meta">
                <span>{created}</span>
                <span class="badge">{file_count}</span>
            </div>
        </div>
    }
}
