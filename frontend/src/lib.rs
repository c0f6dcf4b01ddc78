//! Vaultage - Frontend Rust/Leptos Application
//!
//! A WebAssembly client for uploading Excel workbooks to the processing
//! service and downloading the files it produces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (service origin)                                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                │
//! │  ├── Hero (title, description)                              │
//! │  ├── DropZone                                               │
//! │  └── BatchList, or FileViewer once a batch is selected      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! State lives in the `vaultage` controllers; this crate only bridges their
//! change notifications into Leptos signals and triggers.
//!
//! # Modules
//!
//! - [`config`] - Build-time configuration
//! - [`components`] - UI components (Header, DropZone, BatchList, etc.)
//! - [`services`] - Browser gateway and timer

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use vaultage::{
    BatchListController, FileListController, Navigation, RefreshCoordinator, UploadController,
};

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 QuasarVaultage - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let config = client_config();
    log::info!("🌐 Processing service at {}", config.base_url());

    // Controllers
    let gateway = Rc::new(BrowserGateway::new(config.clone()));
    let upload = Rc::new(UploadController::new(gateway.clone()));
    let batches = Rc::new(BatchListController::new(gateway.clone()));
    let files = Rc::new(FileListController::new(gateway, batches.navigator()));
    let refresh = RefreshCoordinator::new(BrowserTimer, config.refresh_delay());

    // Controller notifications -> reactive graph
    let (attempt, set_attempt) = create_signal(upload.attempt());
    upload.on_change(move |next| set_attempt.set(next.clone()));

    let (refresh_token, set_refresh_token) = create_signal(refresh.token());
    refresh.subscribe(move |token| set_refresh_token.set(*token));

    let (navigation, set_navigation) = create_signal(Navigation::ListView);
    batches.navigator().subscribe(move |next| set_navigation.set(next.clone()));

    let batches_changed = create_trigger();
    batches.on_change(move || batches_changed.notify());

    let files_changed = create_trigger();
    files.on_change(move || files_changed.notify());

    // Upload success -> delayed refresh. The coordinator lives as long as
    // this view; dropping it cancels a pending refresh.
    let weak_refresh = Rc::downgrade(&refresh);
    upload.on_completed(move |completed| {
        log::debug!("Upload of {} completed", completed.file_name);
        if let Some(refresh) = weak_refresh.upgrade() {
            refresh.notify_upload_succeeded();
        }
    });
    let weak_refresh = Rc::downgrade(&refresh);
    let on_refresh = Callback::new(move |_: ()| {
        if let Some(refresh) = weak_refresh.upgrade() {
            refresh.request_manual_refresh();
        }
    });
    store_value(refresh);

    let in_detail = move || navigation.with(|nav| nav.selected().is_some());

    view! {
        <Header/>

        <div class="container">
            <Hero/>

            <DropZone controller=upload attempt=attempt/>

            <Show
                when=in_detail
                fallback=move || view! {
                    <BatchList
                        controller=batches.clone()
                        changed=batches_changed
                        refresh_token=refresh_token
                        on_refresh=on_refresh
                    />
                }
            >
                <FileViewer
                    controller=files.clone()
                    changed=files_changed
                    navigation=navigation
                />
            </Show>
        </div>

        <Footer/>
    }
}
