//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"QuasarVaultage"</h1>
            <p class="subtitle">
                "Upload an Excel workbook, let the service process it, "
                "then browse and download the generated files."
            </p>
        </div>
    }
}
