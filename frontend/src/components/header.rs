use leptos::*;

use crate::{APP_NAME, BACKEND_URL};

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <span class="badge" title="Processing service">{BACKEND_URL}</span>
            </div>
        </header>
    }
}
