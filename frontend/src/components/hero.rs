//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Intelli Extract"</h1>
            <p class="subtitle">"AI-Powered Document Extraction & Verification"</p>
        </div>
    }
}
