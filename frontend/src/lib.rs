//! Intelli Extract - Frontend Rust/Leptos Application
//!
//! A WebAssembly form for uploading a document image, choosing its type,
//! and comparing what three extraction methods read from it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent (owns the Session signal)                       │
//! │  ├── Hero (title, subtitle)                                  │
//! │  ├── CategoryList ──▶ select_category                        │
//! │  ├── FilePreview  ──▶ stage_file ──▶ submit_document         │
//! │  ├── ResultTable  ◀── rows, raw text, loading flag           │
//! │  └── Notification ◀── last error (auto-hides)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint and schema profile resolution
//! - [`components`] - UI components (CategoryList, FilePreview, ResultTable, etc.)
//! - [`services`] - Extraction service communication

use intelli_extract_core::Session;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use web_sys::File;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, RuntimeEnv};
pub use components::*;
pub use services::*;

// =============================================================================
// Signal helpers
// =============================================================================

/// Memoize a derived signal so subscribers only rerun when its value
/// actually changes, not on every update of the state it is derived from.
pub fn distinct<T: Clone + PartialEq + 'static>(source: Signal<T>) -> Signal<T> {
    create_memo(move |_| source.get()).into()
}

// =============================================================================
// Application Entry Point
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Intelli Extract"/>
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
    let config = store_value(AppConfig::load());
    let session = create_rw_signal(Session::<File>::new());

    // Derived views of the session
    let selected = Signal::derive(move || session.with(|s| s.selected_category().map(str::to_string)));
    // Compared by handle, so the preview URL survives unrelated session updates
    let staged = distinct(Signal::derive(move || session.with(|s| s.staged_file().cloned())));
    let is_submitting = Signal::derive(move || session.with(|s| s.is_submitting()));
    let has_category = Signal::derive(move || session.with(|s| s.selected_category().is_some()));
    let rows = Signal::derive(move || session.with(|s| s.rows().to_vec()));
    let raw_text = Signal::derive(move || session.with(|s| s.raw_text().to_string()));
    let last_error = Signal::derive(move || session.with(|s| s.last_error().map(str::to_string)));

    let on_select = Callback::new(move |id: String| {
        session.update(|s| s.select_category(id));
    });

    let on_file = Callback::new(move |file: Option<File>| {
        let mut submission = None;
        session.update(|s| submission = s.stage_file(file));

        let Some(submission) = submission else {
            return;
        };

        spawn_local(async move {
            let (endpoint, profile) = config.with_value(|c| (c.endpoint.clone(), c.profile.clone()));
            let outcome =
                services::submit_document(&submission.file, &submission.category_id, &endpoint, &profile).await;

            session.update(|s| {
                let applied = match outcome {
                    Ok(result_set) => s.submission_succeeded(submission.ticket, result_set),
                    Err(e) => s.submission_failed(submission.ticket, &e),
                };
                if !applied {
                    log::debug!("Response for ticket {} arrived after a newer action", submission.ticket.id());
                }
            });
        });
    });

    let on_dismiss = Callback::new(move |_: ()| {
        session.update(|s| s.dismiss_error());
    });

    view! {
        <div class="container">
            <Hero/>

            <div class="workspace">
                <CategoryList selected=selected on_select=on_select/>

                <div class="document-panel">
                    <FilePreview
                        category=selected
                        file=staged
                        is_submitting=is_submitting
                        on_file=on_file
                    />
                    <ResultTable
                        rows=rows
                        raw_text=raw_text
                        is_submitting=is_submitting
                        has_category=has_category
                        profile=config.with_value(|c| c.profile.clone())
                    />
                </div>
            </div>

            <Notification message=last_error on_dismiss=on_dismiss/>
        </div>

        <Footer/>
    }
}
