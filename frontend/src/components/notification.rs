//! Dismissible error banner.
//!
//! Each new message restarts the timer; a timer belonging to an older message
//! does nothing when it fires. Updates that leave the message unchanged keep
//! the running timer.

use gloo_timers::future::TimeoutFuture;
use intelli_extract_core::config::NOTIFICATION_TIMEOUT_MS;
use leptos::*;

use crate::distinct;

#[component]
pub fn Notification(
    message: Signal<Option<String>>,
    /// Called on close click or timeout
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let message = distinct(message);
    let shown = store_value(0u64);

    create_effect(move |_| {
        if message.with(Option::is_none) {
            return;
        }

        shown.update_value(|id| *id += 1);
        let id = shown.get_value();

        spawn_local(async move {
            TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
            if shown.get_value() == id {
                on_dismiss.call(());
            }
        });
    });

    view! {
        <Show
            when=move || message.with(Option::is_some)
            fallback=|| view! { }
        >
            <div class="notification notification-error" role="alert">
                <span class="notification-icon">"❌"</span>
                <span class="notification-message">{move || message.get().unwrap_or_default()}</span>
                <button class="notification-close" on:click=move |_| on_dismiss.call(())>
                    "✕"
                </button>
            </div>
        </Show>
    }
}
