//! Staged image preview with the upload button.
//!
//! The picker input is hidden and opened from the visible button. Its value is
//! cleared after every change so choosing the same file again still fires.

use intelli_extract_core::find_category;
use leptos::*;
use web_sys::{Event, File, HtmlInputElement, Url};

/// Label of the upload button.
pub fn button_label(is_submitting: bool, has_file: bool) -> &'static str {
    if is_submitting {
        "Processing Document..."
    } else if has_file {
        "Change Document"
    } else {
        "Upload Document"
    }
}

/// Placeholder hint shown when nothing is staged.
pub fn placeholder_hint(category_id: Option<&str>) -> String {
    match category_id.and_then(find_category) {
        Some(category) => format!("Select a {} and upload", category.display_name),
        None => "Select a document type and upload".to_string(),
    }
}

#[component]
pub fn FilePreview(
    /// Selected category id
    category: Signal<Option<String>>,
    /// Currently staged file
    file: Signal<Option<File>>,
    is_submitting: Signal<bool>,
    /// Called with the picked file (or `None` when the picker was cleared)
    on_file: Callback<Option<File>>,
) -> impl IntoView {
    let input_ref = create_node_ref::<html::Input>();

    // One object URL per staged file; the previous one is released
    let preview_url = create_memo(move |previous: Option<&Option<String>>| {
        if let Some(Some(old)) = previous {
            let _ = Url::revoke_object_url(old);
        }
        file.get().and_then(|f| Url::create_object_url_with_blob(&f).ok())
    });

    on_cleanup(move || {
        if let Some(url) = preview_url.get_untracked() {
            let _ = Url::revoke_object_url(&url);
        }
    });

    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let picked = input.files().and_then(|files| files.get(0));
        input.set_value("");
        on_file.call(picked);
    };

    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="file-preview">
            {move || match preview_url.get() {
                Some(url) => view! {
                    <img class="preview-image" src=url alt="Uploaded document"/>
                }
                .into_view(),
                None => view! {
                    <div class="preview-placeholder">
                        <div class="upload-icon">"📄"</div>
                        <div class="upload-text">"No document uploaded"</div>
                        <div class="upload-hint">{placeholder_hint(category.get().as_deref())}</div>
                    </div>
                }
                .into_view(),
            }}

            <input
                type="file"
                accept="image/*"
                style="display:none"
                node_ref=input_ref
                on:change=on_change
            />

            <button
                class="upload-button"
                disabled=move || category.with(Option::is_none) || is_submitting.get()
                on:click=open_picker
            >
                {move || button_label(is_submitting.get(), file.with(Option::is_some))}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_labels() {
        assert_eq!(button_label(false, false), "Upload Document");
        assert_eq!(button_label(false, true), "Change Document");
        assert_eq!(button_label(true, true), "Processing Document...");
    }

    #[test]
    fn test_placeholder_names_the_category() {
        assert_eq!(placeholder_hint(Some("license")), "Select a Driving License and upload");
        assert_eq!(placeholder_hint(None), "Select a document type and upload");
        assert_eq!(placeholder_hint(Some("visa")), "Select a document type and upload");
    }
}
