//! Per-method comparison table.

use intelli_extract_core::{ExtractionRow, SchemaProfile};
use leptos::*;

pub const LOADING_MESSAGE: &str = "Extracting data using AI models...";

/// Message for an empty table.
pub fn empty_message(has_category: bool) -> &'static str {
    if has_category {
        "Upload a document to see extracted data"
    } else {
        "Select a document type to begin"
    }
}

#[component]
pub fn ResultTable(
    rows: Signal<Vec<ExtractionRow>>,
    raw_text: Signal<String>,
    is_submitting: Signal<bool>,
    has_category: Signal<bool>,
    /// Supplies the column labels and the score scale
    profile: SchemaProfile,
) -> impl IntoView {
    let scale = profile.score_scale;
    let column_count = profile.method_labels.len() + 2;

    let body = move || {
        if is_submitting.get() {
            return view! {
                <tr class="loading-row">
                    <td colspan=column_count>
                        <span class="spinner"></span>
                        {LOADING_MESSAGE}
                    </td>
                </tr>
            }
            .into_view();
        }

        if rows.with(Vec::is_empty) {
            return view! {
                <tr class="empty-row">
                    <td colspan=column_count>{empty_message(has_category.get())}</td>
                </tr>
            }
            .into_view();
        }

        rows.get()
            .into_iter()
            .map(|row| {
                let badge = row.score.tier(scale).css_class();
                view! {
                    <tr>
                        <td class="attribute">{row.attribute}</td>
                        {row.values.into_iter().map(|value| view! { <td>{value}</td> }).collect_view()}
                        <td><span class=badge>{row.score.to_string()}</span></td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="results-section">
            <table class="results-table">
                <thead>
                    <tr>
                        <th>"Attribute"</th>
                        {profile.method_labels.into_iter().map(|label| view! { <th>{label}</th> }).collect_view()}
                        <th>"Score"</th>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>

            <Show
                when=move || !raw_text.with(String::is_empty)
                fallback=|| view! { }
            >
                <div class="raw-text">
                    <h3>"Raw Text"</h3>
                    <pre>{move || raw_text.get()}</pre>
                </div>
            </Show>
        </div>
    }
}
