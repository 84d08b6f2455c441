//! Document type picker.

use intelli_extract_core::CATEGORIES;
use leptos::*;

/// Emoji shown for a category icon tag.
pub fn icon_for(tag: &str) -> &'static str {
    match tag {
        "passport" => "🛂",
        "voterid" => "🗳️",
        "domicile" => "🏠",
        "license" => "🚗",
        "marksheet" => "📝",
        "aadhaar" => "🪪",
        _ => "📄",
    }
}

#[component]
pub fn CategoryList(
    /// Currently selected category id
    selected: Signal<Option<String>>,
    /// Called with the clicked category id
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="category-list">
            <h2>"Document Type"</h2>
            <ul>
                {CATEGORIES
                    .iter()
                    .map(|category| {
                        let id = category.id;
                        let is_active = move || selected.with(|s| s.as_deref() == Some(id));
                        view! {
                            <li>
                                <button
                                    class="category-item"
                                    class:active=is_active
                                    on:click=move |_| on_select.call(id.to_string())
                                >
                                    <span class="category-icon">{icon_for(category.icon_tag)}</span>
                                    <span class="category-name">{category.display_name}</span>
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_an_icon() {
        for category in CATEGORIES {
            assert_ne!(icon_for(category.icon_tag), "📄", "{}", category.id);
        }
        assert_eq!(icon_for("visa"), "📄");
    }
}
