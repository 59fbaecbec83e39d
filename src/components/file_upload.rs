//! File Upload Component
//!
//! CSV file picker reporting the selected file to its parent.

use leptos::*;
use wasm_bindgen::JsCast;

/// CSV file picker.
///
/// Calls `on_select` with the chosen file; the parent owns the upload.
#[component]
pub fn FileUpload(
    /// Prompt shown inside the drop zone
    label: &'static str,
    /// Called with the selected file
    #[prop(into)]
    on_select: Callback<web_sys::File>,
) -> impl IntoView {
    let (selected_name, set_selected_name) = create_signal(None::<String>);

    let handle_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        if let Some(files) = input.files() {
            if let Some(file) = files.get(0) {
                set_selected_name.set(Some(file.name()));
                on_select.call(file);
            }
        }
    };

    view! {
        <label
            class="flex items-center justify-center px-4 py-6 bg-gray-50 hover:bg-gray-100
                   rounded-lg cursor-pointer transition-colors
                   border-2 border-dashed border-gray-300 hover:border-blue-400"
        >
            <input
                type="file"
                accept=".csv"
                class="hidden"
                on:change=handle_change
            />
            <span class="flex items-center gap-2 text-sm text-gray-600">
                <span>"📄"</span>
                {move || {
                    selected_name.get().unwrap_or_else(|| label.to_string())
                }}
            </span>
        </label>
    }
}
