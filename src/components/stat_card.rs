//! Stat Card Component
//!
//! Summary card showing one dashboard statistic.

use leptos::*;

/// Summary statistic card
#[component]
pub fn StatCard(
    /// Emoji icon shown next to the value
    icon: &'static str,
    /// Label above the value
    label: &'static str,
    /// Formatted value to display
    #[prop(into)]
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <div class="flex items-center space-x-3">
                <span class="text-3xl">{icon}</span>
                <div>
                    <p class="text-sm text-gray-500">{label}</p>
                    <p class="text-2xl font-bold">{move || value.get()}</p>
                </div>
            </div>
        </div>
    }
}
