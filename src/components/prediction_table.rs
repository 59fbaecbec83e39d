//! Prediction Table Component
//!
//! Table of generated predictions, capped at the first rows.

use leptos::*;

use crate::format::format_number_fr;
use crate::state::global::Prediction;

/// How many predictions the table shows before truncating
const PREVIEW_ROWS: usize = 10;

/// Table of predictions with event/holiday badges
#[component]
pub fn PredictionTable(
    #[prop(into)]
    predictions: Signal<Vec<Prediction>>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-50 rounded-lg p-3 max-h-60 overflow-auto">
            <table class="w-full text-sm">
                <thead>
                    <tr class="border-b text-left">
                        <th class="py-2">"Date"</th>
                        <th class="py-2">"Train ID"</th>
                        <th class="py-2">"Ville"</th>
                        <th class="py-2">"Passagers"</th>
                        <th class="py-2">"Événement"</th>
                        <th class="py-2">"Vacance"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        predictions.get()
                            .into_iter()
                            .take(PREVIEW_ROWS)
                            .map(|pred| view! { <PredictionRow pred /> })
                            .collect_view()
                    }}
                </tbody>
            </table>

            {move || {
                let total = predictions.get().len();
                (total > PREVIEW_ROWS).then(|| view! {
                    <p class="text-xs text-gray-500 mt-2">
                        {format!(
                            "Affichage des {} premières prédictions sur {}",
                            PREVIEW_ROWS, total
                        )}
                    </p>
                })
            }}
        </div>
    }
}

#[component]
fn PredictionRow(pred: Prediction) -> impl IntoView {
    view! {
        <tr class="border-b border-gray-200">
            <td class="py-2">{pred.date.clone()}</td>
            <td class="py-2">{pred.train_id.clone()}</td>
            <td class="py-2">{pred.ville_arrivee.clone()}</td>
            <td class="py-2 font-medium">{format_number_fr(pred.predicted_passengers)}</td>
            <td class="py-2">
                {if pred.event_present == 1 {
                    let name = pred.event_name.clone().unwrap_or_else(|| "Événement".to_string());
                    view! {
                        <span class="inline-flex items-center px-2 py-1 rounded-full text-xs font-medium bg-orange-100 text-orange-800">
                            {name}
                        </span>
                    }.into_view()
                } else {
                    view! { <span class="text-gray-400 text-xs">"-"</span> }.into_view()
                }}
            </td>
            <td class="py-2">
                {if pred.vacance_present == 1 {
                    let name = pred.vacance_name.clone().unwrap_or_else(|| "Vacance".to_string());
                    view! {
                        <span class="inline-flex items-center px-2 py-1 rounded-full text-xs font-medium bg-blue-100 text-blue-800">
                            {name}
                        </span>
                    }.into_view()
                } else {
                    view! { <span class="text-gray-400 text-xs">"-"</span> }.into_view()
                }}
            </td>
        </tr>
    }
}
