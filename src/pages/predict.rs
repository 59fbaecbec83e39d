//! Prediction Page
//!
//! Launch a prediction run against the trained backend and browse the
//! history of past sessions, with CSV export for both.

use leptos::*;

use crate::api;
use crate::components::{Chart, ChartKind, ChartTypeToggle, ListSkeleton, PredictionTable};
use crate::export;
use crate::format::{format_date_fr, format_percentage};
use crate::pages::{
    model_label, r2_text_class, status_badge_class, status_label, DEFAULT_DAYS, MAX_DAYS,
    MIN_DAYS, MODEL_OPTIONS,
};
use crate::state::global::{prediction_series, PredictionRecord, TrainResult};
use crate::state::GlobalState;

/// Prediction page
#[component]
pub fn Predict() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let selected_model = create_rw_signal(String::new());
    let days = create_rw_signal(DEFAULT_DAYS.to_string());
    let predicting = create_rw_signal(false);
    let history_loading = create_rw_signal(true);
    let chart_kind = create_rw_signal(ChartKind::Line);

    create_effect(move |_| {
        spawn_local(async move {
            state.load_history().await;
            history_loading.set(false);
        });
    });

    let predict = move |_| {
        let model = selected_model.get();
        if model.is_empty() {
            state.show_error("Veuillez sélectionner un modèle");
            return;
        }
        let parsed = days.get().trim().parse::<u32>();
        let Ok(days_to_predict) = parsed else {
            state.show_error("Veuillez spécifier un nombre de jours valide");
            return;
        };
        if !(MIN_DAYS..=MAX_DAYS).contains(&days_to_predict) {
            state.show_error("Veuillez spécifier un nombre de jours valide");
            return;
        }

        predicting.set(true);
        spawn_local(async move {
            if state.train_and_predict(&model, days_to_predict).await.is_ok() {
                state.show_success("Prédictions générées");
                state.load_history().await;
            }
            predicting.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Prédiction"</h1>
                <p class="text-gray-500 mt-1">
                    "Générez des prédictions de trafic et consultez l'historique"
                </p>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                // Configuration column
                <div class="bg-white border border-gray-200 rounded-lg p-6 space-y-4">
                    <h2 class="text-lg font-semibold">"Configuration"</h2>

                    <label class="block">
                        <span class="text-sm text-gray-500">"Modèle"</span>
                        <select
                            class="block mt-1 w-full border border-gray-300 rounded-lg
                                   px-3 py-2 bg-white"
                            on:change=move |ev| selected_model.set(event_target_value(&ev))
                            prop:value=move || selected_model.get()
                        >
                            <option value="">"Sélectionner un modèle"</option>
                            {MODEL_OPTIONS.iter().map(|model| view! {
                                <option value=model.value>{model.label}</option>
                            }).collect_view()}
                        </select>
                    </label>

                    <label class="block">
                        <span class="text-sm text-gray-500">"Jours à prédire (1-365)"</span>
                        <input
                            type="number"
                            min=MIN_DAYS
                            max=MAX_DAYS
                            class="block mt-1 w-full border border-gray-300 rounded-lg px-3 py-2"
                            prop:value=move || days.get()
                            on:input=move |ev| days.set(event_target_value(&ev))
                        />
                    </label>

                    <button
                        on:click=predict
                        disabled=move || predicting.get()
                        class="w-full px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300
                               text-white rounded-lg font-medium transition-colors"
                    >
                        {move || {
                            if predicting.get() {
                                "Prédiction en cours..."
                            } else {
                                "Lancer la prédiction"
                            }
                        }}
                    </button>
                </div>

                // Results column
                <div class="lg:col-span-2 space-y-6">
                    {move || match state.predictions.get() {
                        Some(result) => view! {
                            <PredictionResults result chart_kind model=selected_model />
                        }
                        .into_view(),
                        None => view! {
                            <div class="bg-white border border-gray-200 rounded-lg p-12
                                        text-center text-gray-400">
                                <div class="text-4xl mb-2">"🔮"</div>
                                <p>"Lancez une prédiction pour voir les résultats ici"</p>
                            </div>
                        }
                        .into_view(),
                    }}
                </div>
            </div>

            <HistoryPanel loading=history_loading />
        </div>
    }
}

#[component]
fn PredictionResults(
    result: TrainResult,
    chart_kind: RwSignal<ChartKind>,
    model: RwSignal<String>,
) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let r2 = result.model_performance.r2;
    let mse = result.model_performance.mse;
    let predictions = store_value(result.predictions);

    let export_server = move |_| {
        let model_type = model.get();
        spawn_local(async move {
            match api::export_predictions(None).await {
                Ok(csv) => {
                    let filename =
                        export::export_filename(&model_type, &export::today_iso());
                    export::download_text(&csv, &filename);
                    state.show_success("Export CSV téléchargé");
                }
                Err(e) => state.show_error(&e.display_message()),
            }
        });
    };

    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold">"Résultats"</h2>
                <ChartTypeToggle
                    kind=chart_kind
                    set_kind=move |k| chart_kind.set(k)
                />
            </div>

            <div class="grid grid-cols-2 gap-4">
                <div class="bg-gray-50 rounded-lg p-4">
                    <p class="text-sm text-gray-500">"Score R²"</p>
                    <p class=format!("text-2xl font-bold {}", r2_text_class(r2))>
                        {format_percentage(r2)}
                    </p>
                </div>
                <div class="bg-gray-50 rounded-lg p-4">
                    <p class="text-sm text-gray-500">"MSE"</p>
                    <p class="text-2xl font-bold">{format!("{:.2}", mse)}</p>
                </div>
            </div>

            <Chart
                series=Signal::derive(move || {
                    predictions.with_value(|p| prediction_series(p))
                })
                kind=chart_kind
            />

            <PredictionTable predictions=Signal::derive(move || {
                predictions.get_value()
            }) />

            <button
                on:click=export_server
                class="px-4 py-2 bg-green-600 hover:bg-green-700 text-white
                       rounded-lg text-sm font-medium transition-colors"
            >
                "📥 Exporter en CSV"
            </button>
        </div>
    }
}

#[component]
fn HistoryPanel(loading: RwSignal<bool>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <h2 class="text-lg font-semibold mb-4">"Historique des prédictions"</h2>

            {move || {
                if loading.get() {
                    return view! { <ListSkeleton /> }.into_view();
                }

                let history = state.history.get();
                if history.is_empty() {
                    view! {
                        <div class="text-center py-8 text-gray-400">
                            <p class="font-medium">"Aucune prédiction dans l'historique"</p>
                            <p class="text-sm mt-1">
                                "Effectuez votre première prédiction pour commencer"
                            </p>
                        </div>
                    }
                    .into_view()
                } else {
                    history
                        .into_iter()
                        .map(|record| view! { <HistoryEntry record /> })
                        .collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn HistoryEntry(record: PredictionRecord) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let status = record.status.clone();
    let model_type = record.model_type.clone();
    let r2 = record.model_performance.r2;
    let mse = record.model_performance.mse;
    let created = record.created_at.clone();
    let predictions = store_value(record.predictions);

    // Export this session from the copy embedded in the history record,
    // without a round trip to the backend
    let export_local = {
        let model_type = model_type.clone();
        move |_| {
            let csv = predictions.with_value(|p| export::predictions_csv(p));
            let filename = export::export_filename(&model_type, &export::today_iso());
            export::download_text(&csv, &filename);
            state.show_success("Export CSV téléchargé");
        }
    };

    view! {
        <div class="border border-gray-200 rounded-lg p-4 mb-3
                    flex flex-wrap items-center justify-between gap-4">
            <div>
                <div class="flex items-center space-x-2">
                    <p class="font-medium">{model_label(&model_type).to_string()}</p>
                    <span class=format!(
                        "inline-flex items-center px-2 py-1 rounded-full text-xs font-medium {}",
                        status_badge_class(&status)
                    )>
                        {status_label(&status)}
                    </span>
                </div>
                <p class="text-sm text-gray-500 mt-1">
                    {format!(
                        "{} jours, {} prédictions",
                        record.days_predicted, record.predictions_count
                    )}
                </p>
                <p class="text-xs text-gray-400">{format_date_fr(&created)}</p>
            </div>

            <div class="flex items-center space-x-6">
                <div class="text-right">
                    <p class="text-xs text-gray-500">"R²"</p>
                    <p class=format!("font-semibold {}", r2_text_class(r2))>
                        {format_percentage(r2)}
                    </p>
                </div>
                <div class="text-right">
                    <p class="text-xs text-gray-500">"MSE"</p>
                    <p class="font-semibold">{format!("{:.2}", mse)}</p>
                </div>
                <button
                    on:click=export_local
                    class="px-3 py-2 bg-gray-100 hover:bg-gray-200 text-gray-700
                           rounded-lg text-sm font-medium transition-colors"
                >
                    "📥 CSV"
                </button>
            </div>
        </div>
    }
}
