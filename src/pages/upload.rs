//! Upload & Training Page
//!
//! The data management workflow: upload the three CSV sources, inspect and
//! correct the merged result row by row, then train a model on it.

use leptos::*;

use crate::api;
use crate::api::{ApiError, RowKey, SingleUploadResult};
use crate::components::{FileUpload, PredictionTable};
use crate::export;
use crate::format::{format_date_fr, format_number_fr, format_percentage};
use crate::pages::{r2_text_class, DEFAULT_DAYS, MAX_DAYS, MIN_DAYS, MODEL_OPTIONS};
use crate::state::global::MergedRecord;
use crate::state::GlobalState;

/// How many merged rows the preview table shows
const PREVIEW_ROWS: usize = 10;

/// The three CSV sources the backend merges
#[derive(Clone, Copy, PartialEq, Eq)]
enum CsvKind {
    Passengers,
    Events,
    Holidays,
}

impl CsvKind {
    fn title(self) -> &'static str {
        match self {
            CsvKind::Passengers => "Passagers",
            CsvKind::Events => "Événements",
            CsvKind::Holidays => "Vacances",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            CsvKind::Passengers => "Date, Train_ID, Ville_Arrivee, Nombre_Passagers",
            CsvKind::Events => "Date, Description_Evenement",
            CsvKind::Holidays => "Date_Debut, Date_Fin, Titre_Vacances",
        }
    }

    async fn upload(self, file: &web_sys::File) -> Result<SingleUploadResult, ApiError> {
        match self {
            CsvKind::Passengers => api::upload_passengers(file).await,
            CsvKind::Events => api::upload_events(file).await,
            CsvKind::Holidays => api::upload_holidays(file).await,
        }
    }
}

#[derive(Clone, PartialEq, Default)]
enum SlotStatus {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Failed(String),
}

/// Upload and training page
#[component]
pub fn UploadTrain() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    create_effect(move |_| {
        spawn_local(async move {
            state.load_preview().await;
        });
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Upload & Entraînement"</h1>
                <p class="text-gray-500 mt-1">
                    "Chargez vos fichiers CSV, vérifiez la fusion puis entraînez un modèle"
                </p>
            </div>

            <UploadSection />
            <MergePreview />
            <TrainingSection />
        </div>
    }
}

#[component]
fn UploadSection() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let passengers = create_rw_signal(None::<web_sys::File>);
    let events = create_rw_signal(None::<web_sys::File>);
    let holidays = create_rw_signal(None::<web_sys::File>);

    let all_selected = move || {
        passengers.get().is_some() && events.get().is_some() && holidays.get().is_some()
    };

    // One-shot upload of the three files in a single multipart request
    let upload_all = move |_| {
        let (Some(p), Some(e), Some(h)) = (passengers.get(), events.get(), holidays.get())
        else {
            state.show_error("Aucun fichier sélectionné");
            return;
        };

        spawn_local(async move {
            if let Ok(result) = state.upload_files(&p, &e, &h).await {
                state.show_success(&result.message);
            }
        });
    };

    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <h2 class="text-xl font-semibold mb-4">"1. Fichiers CSV"</h2>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                <UploadSlot kind=CsvKind::Passengers file=passengers />
                <UploadSlot kind=CsvKind::Events file=events />
                <UploadSlot kind=CsvKind::Holidays file=holidays />
            </div>

            <div class="mt-6 flex items-center space-x-3">
                <button
                    on:click=upload_all
                    disabled=move || !all_selected() || state.loading.get()
                    class="px-6 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || {
                        if state.loading.get() {
                            "Upload en cours..."
                        } else {
                            "Uploader et fusionner les trois fichiers"
                        }
                    }}
                </button>
                <p class="text-xs text-gray-400">
                    "Ou uploadez chaque fichier séparément ci-dessus"
                </p>
            </div>
        </div>
    }
}

#[component]
fn UploadSlot(kind: CsvKind, file: RwSignal<Option<web_sys::File>>) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let status = create_rw_signal(SlotStatus::Idle);

    let upload = move |_| {
        let Some(selected) = file.get() else {
            status.set(SlotStatus::Failed("Aucun fichier sélectionné".to_string()));
            return;
        };

        status.set(SlotStatus::Uploading);
        spawn_local(async move {
            match kind.upload(&selected).await {
                Ok(result) => {
                    status.set(SlotStatus::Uploaded);
                    state.show_success(&result.message);
                    // The merge only exists once all three files are in
                    if result.merged_available {
                        state.load_preview().await;
                    }
                }
                Err(e) => {
                    status.set(SlotStatus::Failed(e.display_message()));
                }
            }
        });
    };

    view! {
        <div class="space-y-3">
            <div>
                <h3 class="font-medium">{kind.title()}</h3>
                <p class="text-xs text-gray-400">{kind.hint()}</p>
            </div>

            <FileUpload
                label="Choisir un fichier CSV"
                on_select=move |f| {
                    file.set(Some(f));
                    status.set(SlotStatus::Idle);
                }
            />

            <button
                on:click=upload
                disabled=move || status.get() == SlotStatus::Uploading
                class="w-full px-4 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300
                       text-white rounded-lg text-sm font-medium transition-colors"
            >
                {move || {
                    if status.get() == SlotStatus::Uploading {
                        "Upload en cours..."
                    } else {
                        "Uploader"
                    }
                }}
            </button>

            {move || match status.get() {
                SlotStatus::Uploaded => view! {
                    <p class="text-sm text-green-600">"✓ Uploadé"</p>
                }
                .into_view(),
                SlotStatus::Failed(message) => view! {
                    <p class="text-sm text-red-600">{message}</p>
                }
                .into_view(),
                _ => ().into_view(),
            }}
        </div>
    }
}

#[component]
fn MergePreview() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    // Index of the row being edited and the draft passenger count
    let editing = create_rw_signal(None::<(usize, String)>);

    let records = create_memo(move |_| {
        state
            .preview
            .get()
            .map(|p| p.merged_data)
            .unwrap_or_default()
    });

    let reset_all = move |_| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(
                    "Êtes-vous sûr de vouloir réinitialiser toutes les données ?",
                )
                .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        spawn_local(async move {
            match api::reset_data().await {
                Ok(()) => {
                    state.preview.set(None);
                    state.predictions.set(None);
                    state.history.set(Vec::new());
                    state.show_success("Toutes les données ont été réinitialisées");
                    state.load_preview().await;
                }
                Err(e) => state.show_error(&e.display_message()),
            }
        });
    };

    let delete = move |record: MergedRecord| {
        spawn_local(async move {
            let key = RowKey {
                date: Some(record.date),
                train_id: Some(record.train_id),
                ville_arrivee: Some(record.ville_arrivee),
                ..RowKey::default()
            };
            match api::delete_row(&key).await {
                Ok(response) => {
                    state.show_success(&response.message);
                    state.load_preview().await;
                }
                Err(e) => state.show_error(&e.display_message()),
            }
        });
    };

    let save_edit = move |(record, draft): (MergedRecord, String)| {
        let Ok(passengers) = draft.trim().parse::<f64>() else {
            state.show_error("Nombre de passagers invalide");
            return;
        };

        spawn_local(async move {
            let key = RowKey {
                date: Some(record.date),
                train_id: Some(record.train_id),
                ville_arrivee: Some(record.ville_arrivee),
                ..RowKey::default()
            };
            let mut fields = serde_json::Map::new();
            fields.insert("Nombre_Passagers".to_string(), passengers.into());

            match api::edit_row(&key, fields).await {
                Ok(response) => {
                    editing.set(None);
                    state.show_success(&response.message);
                    state.load_preview().await;
                }
                Err(e) => state.show_error(&e.display_message()),
            }
        });
    };

    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"2. Données fusionnées"</h2>
                <button
                    on:click=reset_all
                    class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white
                           rounded-lg text-sm font-medium transition-colors"
                >
                    "Réinitialiser tout"
                </button>
            </div>

            {move || {
                state.preview.get().filter(|p| p.total_records > 0).map(|preview| {
                    let range = preview
                        .date_range
                        .map(|r| format!(
                            "{} - {}",
                            format_date_fr(&r.start),
                            format_date_fr(&r.end)
                        ))
                        .unwrap_or_else(|| "N/A".to_string());

                    view! {
                        <div class="flex flex-wrap gap-6 text-sm text-gray-600 mb-4">
                            <span>
                                "📊 " {format_number_fr(preview.total_records as f64)}
                                " enregistrements"
                            </span>
                            <span>
                                "🎉 " {format_number_fr(preview.events_count as f64)}
                                " événements"
                            </span>
                            <span>
                                "🏖️ " {format_number_fr(preview.holidays_count as f64)}
                                " vacances"
                            </span>
                            <span>"📅 " {range}</span>
                            {preview.last_updated.map(|updated| view! {
                                <span class="text-gray-400">
                                    {format!("Mis à jour : {}", updated)}
                                </span>
                            })}
                        </div>
                    }
                })
            }}

            {move || {
                let rows = records.get();
                if rows.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">
                            "Aucune donnée fusionnée. Uploadez les trois fichiers CSV pour commencer."
                        </p>
                    }
                    .into_view()
                } else {
                    let total = rows.len();
                    view! {
                        <div class="overflow-x-auto">
                            <table class="w-full text-sm">
                                <thead>
                                    <tr class="border-b text-left">
                                        <th class="py-2 pr-4">"Date"</th>
                                        <th class="py-2 pr-4">"Train ID"</th>
                                        <th class="py-2 pr-4">"Ville d'arrivée"</th>
                                        <th class="py-2 pr-4">"Passagers"</th>
                                        <th class="py-2 pr-4">"Événement"</th>
                                        <th class="py-2 pr-4">"Vacance"</th>
                                        <th class="py-2">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows.into_iter()
                                        .take(PREVIEW_ROWS)
                                        .enumerate()
                                        .map(|(i, record)| view! {
                                            <MergedRow
                                                index=i
                                                record
                                                editing
                                                on_delete=delete
                                                on_save=save_edit
                                            />
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>

                            {(total > PREVIEW_ROWS).then(|| view! {
                                <p class="text-xs text-gray-500 mt-2">
                                    {format!(
                                        "Affichage des {} premières lignes sur {}",
                                        PREVIEW_ROWS, total
                                    )}
                                </p>
                            })}
                        </div>
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn MergedRow(
    index: usize,
    record: MergedRecord,
    editing: RwSignal<Option<(usize, String)>>,
    #[prop(into)]
    on_delete: Callback<MergedRecord>,
    #[prop(into)]
    on_save: Callback<(MergedRecord, String)>,
) -> impl IntoView {
    let row = store_value(record);
    let is_editing = move || editing.get().map(|(i, _)| i) == Some(index);

    view! {
        <tr class="border-b border-gray-200">
            <td class="py-2 pr-4">{move || format_date_fr(&row.with_value(|r| r.date.clone()))}</td>
            <td class="py-2 pr-4">{move || row.with_value(|r| r.train_id.clone())}</td>
            <td class="py-2 pr-4">{move || row.with_value(|r| r.ville_arrivee.clone())}</td>
            <td class="py-2 pr-4">
                {move || {
                    if is_editing() {
                        view! {
                            <input
                                type="number"
                                class="w-24 border border-gray-300 rounded px-2 py-1"
                                prop:value=move || {
                                    editing.get().map(|(_, v)| v).unwrap_or_default()
                                }
                                on:input=move |ev| {
                                    editing.set(Some((index, event_target_value(&ev))));
                                }
                            />
                        }
                        .into_view()
                    } else {
                        row.with_value(|r| format_number_fr(r.passengers)).into_view()
                    }
                }}
            </td>
            <td class="py-2 pr-4">
                {move || row.with_value(|r| if r.has_event() { "🎉" } else { "-" })}
            </td>
            <td class="py-2 pr-4">
                {move || row.with_value(|r| if r.has_holiday() { "🏖️" } else { "-" })}
            </td>
            <td class="py-2">
                {move || {
                    if is_editing() {
                        view! {
                            <div class="flex space-x-2">
                                <button
                                    class="text-green-600 hover:text-green-800 text-sm font-medium"
                                    on:click=move |_| {
                                        if let Some((_, draft)) = editing.get() {
                                            on_save.call((row.get_value(), draft));
                                        }
                                    }
                                >
                                    "Enregistrer"
                                </button>
                                <button
                                    class="text-gray-500 hover:text-gray-700 text-sm"
                                    on:click=move |_| editing.set(None)
                                >
                                    "Annuler"
                                </button>
                            </div>
                        }
                        .into_view()
                    } else {
                        view! {
                            <div class="flex space-x-2">
                                <button
                                    class="text-blue-600 hover:text-blue-800 text-sm"
                                    title="Modifier le nombre de passagers"
                                    on:click=move |_| {
                                        let current = row.with_value(|r| r.passengers);
                                        editing.set(Some((index, format!("{}", current))));
                                    }
                                >
                                    "✏️"
                                </button>
                                <button
                                    class="text-red-600 hover:text-red-800 text-sm"
                                    title="Supprimer la ligne"
                                    on:click=move |_| on_delete.call(row.get_value())
                                >
                                    "🗑️"
                                </button>
                            </div>
                        }
                        .into_view()
                    }
                }}
            </td>
        </tr>
    }
}

#[component]
fn TrainingSection() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let selected_model = create_rw_signal(MODEL_OPTIONS[0].value.to_string());
    let days = create_rw_signal(DEFAULT_DAYS.to_string());
    let training = create_rw_signal(false);

    let train = move |_| {
        let model = selected_model.get();
        let Ok(days_to_predict) = days.get().trim().parse::<u32>() else {
            state.show_error("Veuillez spécifier un nombre de jours valide");
            return;
        };
        if !(MIN_DAYS..=MAX_DAYS).contains(&days_to_predict) {
            state.show_error("Veuillez spécifier un nombre de jours valide");
            return;
        }

        training.set(true);
        spawn_local(async move {
            if state.train_and_predict(&model, days_to_predict).await.is_ok() {
                state.show_success("Modèle entraîné et prédictions générées");
                state.load_history().await;
            }
            training.set(false);
        });
    };

    let export = move |_| {
        let model = selected_model.get();
        spawn_local(async move {
            match api::export_predictions(None).await {
                Ok(csv) => {
                    let filename = export::export_filename(&model, &export::today_iso());
                    export::download_text(&csv, &filename);
                    state.show_success("Export CSV téléchargé");
                }
                Err(e) => state.show_error(&e.display_message()),
            }
        });
    };

    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6 space-y-6">
            <h2 class="text-xl font-semibold">"3. Entraînement du modèle"</h2>

            // Model picker
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {MODEL_OPTIONS.iter().map(|model| {
                    let value = model.value;
                    view! {
                        <button
                            on:click=move |_| selected_model.set(value.to_string())
                            class=move || {
                                let base = "text-left border-2 rounded-lg p-4 transition-colors";
                                if selected_model.get() == value {
                                    format!("{} border-blue-500 bg-blue-50", base)
                                } else {
                                    format!("{} border-gray-200 hover:border-gray-300", base)
                                }
                            }
                        >
                            <p class="font-medium">{model.label}</p>
                            <p class="text-xs text-gray-500 mt-1">{model.description}</p>
                        </button>
                    }
                }).collect_view()}
            </div>

            // Horizon and launch
            <div class="flex flex-wrap items-end gap-4">
                <label class="block">
                    <span class="text-sm text-gray-500">"Jours à prédire (1-365)"</span>
                    <input
                        type="number"
                        min=MIN_DAYS
                        max=MAX_DAYS
                        class="block mt-1 w-32 border border-gray-300 rounded-lg px-3 py-2"
                        prop:value=move || days.get()
                        on:input=move |ev| days.set(event_target_value(&ev))
                    />
                </label>

                <button
                    on:click=train
                    disabled=move || training.get()
                    class="px-6 py-2 bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || {
                        if training.get() {
                            "Entraînement en cours..."
                        } else {
                            "Entraîner et prédire"
                        }
                    }}
                </button>
            </div>

            // Results of the last run
            {move || {
                state.predictions.get().map(|result| {
                    let r2 = result.model_performance.r2;
                    let mse = result.model_performance.mse;
                    let predictions = result.predictions.clone();

                    view! {
                        <div class="space-y-4 pt-4 border-t border-gray-200">
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

                            <PredictionTable predictions=Signal::derive(move || {
                                predictions.clone()
                            }) />

                            <button
                                on:click=export
                                class="px-4 py-2 bg-green-600 hover:bg-green-700 text-white
                                       rounded-lg text-sm font-medium transition-colors"
                            >
                                "📥 Exporter en CSV"
                            </button>
                        </div>
                    }
                })
            }}
        </div>
    }
}
