//! Dashboard Page
//!
//! Overview of the merged dataset: summary statistics, the daily passenger
//! chart with train/city filters, today's events and the upcoming events
//! and holidays.

use leptos::*;

use crate::api;
use crate::api::{DateInfo, FutureEventsResponse};
use crate::components::{Chart, ChartKind, ChartTypeToggle, Loading, StatCard};
use crate::format::{format_date_fr, format_number_fr};
use crate::state::global::{
    daily_series, filter_records, preview_stats, unique_values, DayPoint, MergedRecord,
    PreviewStats,
};
use crate::state::GlobalState;

/// Sentinel select value meaning "no filter"
const ALL: &str = "all";

/// Main dashboard page
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let future = create_rw_signal(FutureEventsResponse::default());
    let date_info = create_rw_signal(None::<DateInfo>);

    let selected_train = create_rw_signal(ALL.to_string());
    let selected_ville = create_rw_signal(ALL.to_string());
    let chart_kind = create_rw_signal(ChartKind::Line);

    // Load everything on mount. Future events and today's summary are
    // optional decorations, their failures only warn.
    create_effect(move |_| {
        spawn_local(async move {
            state.load_preview().await;
        });
        spawn_local(async move {
            match api::fetch_future_events().await {
                Ok(response) => future.set(response),
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("No future events available: {}", e).into(),
                    );
                }
            }
            match api::fetch_current_date_info().await {
                Ok(info) => date_info.set(Some(info)),
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("No current date info available: {}", e).into(),
                    );
                }
            }
        });
    });

    let records = create_memo(move |_| {
        state
            .preview
            .get()
            .map(|p| p.merged_data)
            .unwrap_or_default()
    });

    let trains = create_memo(move |_| unique_values(&records.get(), |r| &r.train_id));
    let villes = create_memo(move |_| unique_values(&records.get(), |r| &r.ville_arrivee));

    let filtered = create_memo(move |_| {
        let train = selected_train.get();
        let ville = selected_ville.get();
        filter_records(
            &records.get(),
            (train != ALL).then_some(train.as_str()),
            (ville != ALL).then_some(ville.as_str()),
        )
    });

    let stats = create_memo(move |_| preview_stats(&records.get()));
    let series = Signal::derive(move || daily_series(&filtered.get()));

    let retry = move |_| {
        state.clear_error();
        spawn_local(async move {
            state.load_preview().await;
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-500 mt-1">
                    "Vue d'ensemble du trafic passagers et des prédictions"
                </p>
            </div>

            {move || {
                state.error.get().map(|message| view! {
                    <div class="bg-red-50 border border-red-200 rounded-lg p-4
                                flex items-center justify-between">
                        <p class="text-red-700">{message}</p>
                        <button
                            on:click=retry
                            class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white
                                   rounded-lg text-sm font-medium transition-colors"
                        >
                            "Réessayer"
                        </button>
                    </div>
                })
            }}

            {move || {
                if state.preview.get().is_none() {
                    view! { <Loading /> }.into_view()
                } else {
                    view! {
                        <DashboardContent
                            records
                            trains
                            villes
                            selected_train
                            selected_ville
                            chart_kind
                            series
                            stats
                            future
                            date_info
                        />
                    }
                    .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn DashboardContent(
    records: Memo<Vec<MergedRecord>>,
    trains: Memo<Vec<String>>,
    villes: Memo<Vec<String>>,
    selected_train: RwSignal<String>,
    selected_ville: RwSignal<String>,
    chart_kind: RwSignal<ChartKind>,
    series: Signal<Vec<DayPoint>>,
    stats: Memo<PreviewStats>,
    future: RwSignal<FutureEventsResponse>,
    date_info: RwSignal<Option<DateInfo>>,
) -> impl IntoView {
    let range_text = move || {
        stats
            .get()
            .date_range
            .map(|r| format!("{} - {}", format_date_fr(&r.start), format_date_fr(&r.end)))
            .unwrap_or_else(|| "N/A".to_string())
    };

    view! {
        // Summary statistics
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
            <StatCard
                icon="📊"
                label="Enregistrements"
                value=Signal::derive(move || {
                    format_number_fr(stats.get().total_records as f64)
                })
            />
            <StatCard
                icon="🎉"
                label="Jours avec événements"
                value=Signal::derive(move || {
                    format_number_fr(stats.get().event_days as f64)
                })
            />
            <StatCard
                icon="🏖️"
                label="Jours de vacances"
                value=Signal::derive(move || {
                    format_number_fr(stats.get().holiday_days as f64)
                })
            />
            <StatCard
                icon="📅"
                label="Plage de dates"
                value=Signal::derive(range_text)
            />
        </div>

        // Today's summary
        {move || date_info.get().map(|info| view! { <TodayCard info /> })}

        // Chart with filters
        <div class="bg-white border border-gray-200 rounded-lg p-6 space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <h2 class="text-xl font-semibold">"Passagers par jour"</h2>
                <ChartTypeToggle
                    kind=chart_kind
                    set_kind=move |k| chart_kind.set(k)
                />
            </div>

            <div class="flex flex-wrap gap-4">
                <FilterSelect
                    label="Train"
                    all_label="Tous les trains"
                    options=trains
                    selected=selected_train
                />
                <FilterSelect
                    label="Ville d'arrivée"
                    all_label="Toutes les villes"
                    options=villes
                    selected=selected_ville
                />
            </div>

            <Chart series kind=chart_kind />

            {move || {
                (!records.get().is_empty()).then(|| view! {
                    <p class="text-xs text-gray-400">
                        {format!(
                            "{} jours affichés",
                            series.get().len()
                        )}
                    </p>
                })
            }}
        </div>

        // Upcoming events and holidays
        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
            <FutureEventsPanel future />
            <FutureHolidaysPanel future />
        </div>
    }
}

#[component]
fn FilterSelect(
    label: &'static str,
    all_label: &'static str,
    options: Memo<Vec<String>>,
    selected: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label class="flex items-center space-x-2 text-sm">
            <span class="text-gray-500">{label}</span>
            <select
                class="border border-gray-300 rounded-lg px-3 py-2 bg-white"
                on:change=move |ev| selected.set(event_target_value(&ev))
                prop:value=move || selected.get()
            >
                <option value=ALL>{all_label}</option>
                {move || {
                    options.get()
                        .into_iter()
                        .map(|value| view! {
                            <option value=value.clone()>{value.clone()}</option>
                        })
                        .collect_view()
                }}
            </select>
        </label>
    }
}

/// Card showing today's date, its predicted average and its annotations
#[component]
fn TodayCard(info: DateInfo) -> impl IntoView {
    let average = info
        .average_prediction
        .map(format_number_fr)
        .map(|n| format!("{} passagers prévus en moyenne", n));

    view! {
        <div class="bg-blue-50 border border-blue-200 rounded-lg p-6">
            <div class="flex items-center space-x-3 mb-2">
                <span class="text-2xl">"📅"</span>
                <h2 class="text-lg font-semibold">
                    {format!("Aujourd'hui, {}", info.formatted_date)}
                </h2>
            </div>

            {average.map(|text| view! {
                <p class="text-blue-700 font-medium">{text}</p>
            })}

            {(!info.events.is_empty()).then(|| view! {
                <div class="mt-3 space-y-1">
                    {info.events.iter().map(|e| view! {
                        <p class="text-sm text-orange-700">
                            "🎉 " {e.name.clone()}
                            {e.description.clone().map(|d| format!(" : {}", d))}
                        </p>
                    }).collect_view()}
                </div>
            })}

            {(!info.holidays.is_empty()).then(|| view! {
                <div class="mt-2 space-y-1">
                    {info.holidays.iter().map(|h| view! {
                        <p class="text-sm text-green-700">
                            "🏖️ " {h.name.clone()}
                            {(h.duration > 0).then(|| format!(
                                " (jour {} sur {})",
                                h.day_in_sequence, h.duration
                            ))}
                        </p>
                    }).collect_view()}
                </div>
            })}

            {(!info.has_events && !info.has_holidays).then(|| view! {
                <p class="text-sm text-gray-500">
                    "Aucun événement ni vacance aujourd'hui"
                </p>
            })}
        </div>
    }
}

#[component]
fn FutureEventsPanel(future: RwSignal<FutureEventsResponse>) -> impl IntoView {
    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <h2 class="text-lg font-semibold mb-4">"Événements à venir"</h2>
            {move || {
                let events = future.get().future_events;
                if events.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Aucun événement à venir"</p>
                    }
                    .into_view()
                } else {
                    events.into_iter().map(|event| view! {
                        <div class="border-l-4 border-orange-400 bg-orange-50
                                    rounded-r-lg p-3 mb-2">
                            <p class="text-sm font-medium text-orange-800">
                                {format_date_fr(&event.date)}
                            </p>
                            <p class="text-sm text-orange-700">
                                {event.description.unwrap_or_else(|| "Événement".to_string())}
                            </p>
                        </div>
                    }).collect_view()
                }
            }}
        </div>
    }
}

#[component]
fn FutureHolidaysPanel(future: RwSignal<FutureEventsResponse>) -> impl IntoView {
    view! {
        <div class="bg-white border border-gray-200 rounded-lg p-6">
            <h2 class="text-lg font-semibold mb-4">"Vacances à venir"</h2>
            {move || {
                let holidays = future.get().future_holidays;
                if holidays.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Aucune vacance à venir"</p>
                    }
                    .into_view()
                } else {
                    holidays.into_iter().map(|holiday| view! {
                        <div class="border-l-4 border-green-400 bg-green-50
                                    rounded-r-lg p-3 mb-2">
                            <p class="text-sm font-medium text-green-800">
                                {format_date_fr(&holiday.date)}
                            </p>
                            <p class="text-sm text-green-700">
                                {holiday.titre.unwrap_or_else(|| "Vacances".to_string())}
                                {(holiday.duree_totale > 0).then(|| format!(
                                    " (jour {} sur {})",
                                    holiday.jour_dans_sequence, holiday.duree_totale
                                ))}
                            </p>
                        </div>
                    }).collect_view()
                }
            }}
        </div>
    }
}
