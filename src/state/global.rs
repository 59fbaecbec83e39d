//! Global Application State
//!
//! Reactive state management using Leptos signals, plus the entities
//! deserialized from the backend and the pure derivation helpers used to
//! turn flat record arrays into chart- and table-ready data.

use leptos::*;
use std::collections::BTreeMap;

use crate::api;
use crate::api::{ApiError, UploadResult};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Merged-data preview from the backend
    pub preview: RwSignal<Option<DataPreview>>,
    /// Result of the last train-and-predict run
    pub predictions: RwSignal<Option<TrainResult>>,
    /// Past prediction sessions
    pub history: RwSignal<Vec<PredictionRecord>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

// ============ Entities (deserialized from the backend, never mutated) ============

/// One row of the server-side merge of passengers, events and holidays.
///
/// Field names follow the backend's CSV column names.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MergedRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Train_ID")]
    pub train_id: String,
    #[serde(rename = "Ville_Arrivee")]
    pub ville_arrivee: String,
    #[serde(rename = "Nombre_Passagers", default)]
    pub passengers: f64,
    #[serde(rename = "Evenement_Present", default)]
    pub event_present: f64,
    #[serde(rename = "Vacance", default)]
    pub vacance: f64,
    #[serde(rename = "Description_Evenement", default)]
    pub event_name: Option<String>,
    #[serde(rename = "Titre_Vacances", default)]
    pub vacance_name: Option<String>,
}

impl MergedRecord {
    pub fn has_event(&self) -> bool {
        self.event_present == 1.0
    }

    pub fn has_holiday(&self) -> bool {
        self.vacance == 1.0
    }
}

/// A single predicted passenger count for one train/city/day
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Prediction {
    pub date: String,
    pub train_id: String,
    pub ville_arrivee: String,
    pub predicted_passengers: f64,
    #[serde(default)]
    pub event_present: u8,
    #[serde(default)]
    pub vacance_present: u8,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub vacance_name: Option<String>,
    #[serde(default)]
    pub vacance_duration: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ModelPerformance {
    #[serde(default)]
    pub r2: f64,
    #[serde(default)]
    pub mse: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Response of a train-and-predict run
#[derive(Clone, Debug, serde::Deserialize)]
pub struct TrainResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub model_performance: ModelPerformance,
    #[serde(default)]
    pub prediction_count: usize,
    #[serde(default)]
    pub prediction_id: u32,
}

/// A past prediction session from `/prediction-history`
#[derive(Clone, Debug, serde::Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub id: u32,
    pub model_type: String,
    #[serde(default)]
    pub days_predicted: u32,
    #[serde(default)]
    pub predictions_count: usize,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub model_performance: ModelPerformance,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Merged-data preview and statistics from `/data-preview`
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct DataPreview {
    #[serde(default)]
    pub total_records: usize,
    #[serde(default)]
    pub passengers_count: usize,
    #[serde(default)]
    pub events_count: i64,
    #[serde(default)]
    pub holidays_count: i64,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub merged_data: Vec<MergedRecord>,
}

// ============ Derived chart data ============

/// One chart point: a calendar day with its rounded mean passenger count
/// and the day's event/holiday annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct DayPoint {
    /// ISO date (sort key)
    pub date: String,
    /// Rounded mean passengers for the day
    pub value: f64,
    pub has_event: bool,
    pub event_name: Option<String>,
    pub has_holiday: bool,
    pub holiday_name: Option<String>,
}

#[derive(Default)]
struct DayAccumulator {
    total: f64,
    count: usize,
    has_event: bool,
    event_name: Option<String>,
    has_holiday: bool,
    holiday_name: Option<String>,
}

impl DayAccumulator {
    fn add(
        &mut self,
        value: f64,
        has_event: bool,
        event_name: Option<&str>,
        has_holiday: bool,
        holiday_name: Option<&str>,
    ) {
        self.total += value;
        self.count += 1;
        self.has_event |= has_event;
        self.has_holiday |= has_holiday;
        // Keep the first non-empty name seen for the day
        if self.event_name.is_none() {
            self.event_name = event_name.filter(|n| !n.is_empty()).map(str::to_string);
        }
        if self.holiday_name.is_none() {
            self.holiday_name = holiday_name.filter(|n| !n.is_empty()).map(str::to_string);
        }
    }

    fn finish(self, date: String) -> DayPoint {
        let mean = if self.count > 0 {
            (self.total / self.count as f64).round()
        } else {
            0.0
        };
        DayPoint {
            date,
            value: mean,
            has_event: self.has_event,
            event_name: self.event_name,
            has_holiday: self.has_holiday,
            holiday_name: self.holiday_name,
        }
    }
}

/// Filter merged records by optional train and city, sorted chronologically.
///
/// `None` means no restriction on that field.
pub fn filter_records(
    records: &[MergedRecord],
    train: Option<&str>,
    ville: Option<&str>,
) -> Vec<MergedRecord> {
    let mut filtered: Vec<MergedRecord> = records
        .iter()
        .filter(|r| train.map_or(true, |t| r.train_id == t))
        .filter(|r| ville.map_or(true, |v| r.ville_arrivee == v))
        .cloned()
        .collect();
    // ISO dates sort chronologically as strings
    filtered.sort_by(|a, b| a.date.cmp(&b.date));
    filtered
}

/// Sorted distinct values of a field across records
pub fn unique_values<F>(records: &[MergedRecord], field: F) -> Vec<String>
where
    F: Fn(&MergedRecord) -> &str,
{
    let mut values: Vec<String> = records.iter().map(|r| field(r).to_string()).collect();
    values.sort();
    values.dedup();
    values
}

/// Summary statistics derived from merged records
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreviewStats {
    pub total_records: usize,
    pub event_days: usize,
    pub holiday_days: usize,
    pub date_range: Option<DateRange>,
}

pub fn preview_stats(records: &[MergedRecord]) -> PreviewStats {
    let event_days = records.iter().filter(|r| r.has_event()).count();
    let holiday_days = records.iter().filter(|r| r.has_holiday()).count();

    let start = records.iter().map(|r| r.date.as_str()).min();
    let end = records.iter().map(|r| r.date.as_str()).max();
    let date_range = match (start, end) {
        (Some(start), Some(end)) => Some(DateRange {
            start: start.to_string(),
            end: end.to_string(),
        }),
        _ => None,
    };

    PreviewStats {
        total_records: records.len(),
        event_days,
        holiday_days,
        date_range,
    }
}

/// Group merged records into one point per day (rounded mean passengers)
pub fn daily_series(records: &[MergedRecord]) -> Vec<DayPoint> {
    let mut days: BTreeMap<String, DayAccumulator> = BTreeMap::new();
    for record in records {
        days.entry(record.date.clone()).or_default().add(
            record.passengers,
            record.has_event(),
            record.event_name.as_deref(),
            record.has_holiday(),
            record.vacance_name.as_deref(),
        );
    }
    days.into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

/// Group predictions into one point per day (rounded mean passengers)
pub fn prediction_series(predictions: &[Prediction]) -> Vec<DayPoint> {
    let mut days: BTreeMap<String, DayAccumulator> = BTreeMap::new();
    for pred in predictions {
        days.entry(pred.date.clone()).or_default().add(
            pred.predicted_passengers,
            pred.event_present == 1,
            pred.event_name.as_deref(),
            pred.vacance_present == 1,
            pred.vacance_name.as_deref(),
        );
    }
    days.into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

// ============ State provisioning and actions ============

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        preview: create_rw_signal(None),
        predictions: create_rw_signal(None),
        history: create_rw_signal(Vec::new()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Upload the three CSV files and store the merge result.
    ///
    /// On failure the display string lands in `error` and is also returned.
    pub async fn upload_files(
        &self,
        passengers: &web_sys::File,
        events: &web_sys::File,
        holidays: &web_sys::File,
    ) -> Result<UploadResult, ApiError> {
        self.loading.set(true);
        self.error.set(None);

        let result = api::upload_csv(passengers, events, holidays).await;
        match &result {
            Ok(_) => {
                self.refresh_preview().await;
            }
            Err(e) => {
                self.error.set(Some(e.display_message()));
            }
        }

        self.loading.set(false);
        result
    }

    /// Load the merged-data preview.
    ///
    /// A failure is not an error here: before any upload the backend has
    /// nothing to preview, so fall back to an empty preview.
    pub async fn load_preview(&self) {
        self.loading.set(true);
        self.refresh_preview().await;
        self.loading.set(false);
    }

    async fn refresh_preview(&self) {
        match api::fetch_data_preview().await {
            Ok(preview) => self.preview.set(Some(preview)),
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("No data preview available: {}", e).into(),
                );
                self.preview.set(Some(DataPreview::default()));
            }
        }
    }

    /// Train a model and store the prediction result
    pub async fn train_and_predict(
        &self,
        model_type: &str,
        days_to_predict: u32,
    ) -> Result<(), ApiError> {
        self.loading.set(true);

        let result = api::train_and_predict(model_type, days_to_predict).await;
        let outcome = match result {
            Ok(result) => {
                self.predictions.set(Some(result));
                Ok(())
            }
            Err(e) => {
                self.error.set(Some(e.display_message()));
                Err(e)
            }
        };

        self.loading.set(false);
        outcome
    }

    /// Load the prediction history, falling back to an empty list
    pub async fn load_history(&self) {
        match api::fetch_prediction_history().await {
            Ok(history) => self.history.set(history),
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("No prediction history available: {}", e).into(),
                );
                self.history.set(Vec::new());
            }
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, train: &str, ville: &str, passengers: f64) -> MergedRecord {
        MergedRecord {
            date: date.to_string(),
            train_id: train.to_string(),
            ville_arrivee: ville.to_string(),
            passengers,
            event_present: 0.0,
            vacance: 0.0,
            event_name: None,
            vacance_name: None,
        }
    }

    #[test]
    fn filter_by_train_keeps_matching_rows_in_date_order() {
        let records = vec![
            record("2024-03-03", "T1", "Casablanca", 100.0),
            record("2024-03-01", "T1", "Rabat", 80.0),
            record("2024-03-02", "T2", "Rabat", 90.0),
        ];

        let filtered = filter_records(&records, Some("T1"), None);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, "2024-03-01");
        assert_eq!(filtered[1].date, "2024-03-03");
        assert!(filtered.iter().all(|r| r.train_id == "T1"));
    }

    #[test]
    fn filter_by_city_restricts_to_matching_rows() {
        let records = vec![
            record("2024-03-01", "T1", "Rabat", 80.0),
            record("2024-03-02", "T2", "Fès", 90.0),
        ];

        let filtered = filter_records(&records, None, Some("Fès"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ville_arrivee, "Fès");
    }

    #[test]
    fn no_filters_returns_everything_sorted() {
        let records = vec![
            record("2024-03-02", "T2", "Fès", 90.0),
            record("2024-03-01", "T1", "Rabat", 80.0),
        ];

        let filtered = filter_records(&records, None, None);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, "2024-03-01");
    }

    #[test]
    fn preview_stats_counts_records_and_flags() {
        let mut records = vec![
            record("2024-03-01", "T1", "Rabat", 80.0),
            record("2024-03-02", "T1", "Rabat", 85.0),
            record("2024-03-03", "T1", "Rabat", 120.0),
        ];
        records[1].event_present = 1.0;
        records[2].vacance = 1.0;

        let stats = preview_stats(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.event_days, 1);
        assert_eq!(stats.holiday_days, 1);
        assert_eq!(
            stats.date_range,
            Some(DateRange {
                start: "2024-03-01".to_string(),
                end: "2024-03-03".to_string(),
            })
        );
    }

    #[test]
    fn preview_stats_empty_has_no_range() {
        let stats = preview_stats(&[]);
        assert_eq!(stats.total_records, 0);
        assert!(stats.date_range.is_none());
    }

    #[test]
    fn daily_series_averages_per_day_and_sorts() {
        let mut records = vec![
            record("2024-03-02", "T2", "Fès", 200.0),
            record("2024-03-01", "T1", "Rabat", 100.0),
            record("2024-03-01", "T2", "Fès", 201.0),
        ];
        records[0].event_present = 1.0;
        records[0].event_name = Some("Festival".to_string());

        let series = daily_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2024-03-01");
        // mean(100, 201) = 150.5, rounded to 151
        assert_eq!(series[0].value, 151.0);
        assert!(!series[0].has_event);
        assert_eq!(series[1].date, "2024-03-02");
        assert_eq!(series[1].value, 200.0);
        assert!(series[1].has_event);
        assert_eq!(series[1].event_name.as_deref(), Some("Festival"));
    }

    #[test]
    fn prediction_series_groups_by_date() {
        let pred = |date: &str, passengers: f64, vacance: u8| Prediction {
            date: date.to_string(),
            train_id: "T1".to_string(),
            ville_arrivee: "Rabat".to_string(),
            predicted_passengers: passengers,
            event_present: 0,
            vacance_present: vacance,
            event_name: None,
            vacance_name: (vacance == 1).then(|| "Aïd".to_string()),
            vacance_duration: 0,
        };

        let series = prediction_series(&[
            pred("2024-04-01", 100.0, 0),
            pred("2024-04-01", 103.0, 0),
            pred("2024-04-02", 90.0, 1),
        ]);

        assert_eq!(series.len(), 2);
        // mean(100, 103) = 101.5, rounded to 102
        assert_eq!(series[0].value, 102.0);
        assert!(series[1].has_holiday);
        assert_eq!(series[1].holiday_name.as_deref(), Some("Aïd"));
    }

    #[test]
    fn unique_values_sorted_and_deduplicated() {
        let records = vec![
            record("2024-03-01", "T2", "Rabat", 80.0),
            record("2024-03-02", "T1", "Fès", 90.0),
            record("2024-03-03", "T2", "Rabat", 85.0),
        ];

        let trains = unique_values(&records, |r| &r.train_id);
        assert_eq!(trains, vec!["T1".to_string(), "T2".to_string()]);

        let villes = unique_values(&records, |r| &r.ville_arrivee);
        assert_eq!(villes, vec!["Fès".to_string(), "Rabat".to_string()]);
    }

    #[test]
    fn merged_record_deserializes_backend_columns() {
        let json = r#"{
            "Date": "2024-03-01",
            "Train_ID": "T1",
            "Ville_Arrivee": "Rabat",
            "Nombre_Passagers": 420,
            "Evenement_Present": 1,
            "Vacance": 0,
            "Description_Evenement": "Festival",
            "Titre_Vacances": null
        }"#;

        let record: MergedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.passengers, 420.0);
        assert!(record.has_event());
        assert!(!record.has_holiday());
        assert_eq!(record.event_name.as_deref(), Some("Festival"));
        assert!(record.vacance_name.is_none());
    }
}
