//! HTTP API Client
//!
//! One function per endpoint of the prediction backend REST API.
//! Each performs a single call and returns parsed JSON (or CSV text for the
//! export endpoint). No retries, no deduplication, no abort signals.

use gloo_net::http::{Request, Response};
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::api::error::{ApiError, ErrorBody};
use crate::state::global::{DataPreview, PredictionRecord, TrainResult};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("oncf_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UploadResult {
    pub message: String,
    #[serde(default)]
    pub total_records: usize,
    #[serde(default)]
    pub passengers_count: usize,
    #[serde(default)]
    pub events_count: i64,
    #[serde(default)]
    pub holidays_count: i64,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sample_data: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub date_range: Option<crate::state::global::DateRange>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Response of the per-file upload endpoints
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SingleUploadResult {
    pub message: String,
    #[serde(default)]
    pub merged_available: bool,
    #[serde(default)]
    pub total_records: usize,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FutureEventsResponse {
    #[serde(default)]
    pub future_events: Vec<FutureEvent>,
    #[serde(default)]
    pub future_holidays: Vec<FutureHoliday>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FutureEvent {
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct FutureHoliday {
    pub date: String,
    #[serde(default)]
    pub titre: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duree_totale: u32,
    #[serde(default)]
    pub jour_dans_sequence: u32,
}

/// Current-day summary shown on the dashboard
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DateInfo {
    #[serde(default)]
    pub date: String,
    pub formatted_date: String,
    #[serde(default)]
    pub average_prediction: Option<f64>,
    #[serde(default)]
    pub events: Vec<TodayEvent>,
    #[serde(default)]
    pub holidays: Vec<TodayHoliday>,
    #[serde(default)]
    pub has_events: bool,
    #[serde(default)]
    pub has_holidays: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TodayEvent {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct TodayHoliday {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub day_in_sequence: u32,
}

#[derive(Debug, serde::Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    history: Vec<PredictionRecord>,
}

/// Response of the row delete/edit endpoints
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RowOpResponse {
    pub message: String,
    #[serde(default)]
    pub total_records: usize,
}

/// Identifies a merged-data row, by position or by its natural key
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RowKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ville_arrivee: Option<String>,
}

// ============ Helpers ============

/// Convert a non-2xx response to an `ApiError`, logging it to the console.
async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail);
    web_sys::console::error_1(
        &format!("API error: status {} detail {:?}", status, detail).into(),
    );
    ApiError::Status(status, detail)
}

fn network_error(err: gloo_net::Error) -> ApiError {
    web_sys::console::error_1(&format!("API network error: {}", err).into());
    ApiError::Network
}

fn decode_error(err: gloo_net::Error) -> ApiError {
    web_sys::console::error_1(&format!("API decode error: {}", err).into());
    ApiError::Unexpected
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

// ============ API Functions ============

/// Connectivity probe
pub async fn test_connection() -> Result<(), ApiError> {
    let response = Request::get(&format!("{}/test", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }
    Ok(())
}

/// Fetch the merged-data preview and statistics
pub async fn fetch_data_preview() -> Result<DataPreview, ApiError> {
    let response = Request::get(&format!("{}/data-preview", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Fetch events and holidays beyond the last known data date
pub async fn fetch_future_events() -> Result<FutureEventsResponse, ApiError> {
    let response = Request::get(&format!("{}/future-events", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Fetch the summary for today's date
pub async fn fetch_current_date_info() -> Result<DateInfo, ApiError> {
    let response = Request::get(&format!("{}/current-date-info", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Upload the three CSV files in one multipart request
pub async fn upload_csv(
    passengers: &web_sys::File,
    events: &web_sys::File,
    holidays: &web_sys::File,
) -> Result<UploadResult, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Unexpected)?;
    form.append_with_blob("passengers_file", passengers)
        .map_err(|_| ApiError::Unexpected)?;
    form.append_with_blob("evenements_file", events)
        .map_err(|_| ApiError::Unexpected)?;
    form.append_with_blob("vacances_file", holidays)
        .map_err(|_| ApiError::Unexpected)?;

    post_form(&format!("{}/upload-csv", get_api_base()), form).await
}

/// Upload only the passengers CSV
pub async fn upload_passengers(file: &web_sys::File) -> Result<SingleUploadResult, ApiError> {
    upload_single("upload-passengers", "passengers_file", file).await
}

/// Upload only the events CSV
pub async fn upload_events(file: &web_sys::File) -> Result<SingleUploadResult, ApiError> {
    upload_single("upload-events", "evenements_file", file).await
}

/// Upload only the holidays CSV
pub async fn upload_holidays(file: &web_sys::File) -> Result<SingleUploadResult, ApiError> {
    upload_single("upload-holidays", "vacances_file", file).await
}

async fn upload_single(
    endpoint: &str,
    field: &str,
    file: &web_sys::File,
) -> Result<SingleUploadResult, ApiError> {
    let form = FormData::new().map_err(|_| ApiError::Unexpected)?;
    form.append_with_blob(field, file)
        .map_err(|_| ApiError::Unexpected)?;

    post_form(&format!("{}/{}", get_api_base(), endpoint), form).await
}

async fn post_form<T: serde::de::DeserializeOwned>(
    url: &str,
    form: FormData,
) -> Result<T, ApiError> {
    // The browser sets the multipart Content-Type with its boundary
    let response = Request::post(url)
        .body(JsValue::from(form))
        .map_err(|_| ApiError::Unexpected)?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Train a model and generate predictions
pub async fn train_and_predict(
    model_type: &str,
    days_to_predict: u32,
) -> Result<TrainResult, ApiError> {
    #[derive(serde::Serialize)]
    struct PredictionRequest {
        model_type: String,
        days_to_predict: u32,
    }

    let response = Request::post(&format!("{}/train-and-predict", get_api_base()))
        .json(&PredictionRequest {
            model_type: model_type.to_string(),
            days_to_predict,
        })
        .map_err(|_| ApiError::Unexpected)?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Fetch all past prediction sessions
pub async fn fetch_prediction_history() -> Result<Vec<PredictionRecord>, ApiError> {
    let response = Request::get(&format!("{}/prediction-history", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    let result: HistoryResponse = response.json().await.map_err(decode_error)?;
    Ok(result.history)
}

/// Fetch the server-side CSV export of a prediction session.
///
/// Without an index the backend exports the latest session.
pub async fn export_predictions(index: Option<usize>) -> Result<String, ApiError> {
    let api_base = get_api_base();
    let url = match index {
        Some(i) => format!("{}/export-predictions/{}", api_base, i),
        None => format!("{}/export-predictions", api_base),
    };

    let response = Request::get(&url).send().await.map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.text().await.map_err(decode_error)
}

/// Delete a merged-data row
pub async fn delete_row(key: &RowKey) -> Result<RowOpResponse, ApiError> {
    let mut url = format!("{}/delete-row", get_api_base());
    let mut sep = '?';
    let mut push = |name: &str, value: String| {
        url.push(sep);
        url.push_str(name);
        url.push('=');
        url.push_str(&value);
        sep = '&';
    };

    if let Some(index) = key.index {
        push("index", index.to_string());
    }
    if let Some(date) = &key.date {
        push("date", encode(date));
    }
    if let Some(train_id) = &key.train_id {
        push("train_id", encode(train_id));
    }
    if let Some(ville) = &key.ville_arrivee {
        push("ville_arrivee", encode(ville));
    }

    let response = Request::delete(&url).send().await.map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Edit fields of a merged-data row
pub async fn edit_row(
    key: &RowKey,
    update_fields: serde_json::Map<String, serde_json::Value>,
) -> Result<RowOpResponse, ApiError> {
    #[derive(serde::Serialize)]
    struct EditRowRequest<'a> {
        #[serde(flatten)]
        key: &'a RowKey,
        update_fields: serde_json::Map<String, serde_json::Value>,
    }

    let response = Request::put(&format!("{}/edit-row", get_api_base()))
        .json(&EditRowRequest { key, update_fields })
        .map_err(|_| ApiError::Unexpected)?
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }

    response.json().await.map_err(decode_error)
}

/// Drop all uploaded data and prediction history on the backend
pub async fn reset_data() -> Result<(), ApiError> {
    let response = Request::post(&format!("{}/reset-data", get_api_base()))
        .send()
        .await
        .map_err(network_error)?;

    if !response.ok() {
        return Err(status_error(response).await);
    }
    Ok(())
}
