//! CSV Export
//!
//! Client-side CSV serialization of prediction arrays and browser download
//! plumbing. This is the only data format the dashboard itself produces;
//! everything else comes from the backend as-is.

use wasm_bindgen::JsCast;

use crate::state::global::Prediction;

/// CSV header of a prediction export
pub const CSV_HEADER: &str = "Date,Train_ID,Ville_Arrivée,Predicted_Passengers";

/// Serialize predictions to CSV text: header row plus one row per
/// prediction, in source order.
pub fn predictions_csv(predictions: &[Prediction]) -> String {
    let mut lines = Vec::with_capacity(predictions.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for p in predictions {
        lines.push(format!(
            "{},{},{},{}",
            p.date, p.train_id, p.ville_arrivee, p.predicted_passengers
        ));
    }
    lines.join("\n")
}

/// Export filename: `predictions_{model}_{date}.csv`, whitespace in the
/// model name replaced by underscores.
pub fn export_filename(model_type: &str, date: &str) -> String {
    let model: String = model_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("predictions_{}_{}.csv", model, date)
}

/// Today's date in ISO format, for export filenames
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Trigger a browser download of `content` under `filename` via a Blob
/// object URL and a synthetic anchor click.
pub fn download_text(content: &str, filename: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let parts = js_sys::Array::of1(&content.into());
    let Ok(blob) = web_sys::Blob::new_with_str_sequence(&parts) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };

    if let Ok(anchor) = document.create_element("a") {
        let _ = anchor.set_attribute("href", &url);
        let _ = anchor.set_attribute("download", filename);
        if let Some(element) = anchor.dyn_ref::<web_sys::HtmlElement>() {
            element.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(date: &str, train: &str, ville: &str, passengers: f64) -> Prediction {
        Prediction {
            date: date.to_string(),
            train_id: train.to_string(),
            ville_arrivee: ville.to_string(),
            predicted_passengers: passengers,
            event_present: 0,
            vacance_present: 0,
            event_name: None,
            vacance_name: None,
            vacance_duration: 0,
        }
    }

    #[test]
    fn csv_has_header_plus_one_row_per_prediction() {
        let preds = vec![
            prediction("2024-04-01", "T1", "Rabat", 420.0),
            prediction("2024-04-02", "T1", "Rabat", 398.0),
            prediction("2024-04-02", "T2", "Fès", 511.0),
        ];

        let csv = predictions_csv(&preds);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), preds.len() + 1);
        assert_eq!(lines[0], "Date,Train_ID,Ville_Arrivée,Predicted_Passengers");
        assert_eq!(lines[1], "2024-04-01,T1,Rabat,420");
        assert_eq!(lines[3], "2024-04-02,T2,Fès,511");
    }

    #[test]
    fn csv_of_empty_predictions_is_header_only() {
        let csv = predictions_csv(&[]);
        assert_eq!(csv, CSV_HEADER);
    }

    #[test]
    fn csv_preserves_source_order() {
        // Deliberately out of chronological order
        let preds = vec![
            prediction("2024-04-03", "T9", "Oujda", 50.0),
            prediction("2024-04-01", "T1", "Rabat", 60.0),
        ];

        let csv = predictions_csv(&preds);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("2024-04-03"));
        assert!(lines[2].starts_with("2024-04-01"));
    }

    #[test]
    fn filename_replaces_spaces_in_model_name() {
        assert_eq!(
            export_filename("Random Forest", "2024-04-01"),
            "predictions_Random_Forest_2024-04-01.csv"
        );
        assert_eq!(
            export_filename("XGBoost", "2024-04-01"),
            "predictions_XGBoost_2024-04-01.csv"
        );
    }
}
