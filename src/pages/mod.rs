//! Page Components
//!
//! One module per route, plus the model catalog and the small display
//! helpers shared between the training and prediction pages.

pub mod dashboard;
pub mod predict;
pub mod upload;

pub use dashboard::Dashboard;
pub use predict::Predict;
pub use upload::UploadTrain;

/// A selectable prediction model
pub struct ModelOption {
    /// Wire value sent to the backend
    pub value: &'static str,
    /// French display label
    pub label: &'static str,
    pub description: &'static str,
}

/// Models the backend can train
pub const MODEL_OPTIONS: [ModelOption; 3] = [
    ModelOption {
        value: "Linear Regression",
        label: "Régression Linéaire",
        description: "Modèle simple et rapide, adapté aux tendances linéaires",
    },
    ModelOption {
        value: "Random Forest",
        label: "Random Forest",
        description: "Ensemble d'arbres de décision, robuste au bruit",
    },
    ModelOption {
        value: "XGBoost",
        label: "XGBoost",
        description: "Gradient boosting, le plus précis sur données riches",
    },
];

/// Default prediction horizon in days
pub const DEFAULT_DAYS: u32 = 30;
/// Allowed prediction horizon
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

/// French label of a model wire value
pub fn model_label(value: &str) -> &str {
    MODEL_OPTIONS
        .iter()
        .find(|m| m.value == value)
        .map(|m| m.label)
        .unwrap_or(value)
}

/// Text color class for an R² score
pub fn r2_text_class(r2: f64) -> &'static str {
    if r2 >= 0.8 {
        "text-green-600"
    } else if r2 >= 0.6 {
        "text-yellow-600"
    } else {
        "text-red-600"
    }
}

/// French label of a prediction session status
pub fn status_label(status: &str) -> &'static str {
    match status {
        "completed" => "Terminé",
        "training" => "En cours",
        "failed" => "Échoué",
        _ => "Inconnu",
    }
}

/// Badge color classes of a prediction session status
pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "completed" => "bg-green-100 text-green-800",
        "training" => "bg-yellow-100 text-yellow-800",
        "failed" => "bg-red-100 text-red-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_label_maps_known_and_passes_through_unknown() {
        assert_eq!(model_label("Linear Regression"), "Régression Linéaire");
        assert_eq!(model_label("Random Forest"), "Random Forest");
        assert_eq!(model_label("XGBoost"), "XGBoost");
        assert_eq!(model_label("LSTM"), "LSTM");
    }

    #[test]
    fn r2_thresholds() {
        assert_eq!(r2_text_class(0.92), "text-green-600");
        assert_eq!(r2_text_class(0.8), "text-green-600");
        assert_eq!(r2_text_class(0.7), "text-yellow-600");
        assert_eq!(r2_text_class(0.6), "text-yellow-600");
        assert_eq!(r2_text_class(0.59), "text-red-600");
    }

    #[test]
    fn status_labels_in_french() {
        assert_eq!(status_label("completed"), "Terminé");
        assert_eq!(status_label("training"), "En cours");
        assert_eq!(status_label("failed"), "Échoué");
        assert_eq!(status_label("whatever"), "Inconnu");
    }
}
