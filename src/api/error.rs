//! API Error Mapping
//!
//! Error taxonomy for backend calls and conversion to the French display
//! strings shown inline in the UI.

use std::fmt;

/// Errors from a backend call.
///
/// None of these are fatal: every call site shows the display string and
/// lets the user retry.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx HTTP response with the backend's optional `detail` message
    Status(u16, Option<String>),
    /// The request never reached the server
    Network,
    /// Request construction or response decoding failed
    Unexpected,
}

impl ApiError {
    /// French string shown to the user for this error.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Status(400, detail) => format!(
                "Erreur de validation: {}",
                detail.as_deref().unwrap_or("Données invalides")
            ),
            ApiError::Status(404, _) => "Ressource non trouvée".to_string(),
            ApiError::Status(500, _) => "Erreur interne du serveur".to_string(),
            ApiError::Status(code, detail) => format!(
                "Erreur {}: {}",
                code,
                detail.as_deref().unwrap_or("Erreur inconnue")
            ),
            ApiError::Network => {
                "Erreur de connexion au serveur. Vérifiez que le backend est démarré.".to_string()
            }
            ApiError::Unexpected => "Une erreur inattendue s'est produite".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_message())
    }
}

/// Shape of the backend's error payload (a single `detail` field).
#[derive(Debug, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_includes_detail() {
        let err = ApiError::Status(400, Some("bad file".to_string()));
        assert_eq!(err.display_message(), "Erreur de validation: bad file");
    }

    #[test]
    fn validation_error_without_detail() {
        let err = ApiError::Status(400, None);
        assert_eq!(err.display_message(), "Erreur de validation: Données invalides");
    }

    #[test]
    fn not_found_is_fixed_string() {
        let err = ApiError::Status(404, Some("ignored".to_string()));
        assert_eq!(err.display_message(), "Ressource non trouvée");
    }

    #[test]
    fn server_error_is_fixed_string() {
        assert_eq!(
            ApiError::Status(500, None).display_message(),
            "Erreur interne du serveur"
        );
    }

    #[test]
    fn other_status_shows_code_and_detail() {
        let err = ApiError::Status(418, Some("théière".to_string()));
        assert_eq!(err.display_message(), "Erreur 418: théière");
        assert_eq!(
            ApiError::Status(503, None).display_message(),
            "Erreur 503: Erreur inconnue"
        );
    }

    #[test]
    fn network_error_message() {
        assert_eq!(
            ApiError::Network.display_message(),
            "Erreur de connexion au serveur. Vérifiez que le backend est démarré."
        );
    }

    #[test]
    fn unexpected_error_message() {
        assert_eq!(
            ApiError::Unexpected.display_message(),
            "Une erreur inattendue s'est produite"
        );
    }
}
