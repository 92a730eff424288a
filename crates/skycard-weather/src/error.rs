//! Widget-level error types.

use skycard_core::{NetworkError, StorageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("No city data found.")]
    EmptyCatalog,

    #[error("Invalid coordinates")]
    InvalidCoordinates,

    #[error("API error: {status}")]
    Api { status: u16 },

    #[error("No weather data available.")]
    NoData,

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Failed to load user preferences: {0}")]
    PreferenceLoad(StorageError),

    #[error("Failed to save user preferences: {0}")]
    PreferenceSave(StorageError),
}

impl WidgetError {
    /// Message shown in the current-day region and mirrored to the announcer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CatalogUnavailable(_) | Self::EmptyCatalog => "Error loading cities.",
            Self::InvalidCoordinates | Self::Api { .. } | Self::NoData | Self::Network(_) => {
                "Weather data unavailable."
            }
            Self::PreferenceLoad(_) => "Failed to load user preferences.",
            Self::PreferenceSave(_) => "Failed to save user preferences.",
        }
    }

    /// Whether a retry could succeed without user input changing.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status } => *status >= 500,
            Self::Network(_) | Self::CatalogUnavailable(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        assert_eq!(WidgetError::InvalidCoordinates.to_string(), "Invalid coordinates");
        assert_eq!(WidgetError::Api { status: 503 }.to_string(), "API error: 503");
        assert_eq!(WidgetError::NoData.to_string(), "No weather data available.");
    }

    #[test]
    fn test_user_messages_by_category() {
        assert_eq!(WidgetError::EmptyCatalog.user_message(), "Error loading cities.");
        assert_eq!(
            WidgetError::CatalogUnavailable("CSV load error: 404".into()).user_message(),
            "Error loading cities."
        );
        assert_eq!(
            WidgetError::InvalidCoordinates.user_message(),
            "Weather data unavailable."
        );
        assert_eq!(
            WidgetError::Network(NetworkError::Timeout).user_message(),
            "Weather data unavailable."
        );
        assert_eq!(
            WidgetError::PreferenceSave(StorageError::QuotaExceeded { used: 9, quota: 8 })
                .user_message(),
            "Failed to save user preferences."
        );
        assert_eq!(
            WidgetError::PreferenceLoad(StorageError::Serialization("eof".into())).user_message(),
            "Failed to load user preferences."
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(WidgetError::Api { status: 502 }.is_retryable());
        assert!(!WidgetError::Api { status: 400 }.is_retryable());
        assert!(!WidgetError::InvalidCoordinates.is_retryable());
        assert!(WidgetError::Network(NetworkError::Timeout).is_retryable());
    }
}
