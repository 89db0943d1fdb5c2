//! Weather-specific error types.

use kws_core::error::{NetworkError, ReqwestErrorExt, UserFacingError};
use thiserror::Error;

/// Location service errors
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(err.into_network_error())
    }
}

impl UserFacingError for WeatherError {
    fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Location(LocationError::PermissionDenied) => {
                "Location access was denied. Allow it to see local weather."
            }
            Self::Location(_) => "Could not determine your location.",
            Self::Api { status: 401, .. } => "Weather API key is invalid. Check settings.",
            Self::Api { status, .. } if *status >= 500 => {
                "Weather service unavailable. Please try again later."
            }
            Self::Api { .. } => "Weather service error. Please try again.",
            Self::Parse(_) => "Received unexpected weather data.",
            Self::InvalidConfig(_) => "Weather settings are invalid. Check your configuration.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = WeatherError::Api {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert!(err.user_message().contains("API key"));

        let err = WeatherError::Location(LocationError::PermissionDenied);
        assert!(err.user_message().contains("denied"));

        let err = WeatherError::Network(NetworkError::Timeout);
        assert!(err.user_message().contains("timed out"));
    }

    #[test]
    fn test_converts_into_app_error() {
        let app_err = kws_core::AppError::service(WeatherError::Parse("dt".into()));
        assert_eq!(app_err.user_message(), "Received unexpected weather data.");
    }
}
