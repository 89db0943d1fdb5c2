use std::future::Future;
use std::sync::Arc;

use kws_core::WeatherConfig;

use crate::error::LocationError;
use crate::types::Coordinates;

/// Source of the device's current coordinates.
///
/// Called once per weather request; implementations decide whether to cache.
pub trait LocationProvider: Send + Sync {
    fn current(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

impl<L: LocationProvider> LocationProvider for Arc<L> {
    fn current(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send {
        (**self).current()
    }
}

/// A location pinned in configuration
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates: Some(coordinates),
        }
    }

    /// Use the configured coordinates, if both are set
    pub fn from_config(config: &WeatherConfig) -> Self {
        let coordinates = match (config.latitude, config.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };
        Self { coordinates }
    }

    pub fn is_available(&self) -> bool {
        self.coordinates.is_some()
    }
}

impl LocationProvider for FixedLocation {
    async fn current(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::ServiceUnavailable)
    }
}
