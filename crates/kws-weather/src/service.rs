//! OpenWeatherMap client.
//!
//! Every operation asks the location provider for coordinates once, issues a
//! single GET and transforms the payload. Nothing is cached or retried.

use std::future::Future;
use std::time::Duration;

use chrono::{FixedOffset, Local};
use kws_core::config::{WeatherConfig, DEFAULT_TIMEOUT_SECS};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::api::{ForecastResponse, UvResponse, WeatherResponse};
use crate::error::WeatherError;
use crate::location::LocationProvider;
use crate::transform::group_by_day;
use crate::types::{Forecast, UvIndex, Weather};

/// The weather operations pages depend on
pub trait WeatherApi: Send + Sync {
    fn current(&self) -> impl Future<Output = Result<Weather, WeatherError>> + Send;
    fn forecast(&self) -> impl Future<Output = Result<Forecast, WeatherError>> + Send;
    fn uv_index(&self) -> impl Future<Output = Result<UvIndex, WeatherError>> + Send;
}

#[derive(Debug, Clone)]
pub struct WeatherService<L> {
    client: Client,
    base_url: String,
    app_id: String,
    location: L,
    /// Where forecast days start; `None` means system local time
    day_offset: Option<FixedOffset>,
}

impl<L: LocationProvider> WeatherService<L> {
    pub fn new(
        location: L,
        base_url: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        Self::with_timeout(
            location,
            base_url,
            app_id,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        location: L,
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            location,
            day_offset: None,
        })
    }

    pub fn from_config(config: &WeatherConfig, location: L) -> Result<Self, WeatherError> {
        let service = Self::with_timeout(
            location,
            config.base_url.as_str(),
            config.app_id.as_str(),
            Duration::from_secs(config.timeout_secs),
        )?;

        match config.utc_offset_minutes {
            Some(minutes) => {
                let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                    WeatherError::InvalidConfig(format!("UTC offset out of range: {}", minutes))
                })?;
                Ok(service.with_day_offset(offset))
            }
            None => Ok(service),
        }
    }

    /// Split forecast days at midnight in `offset` instead of local time
    pub fn with_day_offset(mut self, offset: FixedOffset) -> Self {
        self.day_offset = Some(offset);
        self
    }

    /// Offset forecast days are split in, `None` for system local time
    pub fn day_offset(&self) -> Option<FixedOffset> {
        self.day_offset
    }

    #[instrument(skip(self), level = "info")]
    pub async fn current(&self) -> Result<Weather, WeatherError> {
        let raw: WeatherResponse = self.get("weather").await?;
        Weather::try_from(raw)
    }

    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self) -> Result<Forecast, WeatherError> {
        let raw: ForecastResponse = self.get("forecast").await?;
        let entries = raw
            .list
            .into_iter()
            .map(Weather::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let days = match &self.day_offset {
            Some(offset) => group_by_day(entries, offset),
            None => group_by_day(entries, &Local),
        };
        tracing::debug!("Forecast covers {} days", days.len());
        Ok(days)
    }

    #[instrument(skip(self), level = "info")]
    pub async fn uv_index(&self) -> Result<UvIndex, WeatherError> {
        let raw: UvResponse = self.get("uvi").await?;
        Ok(UvIndex::from(raw))
    }

    /// Resolve the location, then GET `{base_url}/{endpoint}?lat=&lon=&appid=`
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, WeatherError> {
        let coords = self.location.current().await?;
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(
            "GET {} at {}, {}",
            url,
            coords.latitude,
            coords.longitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.app_id.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned {}", endpoint, status);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("{}: {}", endpoint, e)))
    }
}

impl<L: LocationProvider> WeatherApi for WeatherService<L> {
    fn current(&self) -> impl Future<Output = Result<Weather, WeatherError>> + Send {
        WeatherService::current(self)
    }

    fn forecast(&self) -> impl Future<Output = Result<Forecast, WeatherError>> + Send {
        WeatherService::forecast(self)
    }

    fn uv_index(&self) -> impl Future<Output = Result<UvIndex, WeatherError>> + Send {
        WeatherService::uv_index(self)
    }
}
