//! Raw OpenWeatherMap payloads and their conversion into [`crate::types`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::WeatherError;
use crate::types::{UvIndex, Weather};

/// `/weather` response, also the shape of every `/forecast` list entry
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub weather: Vec<ConditionEntry>,
    pub main: MainBlock,
    /// Unix seconds
    pub dt: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
}

/// `/forecast` response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<WeatherResponse>,
}

/// `/uvi` response
#[derive(Debug, Clone, Deserialize)]
pub struct UvResponse {
    pub value: f64,
}

/// Convert Unix seconds into an instant, going through milliseconds
pub fn instant_from_unix(dt: i64) -> Result<DateTime<Utc>, WeatherError> {
    dt.checked_mul(1000)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {}", dt)))
}

impl TryFrom<WeatherResponse> for Weather {
    type Error = WeatherError;

    fn try_from(raw: WeatherResponse) -> Result<Self, Self::Error> {
        // Only the first reported condition is kept
        let condition = raw
            .weather
            .first()
            .map(|c| c.id)
            .ok_or_else(|| WeatherError::Parse("no weather condition in payload".into()))?;

        Ok(Weather {
            temperature: raw.main.temp,
            condition,
            date: instant_from_unix(raw.dt)?,
        })
    }
}

impl From<UvResponse> for UvIndex {
    fn from(raw: UvResponse) -> Self {
        UvIndex::new(raw.value)
    }
}
