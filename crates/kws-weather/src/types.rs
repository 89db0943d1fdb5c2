use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Conditions at a single point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Temperature in Kelvin, as reported by the API
    pub temperature: f64,
    /// Weather condition id (OpenWeatherMap code)
    pub condition: i32,
    pub date: DateTime<Utc>,
}

impl Weather {
    pub fn condition_kind(&self) -> ConditionKind {
        ConditionKind::from_code(self.condition)
    }
}

/// Forecast entries grouped per calendar day, in chronological order
pub type Forecast = Vec<Vec<Weather>>;

/// UV index with its risk bucket (0 = low .. 4 = extreme)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvIndex {
    pub value: f64,
    pub risk_level: u8,
}

impl UvIndex {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            risk_level: crate::transform::risk_level(value),
        }
    }

    /// Human-readable name of the risk level
    pub fn risk_description(&self) -> &'static str {
        risk_description(self.risk_level)
    }

    /// Sun protection advice for the risk level
    pub fn advice(&self) -> &'static str {
        match self.risk_level {
            0 => "Minimal protection needed. Wear sunglasses on bright days.",
            1 => "Stay in shade near midday. Wear a hat and use sunscreen.",
            2 => "Reduce time in the sun between 10 a.m. and 4 p.m. Cover up and use SPF 30+.",
            3 => "Minimize sun exposure during midday hours. Shirt, sunscreen and hat are a must.",
            _ => "Avoid the sun between 10 a.m. and 4 p.m. Unprotected skin can burn in minutes.",
        }
    }
}

/// Name of a UV risk level
pub fn risk_description(level: u8) -> &'static str {
    match level {
        0 => "Low",
        1 => "Moderate",
        2 => "High",
        3 => "Very High",
        _ => "Extreme",
    }
}

/// Weather condition categories mapped from OpenWeatherMap condition ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    #[default]
    Unknown,
}

impl ConditionKind {
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Atmosphere,
            800 => Self::Clear,
            801..=804 => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Atmosphere => "Fog",
            Self::Clear => "Clear",
            Self::Clouds => "Cloudy",
            Self::Unknown => "Unknown",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "cloud_lightning",
            Self::Drizzle => "cloud_drizzle",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Atmosphere => "cloud_fog",
            Self::Clear => "sun",
            Self::Clouds => "cloud",
            Self::Unknown => "question",
        }
    }
}
