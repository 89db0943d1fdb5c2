//! Weather data for KWS
//!
//! Fetches current conditions, the multi-day forecast and the UV index from
//! an OpenWeatherMap-compatible API, for the coordinates a [`LocationProvider`]
//! reports, and turns the raw payloads into display-ready models.

pub mod api;
pub mod error;
pub mod location;
pub mod service;
pub mod transform;
pub mod types;

pub use error::{LocationError, WeatherError};
pub use kws_core::Scale;
pub use location::{FixedLocation, LocationProvider};
pub use service::{WeatherApi, WeatherService};
pub use transform::{group_by_day, risk_level};
pub use types::*;
