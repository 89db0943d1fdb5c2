//! Formatting helpers shared by the pages.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use kws_core::Scale;
use kws_weather::Weather;

const KELVIN_OFFSET: f64 = 273.15;

/// Convert a Kelvin reading to `scale`
pub fn convert_kelvin(kelvin: f64, scale: Scale) -> f64 {
    match scale {
        Scale::Celsius => kelvin - KELVIN_OFFSET,
        Scale::Fahrenheit => kelvin * 9.0 / 5.0 - 459.67,
    }
}

/// Whole degrees with the scale letter, e.g. `7°C`
pub fn format_temperature(kelvin: f64, scale: Scale) -> String {
    let degrees = convert_kelvin(kelvin, scale).round();
    // Avoid printing "-0"
    let degrees = if degrees == 0.0 { 0.0 } else { degrees };
    format!("{}°{}", degrees, scale)
}

pub fn format_time(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%a %b %-d, %H:%M").to_string()
}

/// Calendar day of `date` as seen in `tz`
pub fn format_day<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz).format("%a %b %-d").to_string()
}

/// One-line summary: temperature, condition and time
pub fn describe(weather: &Weather, scale: Scale) -> String {
    format!(
        "{} {} ({})",
        format_temperature(weather.temperature, scale),
        weather.condition_kind().description(),
        format_time(&weather.date)
    )
}

/// Lowest and highest temperature in a day's entries
pub fn temperature_range(entries: &[Weather]) -> Option<(f64, f64)> {
    entries.iter().map(|w| w.temperature).fold(None, |range, t| match range {
        None => Some((t, t)),
        Some((low, high)) => Some((low.min(t), high.max(t))),
    })
}
