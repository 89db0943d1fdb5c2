//! Multi-day forecast page.

use chrono::{FixedOffset, Local};
use kws_core::error::UserFacingError;
use kws_core::Scale;
use kws_weather::{Forecast, Weather, WeatherApi, WeatherError};

use crate::display;
use crate::loading::{while_loading, LoadingController};
use crate::pages::{Page, PageState};
use crate::preferences::UserPreferences;

pub struct ForecastPage<W, P, C> {
    weather: W,
    preferences: P,
    loading: C,
    loading_message: String,
    scale: Scale,
    /// Must match the offset the forecast was grouped in
    day_offset: Option<FixedOffset>,
    forecast: Option<Forecast>,
    error: Option<WeatherError>,
    state: PageState,
}

impl<W, P, C> ForecastPage<W, P, C>
where
    W: WeatherApi,
    P: UserPreferences,
    C: LoadingController,
{
    pub fn new(weather: W, preferences: P, loading: C) -> Self {
        Self {
            weather,
            preferences,
            loading,
            loading_message: "Loading...".to_string(),
            scale: Scale::default(),
            day_offset: None,
            forecast: None,
            error: None,
            state: PageState::Idle,
        }
    }

    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    /// Label days by midnight in `offset` instead of local time
    pub fn with_day_offset(mut self, offset: FixedOffset) -> Self {
        self.day_offset = Some(offset);
        self
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    fn render_day(&self, entries: &[Weather]) -> Option<String> {
        let first = entries.first()?;
        let (low, high) = display::temperature_range(entries)?;
        let day = match &self.day_offset {
            Some(offset) => display::format_day(&first.date, offset),
            None => display::format_day(&first.date, &Local),
        };
        Some(format!(
            "{}: {} / {} {}",
            day,
            display::format_temperature(low, self.scale),
            display::format_temperature(high, self.scale),
            first.condition_kind().description()
        ))
    }
}

impl<W, P, C> Page for ForecastPage<W, P, C>
where
    W: WeatherApi,
    P: UserPreferences,
    C: LoadingController,
{
    async fn enter(&mut self) {
        self.state = PageState::Loading;

        let (scale, result) = tokio::join!(
            self.preferences.scale(),
            while_loading(&self.loading, &self.loading_message, self.weather.forecast()),
        );

        self.scale = scale;
        match result {
            Ok(forecast) => {
                self.forecast = Some(forecast);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load forecast: {}", e);
                self.error = Some(e);
            }
        }

        self.state = PageState::Idle;
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn render(&self) -> String {
        match (&self.forecast, &self.error) {
            (Some(days), _) if days.is_empty() => "No forecast available".to_string(),
            (Some(days), _) => days
                .iter()
                .filter_map(|day| self.render_day(day))
                .collect::<Vec<_>>()
                .join("\n"),
            (None, Some(e)) => e.user_message().to_string(),
            (None, None) => "No forecast loaded".to_string(),
        }
    }

    fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|e| e.user_message())
    }
}
