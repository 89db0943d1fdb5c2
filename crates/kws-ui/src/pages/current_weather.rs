//! Current conditions page.

use kws_core::error::UserFacingError;
use kws_core::Scale;
use kws_weather::{Weather, WeatherApi, WeatherError};

use crate::display;
use crate::loading::{while_loading, LoadingController};
use crate::pages::{Page, PageState};
use crate::preferences::{PreferencesError, UserPreferences};

pub struct CurrentWeatherPage<W, P, C> {
    weather: W,
    preferences: P,
    loading: C,
    loading_message: String,
    scale: Scale,
    current: Option<Weather>,
    error: Option<WeatherError>,
    state: PageState,
}

impl<W, P, C> CurrentWeatherPage<W, P, C>
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
            current: None,
            error: None,
            state: PageState::Idle,
        }
    }

    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn current(&self) -> Option<&Weather> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&WeatherError> {
        self.error.as_ref()
    }

    /// Read the stored scale without fetching any weather
    pub async fn load_scale(&mut self) -> Scale {
        self.scale = self.preferences.scale().await;
        self.scale
    }

    /// Switch between Celsius and Fahrenheit and remember the choice
    ///
    /// The page keeps its scale when the new one cannot be saved.
    pub fn toggle_scale(&mut self) -> Result<Scale, PreferencesError> {
        let next = self.scale.toggled();
        self.preferences.set_scale(next)?;
        self.scale = next;
        Ok(next)
    }
}

impl<W, P, C> Page for CurrentWeatherPage<W, P, C>
where
    W: WeatherApi,
    P: UserPreferences,
    C: LoadingController,
{
    async fn enter(&mut self) {
        self.state = PageState::Loading;

        // The indicator follows the weather request only; the scale lookup
        // does not hold it open.
        let (scale, result) = tokio::join!(
            self.preferences.scale(),
            while_loading(&self.loading, &self.loading_message, self.weather.current()),
        );

        self.scale = scale;
        match result {
            Ok(weather) => {
                self.current = Some(weather);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load current weather: {}", e);
                self.error = Some(e);
            }
        }

        self.state = PageState::Idle;
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn render(&self) -> String {
        match (&self.current, &self.error) {
            (Some(weather), _) => display::describe(weather, self.scale),
            (None, Some(e)) => e.user_message().to_string(),
            (None, None) => "No weather loaded".to_string(),
        }
    }

    fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|e| e.user_message())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::pages::testing::*;
    use crate::preferences::FilePreferences;

    type TestPage = CurrentWeatherPage<FakeWeather, FakePreferences, FakeLoading>;

    fn sample() -> Weather {
        Weather {
            temperature: 280.32,
            condition: 300,
            date: Utc.timestamp_opt(1485789600, 0).unwrap(),
        }
    }

    fn page(stored: Scale) -> (TestPage, Events) {
        let events = events();
        let mut weather = FakeWeather::new(events.clone());
        weather.current = Some(sample());
        let page = CurrentWeatherPage::new(
            weather,
            FakePreferences::new(events.clone(), stored),
            FakeLoading {
                events: events.clone(),
            },
        );
        (page, events)
    }

    #[tokio::test]
    async fn test_enter_gets_the_scale() {
        for stored in [Scale::Celsius, Scale::Fahrenheit] {
            let (mut page, events) = page(stored);
            page.enter().await;
            assert_eq!(count(&events, "scale"), 1);
            assert_eq!(page.scale(), stored);
        }
    }

    #[tokio::test]
    async fn test_enter_gets_the_current_weather() {
        let (mut page, events) = page(Scale::Celsius);
        page.enter().await;
        assert_eq!(count(&events, "current"), 1);
        assert_eq!(page.current(), Some(&sample()));
        assert_eq!(page.state(), PageState::Idle);
        assert!(page.render().starts_with("7°C Drizzle"));
    }

    #[tokio::test]
    async fn test_loading_indicator_wraps_the_weather_request() {
        let (mut page, events) = page(Scale::Celsius);
        page.enter().await;

        assert_eq!(count(&events, "create"), 1);
        assert_eq!(count(&events, "present"), 1);
        assert_eq!(count(&events, "dismiss"), 1);

        let present = position(&events, "present").unwrap();
        let current = position(&events, "current").unwrap();
        let dismiss = position(&events, "dismiss").unwrap();
        assert!(present < current);
        assert!(current < dismiss);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_does_not_wait_for_the_scale() {
        let (mut page, events) = page(Scale::Fahrenheit);
        page.preferences.delay = Duration::from_millis(500);
        page.enter().await;

        let dismiss = position(&events, "dismiss").unwrap();
        let scale = position(&events, "scale").unwrap();
        assert!(dismiss < scale);
        assert_eq!(page.scale(), Scale::Fahrenheit);
    }

    #[tokio::test]
    async fn test_failed_fetch_still_dismisses() {
        let (mut page, events) = page(Scale::Celsius);
        page.weather.current = None;
        page.enter().await;

        assert_eq!(count(&events, "dismiss"), 1);
        assert!(page.current().is_none());
        assert!(page.error().is_some());
        assert_eq!(
            page.error_message(),
            Some("Unable to connect. Check your internet connection.")
        );
        assert_eq!(page.state(), PageState::Idle);
    }

    #[tokio::test]
    async fn test_successful_reload_clears_error() {
        let (mut page, _) = page(Scale::Celsius);
        page.weather.current = None;
        page.enter().await;
        assert!(page.error().is_some());

        page.weather.current = Some(sample());
        page.enter().await;
        assert!(page.error().is_none());
        assert!(page.current().is_some());
    }

    #[test]
    fn test_toggle_from_c_to_f() {
        let (mut page, _) = page(Scale::Celsius);
        page.scale = Scale::Celsius;
        assert_eq!(page.toggle_scale().unwrap(), Scale::Fahrenheit);
        assert_eq!(page.scale(), Scale::Fahrenheit);
        assert_eq!(*page.preferences.saved.lock(), vec![Scale::Fahrenheit]);
    }

    #[test]
    fn test_toggle_from_f_to_c() {
        let (mut page, _) = page(Scale::Celsius);
        page.scale = Scale::Fahrenheit;
        assert_eq!(page.toggle_scale().unwrap(), Scale::Celsius);
        assert_eq!(page.scale(), Scale::Celsius);
        assert_eq!(*page.preferences.saved.lock(), vec![Scale::Celsius]);
    }

    #[tokio::test]
    async fn test_load_then_toggle_persists_opposite() {
        let (mut page, events) = page(Scale::Fahrenheit);
        assert_eq!(page.load_scale().await, Scale::Fahrenheit);
        assert_eq!(page.toggle_scale().unwrap(), Scale::Celsius);
        assert_eq!(count(&events, "set_scale C"), 1);
        assert_eq!(count(&events, "current"), 0);
    }

    #[test]
    fn test_toggle_touches_no_network() {
        let (mut page, events) = page(Scale::Celsius);
        page.toggle_scale().unwrap();
        assert_eq!(count(&events, "current"), 0);
        assert_eq!(count(&events, "create"), 0);
    }

    #[tokio::test]
    async fn test_toggle_fails_when_scale_cannot_be_saved() {
        // A regular file where the preferences directory should be
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let preferences = FilePreferences::in_dir(blocker.path(), Scale::Celsius);
        let events = events();
        let mut page = CurrentWeatherPage::new(
            FakeWeather::new(events.clone()),
            preferences,
            FakeLoading { events },
        );

        assert_eq!(page.load_scale().await, Scale::Celsius);
        assert!(page.toggle_scale().is_err());
        assert_eq!(page.scale(), Scale::Celsius);
        assert_eq!(page.preferences.scale().await, Scale::Celsius);
    }
}
