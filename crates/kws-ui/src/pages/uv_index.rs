use kws_core::error::UserFacingError;
use kws_weather::{UvIndex, WeatherApi, WeatherError};

use crate::loading::{while_loading, LoadingController};
use crate::pages::{Page, PageState};

pub struct UvIndexPage<W, C> {
    weather: W,
    loading: C,
    loading_message: String,
    uv_index: Option<UvIndex>,
    error: Option<WeatherError>,
    state: PageState,
}

impl<W, C> UvIndexPage<W, C>
where
    W: WeatherApi,
    C: LoadingController,
{
    pub fn new(weather: W, loading: C) -> Self {
        Self {
            weather,
            loading,
            loading_message: "Loading...".to_string(),
            uv_index: None,
            error: None,
            state: PageState::Idle,
        }
    }

    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn uv_index(&self) -> Option<UvIndex> {
        self.uv_index
    }
}

impl<W, C> Page for UvIndexPage<W, C>
where
    W: WeatherApi,
    C: LoadingController,
{
    async fn enter(&mut self) {
        self.state = PageState::Loading;

        let result =
            while_loading(&self.loading, &self.loading_message, self.weather.uv_index()).await;
        match result {
            Ok(uv) => {
                self.uv_index = Some(uv);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load UV index: {}", e);
                self.error = Some(e);
            }
        }

        self.state = PageState::Idle;
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn render(&self) -> String {
        match (&self.uv_index, &self.error) {
            (Some(uv), _) => format!(
                "UV index {:.1} ({})\n{}",
                uv.value,
                uv.risk_description(),
                uv.advice()
            ),
            (None, Some(e)) => e.user_message().to_string(),
            (None, None) => "No UV index loaded".to_string(),
        }
    }

    fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|e| e.user_message())
    }
}
