use std::future::Future;

pub mod current_weather;
pub mod forecast;
pub mod uv_index;

pub use current_weather::CurrentWeatherPage;
pub use forecast::ForecastPage;
pub use uv_index::UvIndexPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Idle,
    Loading,
}

/// A screen that loads its data when entered
pub trait Page: Send {
    /// Load the page's data, showing a loading indicator meanwhile.
    ///
    /// Failures are kept on the page (see [`Page::error_message`]).
    fn enter(&mut self) -> impl Future<Output = ()> + Send;

    fn state(&self) -> PageState;

    /// Text shown for the page's current contents
    fn render(&self) -> String;

    /// User-facing message of the last failed load
    fn error_message(&self) -> Option<&'static str>;
}
