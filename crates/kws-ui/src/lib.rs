//! Presentation layer for KWS.
//!
//! Pages take their collaborators (weather source, preference store, loading
//! indicator) as generic parameters so they can run against the real service
//! or against test doubles.

pub mod display;
pub mod loading;
pub mod pages;
pub mod preferences;

pub use loading::{LoadingController, LoadingIndicator, TracingLoadingController};
pub use pages::{CurrentWeatherPage, ForecastPage, Page, PageState, UvIndexPage};
pub use preferences::{FilePreferences, MemoryPreferences, PreferencesError, UserPreferences};
