use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kws_core::{AppError, Config};
use kws_ui::{
    CurrentWeatherPage, FilePreferences, ForecastPage, Page, TracingLoadingController, UvIndexPage,
};
use kws_weather::{FixedLocation, WeatherService};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, env = "KWS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show current conditions
    #[command(alias = "now")]
    Current,

    /// Show the forecast, one line per day
    Forecast,

    /// Show the UV index and its risk level
    #[command(alias = "uvi")]
    Uv,

    /// Switch between Celsius and Fahrenheit
    ToggleScale,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    kws_core::init()?;
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => Ok(code),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let (config, _) = Config::load_validated(cli.config.as_deref())?;

    // Preferences live next to whichever config file is in use
    let config_dir = match cli.config.as_deref().and_then(Path::parent) {
        Some(dir) => dir.to_path_buf(),
        None => Config::config_dir()?,
    };
    let preferences = FilePreferences::in_dir(&config_dir, config.ui.default_scale);

    let location = FixedLocation::from_config(&config.weather);
    let service =
        WeatherService::from_config(&config.weather, location).map_err(AppError::service)?;
    let loading = TracingLoadingController;
    let message = config.ui.loading_message.clone();

    match cli.command {
        Command::Current => {
            let page = CurrentWeatherPage::new(service, preferences, loading)
                .with_loading_message(message);
            Ok(show(page).await)
        }
        Command::Forecast => {
            let day_offset = service.day_offset();
            let mut page =
                ForecastPage::new(service, preferences, loading).with_loading_message(message);
            if let Some(offset) = day_offset {
                page = page.with_day_offset(offset);
            }
            Ok(show(page).await)
        }
        Command::Uv => {
            let page = UvIndexPage::new(service, loading).with_loading_message(message);
            Ok(show(page).await)
        }
        Command::ToggleScale => {
            let mut page = CurrentWeatherPage::new(service, preferences, loading);
            page.load_scale().await;
            let scale = page.toggle_scale().map_err(AppError::service)?;
            println!("Temperatures are now shown in °{}", scale);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Enter the page and print what it shows; a failed load goes to stderr
async fn show(mut page: impl Page) -> ExitCode {
    page.enter().await;
    let text = page.render();

    if page.error_message().is_some() {
        eprintln!("{}", text);
        ExitCode::FAILURE
    } else {
        println!("{}", text);
        ExitCode::SUCCESS
    }
}
