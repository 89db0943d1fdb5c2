//! Integration tests for WeatherService using wiremock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{FixedOffset, TimeZone, Utc};
use kws_core::WeatherConfig;
use kws_weather::{
    Coordinates, LocationError, LocationProvider, UvIndex, Weather, WeatherError, WeatherService,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LATITUDE: f64 = 42.731338;
const LONGITUDE: f64 = -88.314159;
const APP_ID: &str = "test-app-id";

/// Location provider that counts how often it is asked
#[derive(Default)]
struct CountingLocation {
    calls: AtomicUsize,
}

impl CountingLocation {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LocationProvider for CountingLocation {
    async fn current(&self) -> Result<Coordinates, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Coordinates::new(LATITUDE, LONGITUDE))
    }
}

struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    async fn current(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

fn service(server: &MockServer) -> (WeatherService<Arc<CountingLocation>>, Arc<CountingLocation>) {
    let location = Arc::new(CountingLocation::default());
    let service = WeatherService::new(location.clone(), server.uri(), APP_ID).unwrap();
    (service, location)
}

fn expect_get(endpoint: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(query_param("lat", "42.731338"))
        .and(query_param("lon", "-88.314159"))
        .and(query_param("appid", APP_ID))
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "list": [
            {"dt": 1485799200, "main": {"temp": 283.76}, "weather": [{"id": 800}]},
            {"dt": 1485810000, "main": {"temp": 282.56}, "weather": [{"id": 800}]},
            {"dt": 1485820800, "main": {"temp": 282.3}, "weather": [{"id": 800}]},
            {"dt": 1485896400, "main": {"temp": 280.3}, "weather": [{"id": 340}]},
            {"dt": 1485907200, "main": {"temp": 279.42}, "weather": [{"id": 342}]}
        ]
    })
}

fn weather(dt: i64, temperature: f64, condition: i32) -> Weather {
    Weather {
        temperature,
        condition,
        date: Utc.timestamp_opt(dt, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_current_transforms_the_data() {
    let mock_server = MockServer::start().await;

    expect_get("/weather")
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{"id": 300}, {"id": 420}],
            "main": {"temp": 280.32},
            "dt": 1485789600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (service, location) = service(&mock_server);
    let current = service.current().await.unwrap();

    assert_eq!(location.calls(), 1);
    assert_eq!(current, weather(1485789600, 280.32, 300));
}

#[tokio::test]
async fn test_forecast_groups_by_day() {
    let mock_server = MockServer::start().await;

    expect_get("/forecast")
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (service, location) = service(&mock_server);
    let central = FixedOffset::west_opt(6 * 3600).unwrap();
    let forecast = service.with_day_offset(central).forecast().await.unwrap();

    assert_eq!(location.calls(), 1);
    assert_eq!(
        forecast,
        vec![
            vec![
                weather(1485799200, 283.76, 800),
                weather(1485810000, 282.56, 800),
                weather(1485820800, 282.3, 800),
            ],
            vec![
                weather(1485896400, 280.3, 340),
                weather(1485907200, 279.42, 342),
            ],
        ]
    );
}

#[tokio::test]
async fn test_forecast_day_offset_from_config() {
    let mock_server = MockServer::start().await;

    expect_get("/forecast")
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let config = WeatherConfig {
        base_url: format!("{}/", mock_server.uri()),
        app_id: APP_ID.to_string(),
        latitude: None,
        longitude: None,
        utc_offset_minutes: Some(0),
        timeout_secs: 5,
    };
    let service =
        WeatherService::from_config(&config, Arc::new(CountingLocation::default())).unwrap();
    assert_eq!(service.day_offset().map(|o| o.local_minus_utc()), Some(0));
    let forecast = service.forecast().await.unwrap();

    let sizes: Vec<usize> = forecast.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn test_uv_index_risk_levels() {
    let cases = [
        (0.0, 0),
        (2.9, 0),
        (3.0, 1),
        (5.9, 1),
        (6.0, 2),
        (7.9, 2),
        (8.0, 3),
        (10.9, 3),
        (11.0, 4),
        (18.0, 4),
    ];

    for (value, risk_level) in cases {
        let mock_server = MockServer::start().await;

        expect_get("/uvi")
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "value": value })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let (service, location) = service(&mock_server);
        let uv = service.uv_index().await.unwrap();

        assert_eq!(location.calls(), 1);
        assert_eq!(uv, UvIndex { value, risk_level }, "value {}", value);
    }
}

#[tokio::test]
async fn test_api_error_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let (service, _) = service(&mock_server);
    let result = service.current().await;

    match result {
        Err(WeatherError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": 280.32}
        })))
        .mount(&mock_server)
        .await;

    let (service, _) = service(&mock_server);
    assert!(matches!(
        service.current().await,
        Err(WeatherError::Parse(_))
    ));
}

#[tokio::test]
async fn test_location_failure_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = WeatherService::new(DeniedLocation, mock_server.uri(), APP_ID).unwrap();
    assert!(matches!(
        service.uv_index().await,
        Err(WeatherError::Location(LocationError::PermissionDenied))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let service = WeatherService::new(
        Arc::new(CountingLocation::default()),
        "http://127.0.0.1:1",
        APP_ID,
    )
    .unwrap();

    assert!(matches!(
        service.current().await,
        Err(WeatherError::Network(_))
    ));
}
