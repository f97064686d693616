//! Integration tests for WeatherProvider and IpGeolocator using wiremock.

use cirrus_core::{LocationError, WeatherApiConfig, WeatherError};
use cirrus_weather::{
    Background, Coordinates, Geolocator, IpGeolocator, WeatherApi, WeatherProvider, WeatherQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> WeatherProvider {
    let config = WeatherApiConfig {
        api_key: "secret".to_string(),
        base_url: server.uri(),
        ..WeatherApiConfig::default()
    };
    WeatherProvider::new(&config).unwrap()
}

fn paris_rain() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "main": { "temp": 18, "humidity": 60 },
        "weather": [{ "main": "Rain", "description": "light rain" }]
    })
}

#[tokio::test]
async fn test_fetch_by_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "secret"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_rain()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let report = provider
        .current(&WeatherQuery::City("Paris".to_string()))
        .await
        .unwrap();

    assert_eq!(report.name, "Paris");
    assert_eq!(report.main.temp, 18.0);
    assert_eq!(report.main.humidity, 60.0);
    assert_eq!(report.weather[0].description, "light rain");
    assert_eq!(report.background(), Some(Background::Rain));
}

#[tokio::test]
async fn test_fetch_by_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "40.7"))
        .and(query_param("lon", "-74"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "New York",
            "main": { "temp": 4.5, "humidity": 71 },
            "weather": [{ "main": "Clouds", "description": "overcast clouds" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let coords = Coordinates::new(40.7, -74.0).unwrap();
    let report = provider
        .current(&WeatherQuery::Coordinates(coords))
        .await
        .unwrap();

    assert_eq!(report.name, "New York");
    assert_eq!(report.background(), Some(Background::Cloudy));
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .current(&WeatherQuery::City("Atlantis".to_string()))
        .await;

    assert!(matches!(result, Err(WeatherError::Status { status: 404 })));
}

#[tokio::test]
async fn test_unauthorized_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let err = provider
        .current(&WeatherQuery::City("Paris".to_string()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("401"), "{}", err);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .current(&WeatherQuery::City("Paris".to_string()))
        .await;

    assert!(matches!(result, Err(WeatherError::Parse(_))));
}

#[tokio::test]
async fn test_empty_conditions_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Paris",
            "main": { "temp": 18, "humidity": 60 },
            "weather": []
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .current(&WeatherQuery::City("Paris".to_string()))
        .await;

    assert!(matches!(result, Err(WeatherError::Parse(_))));
}

#[tokio::test]
async fn test_ip_geolocator_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 52.52,
            "lon": 13.405,
            "city": "Berlin"
        })))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::new(&format!("{}/json", mock_server.uri())).unwrap();
    let coords = geo.locate().await.unwrap();

    assert_eq!(coords.latitude, 52.52);
    assert_eq!(coords.longitude, 13.405);
}

#[tokio::test]
async fn test_ip_geolocator_reported_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::new(&format!("{}/json", mock_server.uri())).unwrap();
    let err = geo.locate().await.unwrap_err();

    match err {
        LocationError::ServiceUnavailable(msg) => assert_eq!(msg, "private range"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ip_geolocator_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let geo = IpGeolocator::new(&mock_server.uri()).unwrap();
    assert!(matches!(
        geo.locate().await,
        Err(LocationError::ServiceUnavailable(_))
    ));
}
