//! Integration tests for the ThoiTiet HTTP API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use thoitiet::api::AppState;
use thoitiet::{
    QueryDispatcher, Result, SearchProvider, SearchResult, ThoiTietConfig, ThoiTietError,
    WeatherApiClient, web,
};

/// Search provider with canned answers that records every query
#[derive(Default)]
struct CountingProvider {
    responses: HashMap<String, Result<Vec<SearchResult>>>,
    calls: Mutex<Vec<String>>,
}

impl CountingProvider {
    fn respond(mut self, query: &str, response: Result<Vec<SearchResult>>) -> Self {
        self.responses.insert(query.to_string(), response);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for CountingProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.calls.lock().unwrap().push(query.to_string());
        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn place(id: u64, name: &str, region: &str) -> SearchResult {
    SearchResult {
        id,
        name: name.to_string(),
        region: region.to_string(),
        country: "Vietnam".to_string(),
        lat: 21.0,
        lon: 105.8,
        url: None,
    }
}

fn config() -> ThoiTietConfig {
    let mut config = ThoiTietConfig::default();
    config.weather.api_key = Some("test_key_123".to_string());
    config
}

fn weather_client(base_url: &str) -> WeatherApiClient {
    WeatherApiClient::with_timeout(base_url, "test_key_123", Duration::from_secs(5)).unwrap()
}

fn app_with_provider(provider: Arc<CountingProvider>) -> Router {
    // Weather endpoints are not exercised through this app
    let state = AppState::new(&config(), provider, weather_client("http://127.0.0.1:9"));
    web::app(state)
}

async fn app_with_weather_server(server: &MockServer) -> Router {
    let state = AppState::new(
        &config(),
        Arc::new(CountingProvider::default()),
        weather_client(&server.uri()),
    );
    web::app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_dispatcher_stops_after_target_reached() {
    let provider = Arc::new(CountingProvider::default().respond(
        "hanoi",
        Ok(vec![
            place(1, "Hanoi", ""),
            place(2, "Ha Dong", "Ha Noi"),
            place(3, "Soc Son", "Ha Noi"),
        ]),
    ));
    let dispatcher = QueryDispatcher::new(provider.clone()).with_target_count(3);
    let candidates = vec!["hanoi".to_string(), "ha noi".to_string(), "Hà Nội".to_string()];

    let outcome = dispatcher.dispatch(&candidates).await.unwrap();

    let ids: Vec<u64> = outcome.results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_search_vietnamese_query_merges_candidates() {
    let provider = Arc::new(
        CountingProvider::default()
            .respond("hanoi", Ok(vec![place(1, "Hanoi", "")]))
            .respond(
                "ha noi",
                Ok(vec![place(1, "Hanoi", ""), place(2, "Ha Dong", "Ha Noi")]),
            ),
    );
    let app = app_with_provider(provider.clone());

    let (status, body) = send(app, get("/api/weather/search?q=H%C3%A0%20N%E1%BB%99i")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Tìm thấy 2 kết quả"));
    assert_eq!(body["data"][0]["label"], json!("Hanoi, Vietnam"));
    assert_eq!(body["data"][1]["label"], json!("Ha Dong, Ha Noi, Vietnam"));
    assert_eq!(provider.calls(), vec!["hanoi", "ha noi", "Hà Nội"]);
}

#[tokio::test]
async fn test_search_plain_query_uses_single_candidate() {
    let provider = Arc::new(
        CountingProvider::default().respond("London", Ok(vec![place(9, "London", "City of London")])),
    );
    let app = app_with_provider(provider.clone());

    let (status, body) = send(app, get("/api/weather/search?q=London")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(provider.calls(), vec!["London"]);
}

#[tokio::test]
async fn test_search_reports_failed_candidates_as_warnings() {
    let provider = Arc::new(
        CountingProvider::default()
            .respond("da nang", Err(ThoiTietError::upstream("HTTP 503")))
            .respond("Đà Nẵng", Ok(vec![place(5, "Da Nang", "")])),
    );
    let app = app_with_provider(provider);

    let (status, body) = send(app, get("/api/weather/search?q=%C4%90%C3%A0%20N%E1%BA%B5ng")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], json!(5));
    assert_eq!(body["warnings"][0], json!("Tìm kiếm 'da nang' thất bại"));
}

#[tokio::test]
async fn test_search_all_candidates_failing_is_bad_gateway() {
    let provider = Arc::new(
        CountingProvider::default().respond("Paris", Err(ThoiTietError::upstream("HTTP 500"))),
    );
    let app = app_with_provider(provider);

    let (status, body) = send(app, get("/api/weather/search?q=Paris")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("UPSTREAM_UNAVAILABLE"));
    assert_eq!(body["error"]["status"], json!(502));
}

#[tokio::test]
async fn test_search_validation() {
    let provider = Arc::new(CountingProvider::default());

    let (status, body) = send(app_with_provider(provider.clone()), get("/api/weather/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("EMPTY_QUERY"));

    let (status, body) = send(app_with_provider(provider.clone()), get("/api/weather/search?q=h")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_suggest_is_local() {
    let provider = Arc::new(CountingProvider::default());
    let app = app_with_provider(provider.clone());

    let (status, body) = send(app, get("/api/weather/suggest?q=sai%20gon")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name_vi"], json!("Sài Gòn"));
    assert_eq!(body["data"][0]["search_term"], json!("saigon"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_health_reports_key_configuration() {
    let app = app_with_provider(Arc::new(CountingProvider::default()));
    let (status, body) = send(app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["weatherapi_configured"], json!(true));

    let state = AppState::new(
        &ThoiTietConfig::default(),
        Arc::new(CountingProvider::default()),
        weather_client("http://127.0.0.1:9"),
    );
    let (_, body) = send(web::app(state), get("/api/health")).await;
    assert_eq!(body["weatherapi_configured"], json!(false));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app_with_provider(Arc::new(CountingProvider::default()));
    let (status, body) = send(app, get("/api/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
    assert_eq!(body["error"]["message"], json!("Endpoint không tồn tại"));
}

#[tokio::test]
async fn test_current_weather_by_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Hà Nội"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"name": "Hanoi", "country": "Vietnam", "lat": 21.03, "lon": 105.85},
            "current": {
                "temp_c": 33.0, "humidity": 65, "wind_kph": 11.2, "wind_dir": "SE", "uv": 8.0,
                "condition": {"text": "Sunny", "code": 1000},
                "air_quality": {"us-epa-index": 3}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/current", json!({"location": "Hà Nội"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Lấy dữ liệu thời tiết hiện tại thành công"));
    let data = &body["data"];
    assert_eq!(data["location"]["name_vi"], json!("Hà Nội"));
    assert_eq!(data["current"]["condition"]["text_vi"], json!("Nắng"));
    assert_eq!(data["current"]["wind_dir_vi"], json!("Đông Nam"));
    assert_eq!(data["current"]["uv_advice"]["category"], json!("Very High"));
    assert_eq!(
        data["current"]["air_quality"]["aqi_category"],
        json!("Unhealthy for Sensitive Groups")
    );
}

#[tokio::test]
async fn test_current_weather_invalid_location_from_provider() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })))
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/current", json!({"lat": 0.5, "lon": -160.25})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("INVALID_LOCATION"));
}

#[tokio::test]
async fn test_current_weather_rejected_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/current", json!({"location": "Cần Thơ"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], json!("API_KEY_ERROR"));
}

#[tokio::test]
async fn test_current_weather_validation_never_reaches_provider() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    for payload in [
        json!({}),
        json!({"lat": 95.0, "lon": 10.0}),
        json!({"location": "x"}),
        json!({"location": "Huế", "lat": 16.4, "lon": 107.5}),
    ] {
        let app = app_with_weather_server(&mock_server).await;
        let (status, body) = send(app, post_json("/api/weather/current", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    }
}

#[tokio::test]
async fn test_current_weather_requires_json_content_type() {
    let mock_server = MockServer::start().await;
    let app = app_with_weather_server(&mock_server).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/weather/current")
        .body(Body::from(r#"{"location": "Hue"}"#))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        json!("Content-Type phải là application/json")
    );
}

#[tokio::test]
async fn test_forecast_defaults_to_seven_days() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "16.07,108.22"))
        .and(query_param("days", "7"))
        .and(query_param("alerts", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"name": "Da Nang", "country": "Vietnam", "lat": 16.07, "lon": 108.22},
            "current": {"air_quality": {"us-epa-index": 1}},
            "forecast": {"forecastday": [
                {"date": "2024-10-01", "day": {"condition": {"text": "Light rain"}}}
            ]},
            "alerts": {"alert": [{"event": "Tropical Storm Warning", "severity": "Severe"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/forecast", json!({"lat": 16.07, "lon": 108.22})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Lấy dự báo 7 ngày thành công"));
    let data = &body["data"];
    assert_eq!(data["location"]["name_vi"], json!("Đà Nẵng"));
    assert_eq!(
        data["forecast"]["forecastday"][0]["day"]["condition"]["text_vi"],
        json!("Mưa nhẹ")
    );
    assert_eq!(data["alerts"]["alert"][0]["event_vi"], json!("Bão"));
    assert_eq!(data["alerts"]["alert"][0]["severity_vi"], json!("Nghiêm trọng"));
    assert_eq!(data["air_quality"]["aqi_category_vi"], json!("Tốt"));
}

#[tokio::test]
async fn test_forecast_rejects_out_of_range_days() {
    let mock_server = MockServer::start().await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/forecast", json!({"location": "Hà Nội", "days": 14})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        json!("Số ngày dự báo phải từ 1 đến 10 (nhận: 14)")
    );
}

#[tokio::test]
async fn test_wrong_method_is_json_405() {
    let app = app_with_provider(Arc::new(CountingProvider::default()));
    let (status, body) = send(app, get("/api/weather/current")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("METHOD_NOT_ALLOWED"));
    assert_eq!(body["error"]["status"], json!(405));
    assert_eq!(
        body["error"]["message"],
        json!("Phương thức HTTP không được hỗ trợ")
    );

    let app = app_with_provider(Arc::new(CountingProvider::default()));
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"]["code"], json!("METHOD_NOT_ALLOWED"));
}

#[tokio::test]
async fn test_alerts_fetch_single_day_and_flag_warnings() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "Đà Nẵng"))
        .and(query_param("days", "1"))
        .and(query_param("alerts", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"name": "Da Nang", "country": "Vietnam"},
            "current": {"air_quality": {"us-epa-index": 2}},
            "forecast": {"forecastday": [{"date": "2024-10-01"}]},
            "alerts": {"alert": [{
                "headline": "Typhoon approaching",
                "event": "Typhoon Warning",
                "severity": "Extreme"
            }]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json("/api/weather/alerts", json!({"location": "Đà Nẵng"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Lấy cảnh báo thời tiết thành công"));
    let data = &body["data"];
    assert_eq!(data["has_warnings"], json!(true));
    assert_eq!(data["location"]["name_vi"], json!("Đà Nẵng"));
    assert_eq!(data["alerts"]["alert"][0]["headline"], json!("Typhoon approaching"));
    assert_eq!(data["alerts"]["alert"][0]["event_vi"], json!("Bão"));
    assert_eq!(
        data["alerts"]["alert"][0]["severity_vi"],
        json!("Cực kỳ nghiêm trọng")
    );
    assert_eq!(data["air_quality"]["aqi_category"], json!("Moderate"));
}

#[tokio::test]
async fn test_alerts_validate_before_calling_provider() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(app, post_json("/api/weather/alerts", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_enhanced_current_adds_recommendations_and_insights() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "10.82,106.63"))
        .and(query_param("days", "1"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"name": "Ho Chi Minh City", "country": "Vietnam",
                         "lat": 10.82, "lon": 106.63, "localtime": "2024-04-20 15:30"},
            "current": {
                "temp_c": 36.5, "humidity": 88, "wind_kph": 14.0, "uv": 10.0,
                "vis_km": 10.0, "pressure_mb": 1008.0,
                "condition": {"text": "Patchy rain nearby", "code": 1063},
                "air_quality": {"pm2_5": 160.0, "pm10": 120.0, "o3": 30.0, "us-epa-index": 5}
            },
            "forecast": {"forecastday": [{
                "date": "2024-04-20",
                "astro": {"sunrise": "05:39 AM", "sunset": "06:08 PM", "moon_phase": "Full Moon"}
            }]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let app = app_with_weather_server(&mock_server).await;

    let (status, body) = send(
        app,
        post_json(
            "/api/weather/enhanced-current",
            json!({"lat": 10.82, "lon": 106.63}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!("Lấy dữ liệu thời tiết nâng cao thành công")
    );
    let data = &body["data"];
    assert_eq!(data["current"]["condition"]["text_vi"], json!("Có mưa rải rác gần đó"));
    assert_eq!(data["astronomy"]["moon_phase_vi"], json!("Trăng tròn"));
    assert_eq!(data["astronomy"]["golden_hour"]["morning_start"], json!("04:39"));

    let clothing = &data["recommendations"]["clothing"];
    assert_eq!(clothing["umbrella_needed"], json!(true));
    assert!(clothing["items"].as_array().unwrap().contains(&json!("sun_hat")));
    let fitness = &data["recommendations"]["activities"]["outdoor_fitness"];
    assert_eq!(fitness["rating"], json!(3));
    assert_eq!(fitness["recommended"], json!(false));

    let notable: Vec<&str> = data["insights"]["notable_conditions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["type"].as_str().unwrap())
        .collect();
    assert_eq!(notable, vec!["high_uv", "high_humidity", "extreme_heat"]);
    assert_eq!(
        data["insights"]["summary"]["text_vi"],
        json!("Cao hơn trung bình 8.5°C. Có điều kiện thời tiết cần lưu ý")
    );

    let air = &data["air_quality_enhanced"];
    assert_eq!(air["band"]["category"], json!("Very Unhealthy"));
    assert_eq!(air["pollutants"]["pm2_5"]["level"], json!("Very Unhealthy"));
    let advice: Vec<&str> = air["health_recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(advice, vec!["general", "exercise", "windows", "pm2_5"]);
}
