//! HTTP API mounted under `/api`

pub mod response;
pub mod validation;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::ThoiTietConfig;
use crate::dispatcher::SearchProvider;
use crate::location_resolver::CityNameResolver;
use crate::normalizer::{self, Suggestion};
use crate::weather::WeatherApiClient;
use crate::{Result, ThoiTietError};

use response::{
    CurrentWeatherView, EnhancedCurrentView, ErrorBody, ForecastWeatherView, SearchResultView,
    SuccessBody, WeatherAlertsView,
};
use validation::LocationRequest;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    resolver: CityNameResolver,
    weather: WeatherApiClient,
    min_query_chars: usize,
    weatherapi_configured: bool,
}

impl AppState {
    /// State with an explicit search provider, used by tests to count calls
    #[must_use]
    pub fn new(
        config: &ThoiTietConfig,
        provider: Arc<dyn SearchProvider>,
        weather: WeatherApiClient,
    ) -> Self {
        Self {
            resolver: CityNameResolver::new(provider, config.search.max_results),
            weather,
            min_query_chars: config.search.min_query_chars,
            weatherapi_configured: config.weather.is_configured(),
        }
    }

    /// State backed by WeatherAPI for both search and weather data.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_config(config: &ThoiTietConfig) -> Result<Self> {
        let weather = WeatherApiClient::new(&config.weather)?;
        let provider: Arc<dyn SearchProvider> = Arc::new(weather.clone());
        Ok(Self::new(config, provider, weather))
    }
}

impl IntoResponse for ThoiTietError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weather/search", get(search_cities))
        .route("/weather/suggest", get(suggest_cities))
        .route("/weather/current", post(current_weather))
        .route("/weather/forecast", post(forecast_weather))
        .route("/weather/alerts", post(weather_alerts))
        .route("/weather/enhanced-current", post(enhanced_current_weather))
        .route("/health", get(health_check))
        .method_not_allowed_fallback(method_not_allowed)
}

/// JSON 404 for unknown routes
pub async fn not_found() -> ThoiTietError {
    ThoiTietError::not_found("unknown endpoint")
}

/// JSON 405 for known routes called with the wrong method
pub async fn method_not_allowed(method: Method) -> ThoiTietError {
    ThoiTietError::method_not_allowed(method.as_str())
}

/// Alerts and enhanced-current only need today's forecast day
const SINGLE_DAY: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub weatherapi_configured: bool,
}

fn json_body(payload: std::result::Result<Json<LocationRequest>, JsonRejection>) -> Result<LocationRequest> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ThoiTietError::validation(
            "Content-Type phải là application/json",
        )),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(ThoiTietError::validation("Dữ liệu request không hợp lệ"))
        }
    }
}

#[instrument(skip_all)]
async fn search_cities(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SuccessBody<Vec<SearchResultView>>>> {
    let query = validation::search_query(params.q.as_deref(), state.min_query_chars)?;
    info!("City search for '{}'", query);

    let outcome = state.resolver.resolve(&query).await?;
    let warnings = outcome
        .failures
        .iter()
        .map(|f| format!("Tìm kiếm '{}' thất bại", f.candidate))
        .collect();
    let results: Vec<SearchResultView> =
        outcome.results.iter().map(SearchResultView::from).collect();
    let message = format!("Tìm thấy {} kết quả", results.len());

    Ok(Json(SuccessBody::new(results, message).with_warnings(warnings)))
}

#[instrument(skip_all)]
async fn suggest_cities(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SuccessBody<Vec<Suggestion>>>> {
    let query = validation::search_query(params.q.as_deref(), state.min_query_chars)?;
    let suggestions = normalizer::suggest(&query);
    let message = format!("Tìm thấy {} gợi ý", suggestions.len());
    Ok(Json(SuccessBody::new(suggestions, message)))
}

#[instrument(skip_all)]
async fn current_weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<SuccessBody<CurrentWeatherView>>> {
    let location = json_body(payload)?.location_input()?;
    info!("Current weather for {:?}", location);

    let response = state.weather.current(&location).await?;
    Ok(Json(SuccessBody::new(
        CurrentWeatherView::from(&response),
        "Lấy dữ liệu thời tiết hiện tại thành công",
    )))
}

#[instrument(skip_all)]
async fn forecast_weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<SuccessBody<ForecastWeatherView>>> {
    let request = json_body(payload)?;
    let location = request.location_input()?;
    let days = validation::forecast_days(request.days)?;
    info!("{}-day forecast for {:?}", days, location);

    let response = state.weather.forecast(&location, days).await?;
    Ok(Json(SuccessBody::new(
        ForecastWeatherView::from(&response),
        format!("Lấy dự báo {days} ngày thành công"),
    )))
}

#[instrument(skip_all)]
async fn weather_alerts(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<SuccessBody<WeatherAlertsView>>> {
    let location = json_body(payload)?.location_input()?;
    info!("Weather alerts for {:?}", location);

    let response = state.weather.forecast(&location, SINGLE_DAY).await?;
    let view = WeatherAlertsView::from(&response);
    debug!(
        "{} alerts, has_warnings={}",
        view.alerts.alert.len(),
        view.has_warnings
    );
    Ok(Json(SuccessBody::new(view, "Lấy cảnh báo thời tiết thành công")))
}

#[instrument(skip_all)]
async fn enhanced_current_weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<SuccessBody<EnhancedCurrentView>>> {
    let location = json_body(payload)?.location_input()?;
    info!("Enhanced current weather for {:?}", location);

    let response = state.weather.forecast(&location, SINGLE_DAY).await?;
    Ok(Json(SuccessBody::new(
        EnhancedCurrentView::try_from(&response)?,
        "Lấy dữ liệu thời tiết nâng cao thành công",
    )))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "Weather API is running",
        weatherapi_configured: state.weatherapi_configured,
    })
}
