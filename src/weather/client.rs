//! WeatherAPI.com HTTP client
//!
//! Wraps the `search.json`, `current.json` and `forecast.json` endpoints and
//! maps provider failures onto [`ThoiTietError`]. Requests are never retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::dispatcher::SearchProvider;
use crate::models::{CurrentResponse, ForecastResponse, LocationInput, SearchResult};
use crate::{Result, ThoiTietError};

/// Responses slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Error body returned by WeatherAPI alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    message: String,
}

/// Async client for WeatherAPI.com
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    /// Create a client from the weather configuration section.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            config.api_key.as_deref().unwrap_or_default(),
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    /// Create a client against an explicit base URL.
    ///
    /// # Errors
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ThoiTiet/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ThoiTietError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Free-text location search (`search.json`).
    ///
    /// # Errors
    /// [`ThoiTietError::EmptyQuery`] for blank input, otherwise provider failures.
    #[instrument(skip(self))]
    pub async fn search_locations(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ThoiTietError::EmptyQuery);
        }

        let results: Vec<SearchResult> = self
            .get_json("search.json", &format!("q={}", urlencoding::encode(query)))
            .await?;

        if results.is_empty() {
            debug!("No locations found for '{}'", query);
        } else {
            debug!(
                "Locations for '{}': {:?}",
                query,
                results.iter().map(SearchResult::label).collect::<Vec<_>>()
            );
        }
        Ok(results)
    }

    /// Current conditions with air quality (`current.json`).
    ///
    /// # Errors
    /// Provider failures, see [`ThoiTietError`].
    #[instrument(skip(self))]
    pub async fn current(&self, location: &LocationInput) -> Result<CurrentResponse> {
        let query = format!(
            "q={}&aqi=yes",
            urlencoding::encode(&location.to_query())
        );
        let response: CurrentResponse = self.get_json("current.json", &query).await?;

        info!(
            "Current weather for {}: {:.1}°C, {}",
            response.location.name, response.current.temp_c, response.current.condition.text
        );
        Ok(response)
    }

    /// Daily forecast with air quality and alerts (`forecast.json`).
    ///
    /// # Errors
    /// Provider failures, see [`ThoiTietError`].
    #[instrument(skip(self))]
    pub async fn forecast(&self, location: &LocationInput, days: u8) -> Result<ForecastResponse> {
        let query = format!(
            "q={}&days={}&aqi=yes&alerts=yes",
            urlencoding::encode(&location.to_query()),
            days
        );
        let response: ForecastResponse = self.get_json("forecast.json", &query).await?;

        info!(
            "Forecast for {}: {} days, {} alerts",
            response.location.name,
            response.forecast.forecastday.len(),
            response.alerts.alert.len()
        );
        Ok(response)
    }

    /// GET `{base}/{endpoint}?key=...&{query}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T> {
        // Logged form never carries the key
        let redacted = format!("{}/{}?{}", self.base_url, endpoint, query);
        let url = format!(
            "{}/{}?key={}&{}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key),
            query
        );

        debug!("WeatherAPI request: {}", redacted);
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        let status = response.status();
        let elapsed = started.elapsed();
        debug!(
            "WeatherAPI response: {} in {:.3}s",
            status,
            elapsed.as_secs_f64()
        );
        if elapsed > SLOW_RESPONSE {
            warn!(
                "Slow WeatherAPI response from {}: {:.3}s",
                endpoint,
                elapsed.as_secs_f64()
            );
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = status_error(status, &body);
            warn!("WeatherAPI {} failed: {}", endpoint, error);
            return Err(error);
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(endpoint, e)
            } else {
                error!("Failed to parse {} response: {}", endpoint, e);
                ThoiTietError::upstream(format!("invalid {endpoint} response: {}", e.without_url()))
            }
        })
    }
}

#[async_trait]
impl SearchProvider for WeatherApiClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search_locations(query).await
    }
}

/// Map a send/receive failure; the URL is dropped so the key never leaks
fn transport_error(endpoint: &str, e: reqwest::Error) -> ThoiTietError {
    if e.is_timeout() {
        ThoiTietError::timeout(format!("{endpoint} timed out"))
    } else {
        ThoiTietError::upstream(format!("{endpoint} request failed: {}", e.without_url()))
    }
}

/// Map a non-success status, keeping the provider's message when it sent one
fn status_error(status: StatusCode, body: &str) -> ThoiTietError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| format!("{} (provider code {})", b.error.message, b.error.code))
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::BAD_REQUEST => ThoiTietError::invalid_location(detail),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ThoiTietError::api_key(detail),
        _ => ThoiTietError::upstream(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}
