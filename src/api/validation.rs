//! Request validation for the weather endpoints
//!
//! Error messages are Vietnamese; they are shown to the user verbatim.

use serde::Deserialize;

use crate::models::LocationInput;
use crate::normalizer::diacritics;
use crate::{Result, ThoiTietError};

pub const MIN_LOCATION_CHARS: usize = 2;
pub const MAX_LOCATION_CHARS: usize = 100;
pub const DEFAULT_FORECAST_DAYS: u8 = 7;
pub const MAX_FORECAST_DAYS: i64 = 10;

/// Body of `POST /weather/current` and `POST /weather/forecast`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub days: Option<i64>,
}

/// NFC-compose, strip characters usable for markup or quoting injection, then trim
#[must_use]
pub fn sanitize(input: &str) -> String {
    diacritics::compose(input)
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '`'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Validate the `q` parameter of the search endpoints.
///
/// # Errors
/// [`ThoiTietError::EmptyQuery`] when missing or blank, a validation error
/// when shorter than `min_chars`.
pub fn search_query(raw: Option<&str>, min_chars: usize) -> Result<String> {
    let query = sanitize(raw.unwrap_or_default());
    if query.is_empty() {
        return Err(ThoiTietError::EmptyQuery);
    }
    if query.chars().count() < min_chars {
        return Err(ThoiTietError::validation(format!(
            "Truy vấn tìm kiếm phải có ít nhất {min_chars} ký tự"
        )));
    }
    Ok(query)
}

fn is_allowed_location_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, ',' | '.' | '-')
        || ('À'..='ỹ').contains(&c)
}

/// Validate a free-text location.
///
/// # Errors
/// Validation error for bad length or characters.
pub fn location_name(raw: &str) -> Result<String> {
    let location = sanitize(raw);
    let length = location.chars().count();

    if length < MIN_LOCATION_CHARS {
        return Err(ThoiTietError::validation(format!(
            "Địa điểm phải có ít nhất {MIN_LOCATION_CHARS} ký tự"
        )));
    }
    if length > MAX_LOCATION_CHARS {
        return Err(ThoiTietError::validation(format!(
            "Địa điểm không được quá {MAX_LOCATION_CHARS} ký tự"
        )));
    }
    if !location.chars().all(is_allowed_location_char) {
        return Err(ThoiTietError::validation("Địa điểm chứa ký tự không hợp lệ"));
    }
    Ok(location)
}

/// Validate latitude and longitude ranges.
///
/// # Errors
/// Validation error naming the out-of-range value.
pub fn coordinates(lat: f64, lon: f64) -> Result<(f64, f64)> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ThoiTietError::validation(format!(
            "Vĩ độ phải nằm trong khoảng -90 đến 90 (nhận: {lat})"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ThoiTietError::validation(format!(
            "Kinh độ phải nằm trong khoảng -180 đến 180 (nhận: {lon})"
        )));
    }
    Ok((lat, lon))
}

/// Validate the forecast length, defaulting to seven days.
///
/// # Errors
/// Validation error outside 1..=10.
pub fn forecast_days(days: Option<i64>) -> Result<u8> {
    match days {
        None => Ok(DEFAULT_FORECAST_DAYS),
        Some(d) if (1..=MAX_FORECAST_DAYS).contains(&d) => Ok(d as u8),
        Some(d) => Err(ThoiTietError::validation(format!(
            "Số ngày dự báo phải từ 1 đến {MAX_FORECAST_DAYS} (nhận: {d})"
        ))),
    }
}

impl LocationRequest {
    /// The requested location: a place name or a coordinate pair, never both.
    ///
    /// # Errors
    /// Validation error when neither or both are given, or a value is invalid.
    pub fn location_input(&self) -> Result<LocationInput> {
        let name = self
            .location
            .as_deref()
            .map(sanitize)
            .filter(|name| !name.is_empty());

        match (name, self.lat, self.lon) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ThoiTietError::validation(
                "Chỉ cung cấp 'location' hoặc cặp 'lat' và 'lon', không cả hai",
            )),
            (Some(name), None, None) => Ok(LocationInput::Name(location_name(&name)?)),
            (None, Some(lat), Some(lon)) => {
                let (lat, lon) = coordinates(lat, lon)?;
                Ok(LocationInput::Coordinates(lat, lon))
            }
            _ => Err(ThoiTietError::validation(
                "Cần cung cấp 'location' hoặc cả 'lat' và 'lon'",
            )),
        }
    }
}
