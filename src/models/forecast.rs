//! Forecast payloads from the WeatherAPI `forecast.json` endpoint

use serde::{Deserialize, Serialize};

use super::weather::{ApiLocation, Condition, Current};

/// Daily aggregate for one forecast day
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Day {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub maxwind_kph: f64,
    pub maxwind_mph: f64,
    pub totalprecip_mm: f64,
    pub totalprecip_in: f64,
    pub avgvis_km: f64,
    pub avgvis_miles: f64,
    pub avghumidity: f64,
    pub daily_chance_of_rain: u8,
    pub daily_chance_of_snow: u8,
    pub uv: f64,
    pub condition: Condition,
}

/// Sun and moon times, as local "hh:mm AM" strings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    /// Percent of the moon lit
    pub moon_illumination: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ForecastDay {
    pub date: String,
    pub date_epoch: i64,
    pub day: Day,
    pub astro: Astro,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// Government weather alert
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Alert {
    pub headline: String,
    pub msgtype: String,
    pub severity: String,
    pub urgency: String,
    pub areas: String,
    pub category: String,
    pub certainty: String,
    pub event: String,
    pub note: String,
    pub effective: String,
    pub expires: String,
    pub desc: String,
    pub instruction: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Alerts {
    pub alert: Vec<Alert>,
}

/// Response of `forecast.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastResponse {
    pub location: ApiLocation,
    #[serde(default)]
    pub current: Option<Current>,
    #[serde(default)]
    pub forecast: Forecast,
    #[serde(default)]
    pub alerts: Alerts,
}
