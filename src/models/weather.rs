//! Current-conditions payloads from the WeatherAPI `current.json` endpoint

use serde::{Deserialize, Serialize};

/// Location block echoed back by the provider
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApiLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime: String,
}

/// Weather condition with provider text, icon URL and numeric code
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}

/// Air quality readings (µg/m³) and indices
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AirQuality {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    /// US EPA index, 1 (good) to 6 (hazardous)
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<u8>,
    /// UK DEFRA index, 1 to 10
    #[serde(rename = "gb-defra-index")]
    pub gb_defra_index: Option<u8>,
}

/// Current observation
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Current {
    pub last_updated: String,
    pub last_updated_epoch: i64,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub precip_mm: f64,
    pub precip_in: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub uv: f64,
    pub gust_kph: f64,
    pub gust_mph: f64,
    /// Not sent on every plan
    pub dewpoint_c: Option<f64>,
    pub air_quality: Option<AirQuality>,
}

/// Response of `current.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentResponse {
    pub location: ApiLocation,
    pub current: Current,
}
