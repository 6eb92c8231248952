//! Weather provider access and presentation helpers

pub mod air_quality;
pub mod client;
pub mod insights;
pub mod metrics;
pub mod translate;

pub use air_quality::AirQualityReport;
pub use client::WeatherApiClient;
pub use metrics::{ComfortIndex, UvAdvice, comfort_index, heat_index, uv_advice, wind_chill};
pub use translate::AqiCategory;
