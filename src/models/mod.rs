//! Data models for the ThoiTiet backend
//!
//! This module contains the provider-facing models organized by concern:
//! - Location: search results and requested locations
//! - Weather: current conditions payloads
//! - Forecast: multi-day forecast and alert payloads

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{Alert, Alerts, Astro, Day, Forecast, ForecastDay, ForecastResponse};
pub use location::{LocationInput, SearchResult};
pub use weather::{AirQuality, ApiLocation, Condition, Current, CurrentResponse};
