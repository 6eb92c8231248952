//! `ThoiTiet` - Vietnamese-localized weather backend
//!
//! This library provides Vietnamese city name normalization, multi-candidate
//! location search against WeatherAPI.com, and the HTTP API that serves
//! translated current conditions, forecasts, alerts and weather insights.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod normalizer;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::ThoiTietConfig;
pub use dispatcher::{QueryDispatcher, SearchOutcome, SearchProvider};
pub use error::{ErrorCode, ThoiTietError};
pub use location_resolver::CityNameResolver;
pub use models::{LocationInput, SearchResult};
pub use weather::WeatherApiClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ThoiTietError>;
