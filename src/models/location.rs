//! Location models: provider search results and request locations

use serde::{Deserialize, Serialize};

/// One match from the provider's free-text location search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    /// Provider-assigned unique identifier
    pub id: u64,
    /// Place name
    pub name: String,
    /// Region / province
    #[serde(default)]
    pub region: String,
    /// Country name
    #[serde(default)]
    pub country: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Provider URL slug
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchResult {
    /// Display label: "name, region, country", or "name, country" without a region
    #[must_use]
    pub fn label(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.region, self.country)
        }
    }
}

/// Where the caller wants weather for
#[derive(Debug, Clone, PartialEq)]
pub enum LocationInput {
    /// Free-text place name
    Name(String),
    /// GPS coordinates (latitude, longitude)
    Coordinates(f64, f64),
}

impl LocationInput {
    /// Value for the provider's `q` parameter
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            LocationInput::Name(name) => name.clone(),
            LocationInput::Coordinates(lat, lon) => format!("{lat},{lon}"),
        }
    }
}
