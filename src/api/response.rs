//! JSON response envelopes and frontend views
//!
//! Every endpoint answers with either
//! `{success: true, data, message?, warnings?, timestamp}` or
//! `{success: false, error: {message, code, status}, timestamp}`.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{ErrorCode, ThoiTietError};
use crate::models::{
    AirQuality, Alert, ApiLocation, Astro, Condition, Current, CurrentResponse, Day, ForecastDay,
    ForecastResponse, SearchResult,
};
use crate::normalizer;
use crate::weather::insights::{
    self, Activities, ClothingAdvice, DayWindows, TravelConditions, WeatherInsights,
};
use crate::weather::translate::{self, AqiCategory};
use crate::weather::{
    AirQualityReport, ComfortIndex, UvAdvice, comfort_index, heat_index, uv_advice, wind_chill,
};

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Non-fatal problems, e.g. search candidates that failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub timestamp: String,
}

impl<T> SuccessBody<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
            warnings: Vec::new(),
            timestamp: timestamp(),
        }
    }

    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: ErrorCode,
    pub status: u16,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
    pub timestamp: String,
}

impl From<&ThoiTietError> for ErrorBody {
    fn from(error: &ThoiTietError) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                message: error.user_message(),
                code: error.code(),
                status: error.status_code(),
            },
            timestamp: timestamp(),
        }
    }
}

/// City search hit with a display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultView {
    pub id: u64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub url: Option<String>,
    pub label: String,
}

impl From<&SearchResult> for SearchResultView {
    fn from(result: &SearchResult) -> Self {
        Self {
            id: result.id,
            name: result.name.clone(),
            region: result.region.clone(),
            country: result.country.clone(),
            lat: result.lat,
            lon: result.lon,
            url: result.url.clone(),
            label: result.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    #[serde(flatten)]
    pub location: ApiLocation,
    pub name_vi: String,
    pub country_vi: String,
}

impl From<&ApiLocation> for LocationView {
    fn from(location: &ApiLocation) -> Self {
        Self {
            name_vi: normalizer::vietnamese_name(&location.name)
                .unwrap_or_else(|| location.name.clone()),
            country_vi: translate::country_vi(&location.country).to_string(),
            location: location.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConditionView {
    #[serde(flatten)]
    pub condition: Condition,
    pub text_vi: String,
}

impl From<&Condition> for ConditionView {
    fn from(condition: &Condition) -> Self {
        Self {
            text_vi: translate::condition_vi(&condition.text).to_string(),
            condition: condition.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AirQualityView {
    #[serde(flatten)]
    pub readings: AirQuality,
    pub aqi_category: &'static str,
    pub aqi_category_vi: &'static str,
    pub aqi_recommendation: &'static str,
    pub aqi_recommendation_vi: &'static str,
}

impl From<&AirQuality> for AirQualityView {
    fn from(air: &AirQuality) -> Self {
        let category = air.us_epa_index.and_then(AqiCategory::from_epa_index);
        Self {
            readings: air.clone(),
            aqi_category: category.map_or("Unknown", |c| c.label()),
            aqi_category_vi: category.map_or("Không xác định", |c| c.label_vi()),
            aqi_recommendation: category.map_or("", |c| c.recommendation()),
            aqi_recommendation_vi: category.map_or("", |c| c.recommendation_vi()),
        }
    }
}

/// Current observation with translations and derived metrics
#[derive(Debug, Clone, Serialize)]
pub struct CurrentView {
    pub temp_c: f64,
    pub temp_f: f64,
    pub feels_like_c: f64,
    pub feels_like_f: f64,
    pub condition: ConditionView,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub wind_degree: u16,
    pub wind_dir: String,
    pub wind_dir_vi: String,
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
    pub last_updated: String,
    pub last_updated_epoch: i64,
    pub air_quality: Option<AirQualityView>,
    pub comfort_index: ComfortIndex,
    pub heat_index_c: f64,
    /// Only present when wind chill differs from the air temperature
    pub wind_chill_c: Option<f64>,
    pub uv_advice: UvAdvice,
}

impl From<&Current> for CurrentView {
    fn from(current: &Current) -> Self {
        let wind_dir = if current.wind_dir.trim().is_empty() {
            translate::cardinal_from_degrees(current.wind_degree).to_string()
        } else {
            current.wind_dir.clone()
        };
        let chill = wind_chill(current.temp_c, current.wind_kph);

        Self {
            temp_c: current.temp_c,
            temp_f: current.temp_f,
            feels_like_c: current.feelslike_c,
            feels_like_f: current.feelslike_f,
            condition: ConditionView::from(&current.condition),
            wind_kph: current.wind_kph,
            wind_mph: current.wind_mph,
            wind_degree: current.wind_degree,
            wind_dir_vi: translate::wind_direction_vi(&wind_dir).to_string(),
            wind_dir,
            pressure_mb: current.pressure_mb,
            pressure_in: current.pressure_in,
            precip_mm: current.precip_mm,
            precip_in: current.precip_in,
            humidity: current.humidity,
            cloud: current.cloud,
            vis_km: current.vis_km,
            vis_miles: current.vis_miles,
            uv: current.uv,
            gust_kph: current.gust_kph,
            gust_mph: current.gust_mph,
            last_updated: current.last_updated.clone(),
            last_updated_epoch: current.last_updated_epoch,
            air_quality: current.air_quality.as_ref().map(AirQualityView::from),
            comfort_index: comfort_index(current.temp_c, current.humidity, current.wind_kph),
            heat_index_c: heat_index(current.temp_c, current.humidity),
            wind_chill_c: (chill != current.temp_c).then_some(chill),
            uv_advice: uv_advice(current.uv),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentWeatherView {
    pub location: LocationView,
    pub current: CurrentView,
}

impl From<&CurrentResponse> for CurrentWeatherView {
    fn from(response: &CurrentResponse) -> Self {
        Self {
            location: LocationView::from(&response.location),
            current: CurrentView::from(&response.current),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avgtemp_c: f64,
    pub avgtemp_f: f64,
    pub condition: ConditionView,
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
}

impl From<&Day> for DayView {
    fn from(day: &Day) -> Self {
        Self {
            maxtemp_c: day.maxtemp_c,
            maxtemp_f: day.maxtemp_f,
            mintemp_c: day.mintemp_c,
            mintemp_f: day.mintemp_f,
            avgtemp_c: day.avgtemp_c,
            avgtemp_f: day.avgtemp_f,
            condition: ConditionView::from(&day.condition),
            maxwind_kph: day.maxwind_kph,
            maxwind_mph: day.maxwind_mph,
            totalprecip_mm: day.totalprecip_mm,
            totalprecip_in: day.totalprecip_in,
            avgvis_km: day.avgvis_km,
            avgvis_miles: day.avgvis_miles,
            avghumidity: day.avghumidity,
            daily_chance_of_rain: day.daily_chance_of_rain,
            daily_chance_of_snow: day.daily_chance_of_snow,
            uv: day.uv,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AstroView {
    #[serde(flatten)]
    pub astro: Astro,
    pub moon_phase_vi: String,
}

impl From<&Astro> for AstroView {
    fn from(astro: &Astro) -> Self {
        Self {
            moon_phase_vi: translate::moon_phase_vi(&astro.moon_phase).to_string(),
            astro: astro.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastDayView {
    pub date: String,
    pub date_epoch: i64,
    pub day: DayView,
    pub astro: AstroView,
}

impl From<&ForecastDay> for ForecastDayView {
    fn from(day: &ForecastDay) -> Self {
        Self {
            date: day.date.clone(),
            date_epoch: day.date_epoch,
            day: DayView::from(&day.day),
            astro: AstroView::from(&day.astro),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    pub event_vi: String,
    pub severity_vi: String,
}

impl From<&Alert> for AlertView {
    fn from(alert: &Alert) -> Self {
        Self {
            event_vi: translate::alert_event_vi(&alert.event).to_string(),
            severity_vi: translate::alert_severity_vi(&alert.severity).to_string(),
            alert: alert.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastDaysView {
    pub forecastday: Vec<ForecastDayView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertsView {
    pub alert: Vec<AlertView>,
}

/// Forecast with translated days, alerts and current air quality
#[derive(Debug, Clone, Serialize)]
pub struct ForecastWeatherView {
    pub location: LocationView,
    pub forecast: ForecastDaysView,
    pub alerts: AlertsView,
    pub air_quality: Option<AirQualityView>,
}

impl From<&ForecastResponse> for ForecastWeatherView {
    fn from(response: &ForecastResponse) -> Self {
        Self {
            location: LocationView::from(&response.location),
            forecast: ForecastDaysView {
                forecastday: response
                    .forecast
                    .forecastday
                    .iter()
                    .map(ForecastDayView::from)
                    .collect(),
            },
            alerts: AlertsView {
                alert: response.alerts.alert.iter().map(AlertView::from).collect(),
            },
            air_quality: current_air_quality(response).map(AirQualityView::from),
        }
    }
}

fn current_air_quality(response: &ForecastResponse) -> Option<&AirQuality> {
    response
        .current
        .as_ref()
        .and_then(|c| c.air_quality.as_ref())
}

/// Active alerts plus the air-quality band, flagged when either warrants attention
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAlertsView {
    pub location: LocationView,
    pub alerts: AlertsView,
    pub air_quality: Option<AirQualityView>,
    /// Any alert, or air unhealthy for sensitive groups or worse
    pub has_warnings: bool,
}

impl From<&ForecastResponse> for WeatherAlertsView {
    fn from(response: &ForecastResponse) -> Self {
        let air = current_air_quality(response);
        let poor_air = air
            .and_then(|a| a.us_epa_index)
            .and_then(AqiCategory::from_epa_index)
            .is_some_and(|c| c >= AqiCategory::UnhealthyForSensitiveGroups);

        Self {
            location: LocationView::from(&response.location),
            alerts: AlertsView {
                alert: response.alerts.alert.iter().map(AlertView::from).collect(),
            },
            air_quality: air.map(AirQualityView::from),
            has_warnings: !response.alerts.alert.is_empty() || poor_air,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AstronomyView {
    #[serde(flatten)]
    pub astro: AstroView,
    pub golden_hour: Option<DayWindows>,
    pub blue_hour: Option<DayWindows>,
}

impl From<&Astro> for AstronomyView {
    fn from(astro: &Astro) -> Self {
        let (golden_hour, blue_hour) = insights::light_windows(&astro.sunrise, &astro.sunset)
            .map_or((None, None), |w| (Some(w.golden_hour), Some(w.blue_hour)));
        Self {
            astro: AstroView::from(astro),
            golden_hour,
            blue_hour,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentalView {
    pub uv_index: f64,
    #[serde(flatten)]
    pub uv_advice: UvAdvice,
    /// Only on plans that report it
    pub dew_point_c: Option<f64>,
    pub heat_index_c: f64,
    pub wind_chill_c: Option<f64>,
    pub comfort_index: ComfortIndex,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsView {
    pub clothing: ClothingAdvice,
    pub activities: Activities,
    pub travel: TravelConditions,
}

/// Current conditions with astronomy, recommendations, air-quality report
/// and insights
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedCurrentView {
    pub location: LocationView,
    pub current: CurrentView,
    /// Taken from the first forecast day; absent when the provider sent none
    pub astronomy: Option<AstronomyView>,
    pub environmental: EnvironmentalView,
    pub recommendations: RecommendationsView,
    pub air_quality_enhanced: Option<AirQualityReport>,
    pub insights: WeatherInsights,
}

impl TryFrom<&ForecastResponse> for EnhancedCurrentView {
    type Error = ThoiTietError;

    fn try_from(response: &ForecastResponse) -> Result<Self, Self::Error> {
        let current = response
            .current
            .as_ref()
            .ok_or_else(|| ThoiTietError::upstream("forecast response has no current block"))?;
        let view = CurrentView::from(current);

        Ok(Self {
            location: LocationView::from(&response.location),
            astronomy: response
                .forecast
                .forecastday
                .first()
                .map(|day| AstronomyView::from(&day.astro)),
            environmental: EnvironmentalView {
                uv_index: current.uv,
                uv_advice: view.uv_advice,
                dew_point_c: current.dewpoint_c,
                heat_index_c: view.heat_index_c,
                wind_chill_c: view.wind_chill_c,
                comfort_index: view.comfort_index,
            },
            recommendations: RecommendationsView {
                clothing: insights::clothing(current),
                activities: insights::activities(current),
                travel: insights::travel_conditions(current),
            },
            air_quality_enhanced: current.air_quality.as_ref().map(AirQualityReport::from),
            insights: insights::weather_insights(current, &response.location),
            current: view,
        })
    }
}
