//! Recommendations and insights derived from a single current observation.
//!
//! Everything here is a pure function of provider data. Thresholds are in
//! °C, km/h, km and mb, matching the WeatherAPI metric fields.

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use crate::models::{ApiLocation, Current};

fn condition_mentions(current: &Current, keywords: &[&str]) -> bool {
    let text = current.condition.text.to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn is_rainy(current: &Current) -> bool {
    condition_mentions(current, &["rain", "drizzle", "shower"])
}

fn is_stormy(current: &Current) -> bool {
    condition_mentions(current, &["storm", "thunder"])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClothingAdvice {
    pub suggestion: String,
    pub suggestion_vi: String,
    pub items: Vec<&'static str>,
    pub umbrella_needed: bool,
    pub sunglasses_needed: bool,
    /// low, medium or high
    pub sun_protection_level: &'static str,
}

#[must_use]
pub fn clothing(current: &Current) -> ClothingAdvice {
    let temp = current.temp_c;
    let (mut items, base, base_vi): (Vec<&'static str>, _, _) = if temp < 0.0 {
        (
            vec!["heavy_coat", "warm_hat", "gloves", "warm_boots"],
            "Heavy winter clothing recommended",
            "Nên mặc quần áo mùa đông dày",
        )
    } else if temp < 10.0 {
        (
            vec!["heavy_jacket", "long_pants", "closed_shoes"],
            "Warm jacket and long pants recommended",
            "Nên mặc áo khoác ấm và quần dài",
        )
    } else if temp < 20.0 {
        (
            vec!["light_jacket", "long_pants", "closed_shoes"],
            "Light jacket recommended",
            "Nên mặc áo khoác nhẹ",
        )
    } else if temp < 25.0 {
        (
            vec!["long_sleeve_shirt", "long_pants", "comfortable_shoes"],
            "Comfortable clothing, light layers",
            "Quần áo thoải mái, áo mỏng",
        )
    } else if temp < 30.0 {
        (
            vec!["t_shirt", "light_pants", "breathable_shoes"],
            "Light, breathable clothing",
            "Quần áo nhẹ, thoáng mát",
        )
    } else {
        (
            vec!["light_shirt", "shorts", "sandals"],
            "Very light, loose clothing",
            "Quần áo rất nhẹ, thoáng",
        )
    };

    let mut parts = vec![base];
    let mut parts_vi = vec![base_vi];

    let umbrella_needed = is_rainy(current) || is_stormy(current);
    if umbrella_needed {
        items.push("umbrella");
        parts.push("bring umbrella");
        parts_vi.push("mang theo ô");
    }

    let sunglasses_needed = current.uv > 3.0;
    if sunglasses_needed {
        items.push("sunglasses");
    }
    if current.uv > 7.0 {
        items.push("sun_hat");
        parts.push("strong sun protection needed");
        parts_vi.push("cần bảo vệ chống nắng mạnh");
    }

    if current.wind_kph > 25.0 {
        parts.push("expect windy conditions");
        parts_vi.push("trời có gió mạnh");
    }

    ClothingAdvice {
        suggestion: parts.join(", "),
        suggestion_vi: parts_vi.join(", "),
        items,
        umbrella_needed,
        sunglasses_needed,
        sun_protection_level: match current.uv {
            uv if uv > 7.0 => "high",
            uv if uv > 3.0 => "medium",
            _ => "low",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Precaution {
    pub message: &'static str,
    pub message_vi: &'static str,
}

/// Rating out of 10; recommended from 6 up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRating {
    pub recommended: bool,
    pub rating: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub best_times: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub precautions: Vec<Precaution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl ActivityRating {
    const RECOMMENDED_FROM: i32 = 6;

    fn new(score: i32) -> Self {
        Self {
            recommended: score >= Self::RECOMMENDED_FROM,
            rating: score.clamp(0, 10) as u8,
            best_times: Vec::new(),
            precautions: Vec::new(),
            reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activities {
    pub outdoor_fitness: ActivityRating,
    pub beach_activities: ActivityRating,
    pub gardening: ActivityRating,
}

fn outdoor_fitness(current: &Current) -> ActivityRating {
    let mut score = 10;
    if current.temp_c < 5.0 || current.temp_c > 35.0 {
        score -= 3;
    }
    if condition_mentions(current, &["rain"]) || is_stormy(current) {
        score -= 4;
    }
    if current.wind_kph > 30.0 {
        score -= 2;
    }

    let mut rating = ActivityRating::new(score);
    rating.best_times = vec!["06:00-08:00", "17:00-19:00"];
    if current.uv > 8.0 {
        rating.precautions.push(Precaution {
            message: "Wear sunscreen and hat",
            message_vi: "Mang kem chống nắng và mũ",
        });
    }
    if current.humidity > 80 {
        rating.precautions.push(Precaution {
            message: "Bring extra water",
            message_vi: "Mang thêm nước",
        });
    }
    rating
}

fn beach(current: &Current) -> ActivityRating {
    let mut score = 10;
    // Last matching rule names the reason
    let mut reason = None;
    if current.temp_c < 20.0 {
        score -= 4;
        reason = Some("Temperature too low for beach activities");
    }
    if condition_mentions(current, &["rain"]) {
        score -= 5;
        reason = Some("Rainy conditions");
    }
    if current.wind_kph > 25.0 {
        score -= 3;
        reason = Some("Very windy conditions");
    }
    if current.uv > 9.0 {
        score -= 2;
        reason = Some("Extremely high UV levels");
    }

    let mut rating = ActivityRating::new(score);
    rating.reason = if rating.recommended {
        Some("Good conditions for beach")
    } else {
        reason
    };
    rating
}

fn gardening(current: &Current) -> ActivityRating {
    let mut score = 10;
    if condition_mentions(current, &["rain"]) || is_stormy(current) {
        score -= 6;
    }
    if current.temp_c < 5.0 || current.temp_c > 35.0 {
        score -= 3;
    }
    if current.wind_kph > 20.0 {
        score -= 2;
    }

    let mut rating = ActivityRating::new(score);
    rating.best_times = if current.uv > 8.0 {
        vec!["07:00-08:00", "17:00-18:00"]
    } else {
        vec!["07:00-09:00", "16:00-18:00"]
    };
    rating
}

#[must_use]
pub fn activities(current: &Current) -> Activities {
    Activities {
        outdoor_fitness: outdoor_fitness(current),
        beach_activities: beach(current),
        gardening: gardening(current),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelConditions {
    pub driving_conditions: &'static str,
    pub driving_conditions_vi: &'static str,
    pub visibility_rating: u8,
    pub road_conditions: &'static str,
    pub road_conditions_vi: &'static str,
    pub visibility_km: f64,
}

#[must_use]
pub fn travel_conditions(current: &Current) -> TravelConditions {
    let vis = current.vis_km;
    let (mut driving, mut driving_vi, visibility_rating) = if vis < 1.0 {
        ("Poor", "Kém", 2)
    } else if vis < 5.0 {
        ("Fair", "Khá", 5)
    } else if vis < 10.0 {
        ("Good", "Tốt", 8)
    } else {
        ("Good", "Tốt", 10)
    };
    let (mut road, mut road_vi) = ("Dry", "Khô ráo");

    if condition_mentions(current, &["rain", "drizzle"]) {
        (road, road_vi) = ("Wet", "Ướt");
        if driving == "Good" {
            (driving, driving_vi) = ("Fair", "Khá");
        }
    }
    if condition_mentions(current, &["snow", "ice", "sleet"]) {
        (road, road_vi) = ("Icy", "Đóng băng");
        (driving, driving_vi) = ("Poor", "Kém");
    }
    if is_stormy(current) || current.wind_kph > 40.0 {
        (driving, driving_vi) = ("Dangerous", "Nguy hiểm");
    }

    TravelConditions {
        driving_conditions: driving,
        driving_conditions_vi: driving_vi,
        visibility_rating,
        road_conditions: road,
        road_conditions_vi: road_vi,
        visibility_km: vis,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Caution,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotableCondition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub severity: Severity,
    pub message: String,
    pub message_vi: String,
}

impl NotableCondition {
    fn new(kind: &'static str, severity: Severity, message: String, message_vi: String) -> Self {
        Self {
            kind,
            severity,
            message,
            message_vi,
        }
    }
}

/// Conditions worth calling out, at most one per quantity.
#[must_use]
pub fn notable_conditions(current: &Current) -> Vec<NotableCondition> {
    use Severity::{Caution, Info, Warning};

    let mut notable = Vec::new();
    let uv = current.uv;
    if uv > 8.0 {
        notable.push(NotableCondition::new(
            "high_uv",
            Warning,
            format!("UV index is extremely high ({uv}) - take extra sun protection"),
            format!("Chỉ số UV cực cao ({uv}) - cần bảo vệ chống nắng tối đa"),
        ));
    } else if uv > 6.0 {
        notable.push(NotableCondition::new(
            "moderate_uv",
            Caution,
            format!("UV index is high ({uv}) - use sun protection"),
            format!("Chỉ số UV cao ({uv}) - cần bảo vệ chống nắng"),
        ));
    }

    let humidity = current.humidity;
    if humidity > 85 {
        notable.push(NotableCondition::new(
            "high_humidity",
            Info,
            format!("Very high humidity ({humidity}%) - may feel uncomfortable"),
            format!("Độ ẩm rất cao ({humidity}%) - có thể cảm thấy khó chịu"),
        ));
    }

    let wind = current.wind_kph;
    if wind > 40.0 {
        notable.push(NotableCondition::new(
            "strong_wind",
            Warning,
            format!("Strong winds ({wind} km/h) - be cautious outdoors"),
            format!("Gió mạnh ({wind} km/h) - cẩn thận khi ra ngoài"),
        ));
    } else if wind > 25.0 {
        notable.push(NotableCondition::new(
            "moderate_wind",
            Caution,
            format!("Moderate winds ({wind} km/h) - secure loose objects"),
            format!("Gió vừa ({wind} km/h) - cố định đồ vật nhẹ"),
        ));
    }

    let vis = current.vis_km;
    if vis < 2.0 {
        notable.push(NotableCondition::new(
            "low_visibility",
            Warning,
            format!("Very low visibility ({vis} km) - drive carefully"),
            format!("Tầm nhìn rất hạn chế ({vis} km) - lái xe cẩn thận"),
        ));
    } else if vis < 5.0 {
        notable.push(NotableCondition::new(
            "reduced_visibility",
            Caution,
            format!("Reduced visibility ({vis} km) - exercise caution"),
            format!("Tầm nhìn hạn chế ({vis} km) - cần thận trọng"),
        ));
    }

    let temp = current.temp_c;
    if temp > 35.0 {
        notable.push(NotableCondition::new(
            "extreme_heat",
            Warning,
            format!("Extreme heat ({temp}°C) - avoid prolonged sun exposure"),
            format!("Nắng nóng cực độ ({temp}°C) - tránh phơi nắng lâu"),
        ));
    } else if temp < 5.0 {
        notable.push(NotableCondition::new(
            "extreme_cold",
            Warning,
            format!("Very cold temperature ({temp}°C) - dress warmly"),
            format!("Nhiệt độ rất lạnh ({temp}°C) - mặc ấm"),
        ));
    }

    // Zero means the provider omitted it
    let pressure = current.pressure_mb;
    if pressure > 0.0 && pressure < 1000.0 {
        notable.push(NotableCondition::new(
            "low_pressure",
            Info,
            format!("Low atmospheric pressure ({pressure} mb) - weather may change"),
            format!("Áp suất thấp ({pressure} mb) - thời tiết có thể thay đổi"),
        ));
    } else if pressure > 1025.0 {
        notable.push(NotableCondition::new(
            "high_pressure",
            Info,
            format!("High atmospheric pressure ({pressure} mb) - stable weather expected"),
            format!("Áp suất cao ({pressure} mb) - thời tiết ổn định"),
        ));
    }

    notable
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimateType {
    Tropical,
    Subtropical,
    Temperate,
}

impl ClimateType {
    #[must_use]
    pub fn for_latitude(lat: f64) -> Self {
        match lat.abs() {
            l if l < 25.0 => Self::Tropical,
            l if l < 35.0 => Self::Subtropical,
            _ => Self::Temperate,
        }
    }

    /// Rough monthly mean temperature, January first
    fn monthly_average(self) -> [f64; 12] {
        match self {
            Self::Tropical => [
                20.0, 22.0, 25.0, 28.0, 30.0, 30.0, 29.0, 29.0, 28.0, 26.0, 23.0, 21.0,
            ],
            Self::Subtropical => [
                15.0, 18.0, 22.0, 26.0, 30.0, 33.0, 35.0, 34.0, 30.0, 25.0, 20.0, 16.0,
            ],
            Self::Temperate => [
                5.0, 8.0, 13.0, 18.0, 23.0, 28.0, 30.0, 29.0, 24.0, 18.0, 12.0, 7.0,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Season {
    pub name: &'static str,
    pub name_vi: &'static str,
}

#[must_use]
pub fn season(month: u32, lat: f64) -> Season {
    // Southern hemisphere seasons run six months behind
    let month = if lat >= 0.0 { month } else { (month + 5) % 12 + 1 };
    let (name, name_vi) = match month {
        12 | 1 | 2 => ("Winter", "Mùa đông"),
        3..=5 => ("Spring", "Mùa xuân"),
        6..=8 => ("Summer", "Mùa hè"),
        _ => ("Autumn", "Mùa thu"),
    };
    Season { name, name_vi }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalComparison {
    pub vs_average: String,
    pub vs_average_vi: String,
    pub seasonal_average: f64,
    /// 0-100, ten points per degree away from the average
    pub percentile: u8,
    pub climate_type: ClimateType,
    pub season: Season,
}

#[must_use]
pub fn seasonal_comparison(temp_c: f64, lat: f64, month: u32) -> SeasonalComparison {
    let climate_type = ClimateType::for_latitude(lat);
    let month_index = (month.clamp(1, 12) - 1) as usize;
    let seasonal_average = climate_type.monthly_average()[month_index];
    let difference = ((temp_c - seasonal_average) * 10.0).round() / 10.0;

    let (vs_average, vs_average_vi) = if difference > 0.0 {
        (
            format!("+{difference:.1}°C above average"),
            format!("Cao hơn trung bình {difference:.1}°C"),
        )
    } else if difference < 0.0 {
        let below = difference.abs();
        (
            format!("-{below:.1}°C below average"),
            format!("Thấp hơn trung bình {below:.1}°C"),
        )
    } else {
        (
            "At seasonal average".to_string(),
            "Bằng mức trung bình".to_string(),
        )
    };

    SeasonalComparison {
        vs_average,
        vs_average_vi,
        seasonal_average,
        percentile: (50.0 + difference * 10.0).clamp(0.0, 100.0).round() as u8,
        climate_type,
        season: season(month, lat),
    }
}

/// Month of the location's local time, or the current UTC month when the
/// provider's `localtime` is missing or malformed
#[must_use]
pub fn local_month(location: &ApiLocation) -> u32 {
    NaiveDateTime::parse_from_str(location.localtime.trim(), "%Y-%m-%d %H:%M")
        .map_or_else(|_| Utc::now().month(), |local| local.month())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub text: String,
    pub text_vi: String,
}

fn summarize(seasonal: &SeasonalComparison, notable: &[NotableCondition]) -> Summary {
    let mut parts = vec![seasonal.vs_average.trim_start_matches(['+', '-']).to_string()];
    let mut parts_vi = vec![seasonal.vs_average_vi.clone()];

    if notable.iter().any(|c| c.severity == Severity::Warning) {
        parts.push("Weather advisory conditions present".to_string());
        parts_vi.push("Có điều kiện thời tiết cần lưu ý".to_string());
    }

    Summary {
        text: parts.join(". "),
        text_vi: parts_vi.join(". "),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherInsights {
    pub notable_conditions: Vec<NotableCondition>,
    pub seasonal_comparison: SeasonalComparison,
    pub summary: Summary,
}

#[must_use]
pub fn weather_insights(current: &Current, location: &ApiLocation) -> WeatherInsights {
    let notable_conditions = notable_conditions(current);
    let seasonal_comparison =
        seasonal_comparison(current.temp_c, location.lat, local_month(location));
    let summary = summarize(&seasonal_comparison, &notable_conditions);
    WeatherInsights {
        notable_conditions,
        seasonal_comparison,
        summary,
    }
}

/// Morning and evening windows as local "HH:MM"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayWindows {
    pub morning_start: String,
    pub morning_end: String,
    pub evening_start: String,
    pub evening_end: String,
}

impl DayWindows {
    fn new(morning: (NaiveTime, NaiveTime), evening: (NaiveTime, NaiveTime)) -> Self {
        let hhmm = |time: NaiveTime| time.format("%H:%M").to_string();
        Self {
            morning_start: hhmm(morning.0),
            morning_end: hhmm(morning.1),
            evening_start: hhmm(evening.0),
            evening_end: hhmm(evening.1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightWindows {
    pub golden_hour: DayWindows,
    pub blue_hour: DayWindows,
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Golden and blue hours around the given sunrise and sunset.
///
/// Golden hour runs from an hour before sunrise to half an hour after, and
/// from half an hour before sunset to an hour after. Blue hour is the half
/// hour just outside each golden hour. `None` when either time is not a
/// clock time (polar day and night report "No sunrise").
#[must_use]
pub fn light_windows(sunrise: &str, sunset: &str) -> Option<LightWindows> {
    let sunrise = parse_clock(sunrise)?;
    let sunset = parse_clock(sunset)?;
    let hour = TimeDelta::hours(1);
    let half_hour = TimeDelta::minutes(30);

    let golden_morning = (sunrise - hour, sunrise + half_hour);
    let golden_evening = (sunset - half_hour, sunset + hour);

    Some(LightWindows {
        blue_hour: DayWindows::new(
            (golden_morning.0 - half_hour, golden_morning.0),
            (golden_evening.1, golden_evening.1 + half_hour),
        ),
        golden_hour: DayWindows::new(golden_morning, golden_evening),
    })
}
