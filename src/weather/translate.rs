//! Vietnamese labels for provider vocabulary
//!
//! Every lookup falls back to the input text when no translation is known.

use serde::Serialize;

/// Vietnamese text for a WeatherAPI condition description
///
/// Matching ignores case and surrounding whitespace, since the provider is
/// not consistent about either ("Partly Cloudy ", "Partly cloudy").
pub fn condition_vi(text: &str) -> &str {
    let key = text.trim().to_lowercase();
    let translated = match key.as_str() {
        "sunny" => "Nắng",
        "clear" => "Quang đãng",
        "partly cloudy" => "Có mây",
        "cloudy" => "Nhiều mây",
        "overcast" => "U ám",
        "mist" | "fog" => "Sương mù",
        "freezing fog" => "Sương mù đóng băng",
        "patchy rain possible" => "Có thể có mưa rải rác",
        "patchy rain nearby" => "Có mưa rải rác gần đó",
        "patchy snow possible" => "Có thể có tuyết rải rác",
        "patchy sleet possible" => "Có thể có mưa tuyết rải rác",
        "patchy freezing drizzle possible" => "Có thể có mưa phùn đóng băng",
        "thundery outbreaks possible" | "thundery outbreaks in nearby" => "Có thể có giông bão",
        "blowing snow" => "Tuyết thổi",
        "blizzard" => "Bão tuyết",
        "patchy light drizzle" => "Mưa phùn nhẹ rải rác",
        "light drizzle" => "Mưa phùn nhẹ",
        "freezing drizzle" => "Mưa phùn đóng băng",
        "heavy freezing drizzle" => "Mưa phùn đóng băng nặng",
        "patchy light rain" => "Mưa nhẹ rải rác",
        "light rain" => "Mưa nhẹ",
        "moderate rain at times" => "Mưa vừa theo từng đợt",
        "moderate rain" => "Mưa vừa",
        "heavy rain at times" => "Mưa to theo từng đợt",
        "heavy rain" => "Mưa to",
        "light freezing rain" => "Mưa đóng băng nhẹ",
        "moderate or heavy freezing rain" => "Mưa đóng băng vừa hoặc nặng",
        "light sleet" => "Mưa tuyết nhẹ",
        "moderate or heavy sleet" => "Mưa tuyết vừa hoặc nặng",
        "patchy light snow" => "Tuyết nhẹ rải rác",
        "light snow" => "Tuyết nhẹ",
        "patchy moderate snow" => "Tuyết vừa rải rác",
        "moderate snow" => "Tuyết vừa",
        "patchy heavy snow" => "Tuyết nặng rải rác",
        "heavy snow" => "Tuyết nặng",
        "ice pellets" => "Mưa đá nhỏ",
        "light rain shower" => "Mưa rào nhẹ",
        "moderate or heavy rain shower" => "Mưa rào vừa hoặc to",
        "torrential rain shower" => "Mưa rào xối xả",
        "light sleet showers" => "Mưa tuyết rào nhẹ",
        "moderate or heavy sleet showers" => "Mưa tuyết rào vừa hoặc nặng",
        "light snow showers" => "Tuyết rào nhẹ",
        "moderate or heavy snow showers" => "Tuyết rào vừa hoặc nặng",
        "light showers of ice pellets" => "Mưa đá nhỏ rào nhẹ",
        "moderate or heavy showers of ice pellets" => "Mưa đá nhỏ rào vừa hoặc nặng",
        "patchy light rain with thunder" | "patchy light rain in area with thunder" => {
            "Mưa nhẹ có sấm sét rải rác"
        }
        "moderate or heavy rain with thunder" | "moderate or heavy rain in area with thunder" => {
            "Mưa vừa hoặc to có sấm sét"
        }
        "patchy light snow with thunder" => "Tuyết nhẹ có sấm sét rải rác",
        "moderate or heavy snow with thunder" => "Tuyết vừa hoặc nặng có sấm sét",
        _ => return text,
    };
    translated
}

/// Vietnamese name of a 16-point compass direction ("SE" -> "Đông Nam")
pub fn wind_direction_vi(direction: &str) -> &str {
    match direction.trim() {
        "N" => "Bắc",
        "NNE" => "Bắc-Đông Bắc",
        "NE" => "Đông Bắc",
        "ENE" => "Đông-Đông Bắc",
        "E" => "Đông",
        "ESE" => "Đông-Đông Nam",
        "SE" => "Đông Nam",
        "SSE" => "Nam-Đông Nam",
        "S" => "Nam",
        "SSW" => "Nam-Tây Nam",
        "SW" => "Tây Nam",
        "WSW" => "Tây-Tây Nam",
        "W" => "Tây",
        "WNW" => "Tây-Tây Bắc",
        "NW" => "Tây Bắc",
        "NNW" => "Bắc-Tây Bắc",
        _ => direction,
    }
}

/// 16-point compass abbreviation for a bearing in degrees
///
/// Used when the provider omits `wind_dir`.
pub fn cardinal_from_degrees(degrees: u16) -> &'static str {
    match degrees % 360 {
        0..=11 | 349..=359 => "N",
        12..=33 => "NNE",
        34..=56 => "NE",
        57..=78 => "ENE",
        79..=101 => "E",
        102..=123 => "ESE",
        124..=146 => "SE",
        147..=168 => "SSE",
        169..=191 => "S",
        192..=213 => "SSW",
        214..=236 => "SW",
        237..=258 => "WSW",
        259..=281 => "W",
        282..=303 => "WNW",
        304..=326 => "NW",
        _ => "NNW",
    }
}

/// Air quality band derived from the US EPA index (1..=6), ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Band for a US EPA index; `None` outside 1..=6
    #[must_use]
    pub fn from_epa_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Good),
            2 => Some(Self::Moderate),
            3 => Some(Self::UnhealthyForSensitiveGroups),
            4 => Some(Self::Unhealthy),
            5 => Some(Self::VeryUnhealthy),
            6 => Some(Self::Hazardous),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    #[must_use]
    pub fn label_vi(&self) -> &'static str {
        match self {
            Self::Good => "Tốt",
            Self::Moderate => "Trung bình",
            Self::UnhealthyForSensitiveGroups => "Không tốt cho nhóm nhạy cảm",
            Self::Unhealthy => "Không tốt cho sức khỏe",
            Self::VeryUnhealthy => "Rất không tốt cho sức khỏe",
            Self::Hazardous => "Nguy hại",
        }
    }

    /// Health advice in English
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory, and air pollution poses little or no risk.",
            Self::Moderate => {
                "Air quality is acceptable. However, there may be a risk for some people."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects."
            }
            Self::Unhealthy => "Some members of the general public may experience health effects.",
            Self::VeryUnhealthy => {
                "Health alert: The risk of health effects is increased for everyone."
            }
            Self::Hazardous => {
                "Health warning of emergency conditions: everyone is more likely to be affected."
            }
        }
    }

    /// Health advice in Vietnamese
    #[must_use]
    pub fn recommendation_vi(&self) -> &'static str {
        match self {
            Self::Good => "Chất lượng không khí tốt, an toàn cho mọi hoạt động ngoài trời.",
            Self::Moderate => {
                "Chất lượng không khí chấp nhận được. Một số người nhạy cảm nên hạn chế hoạt động ngoài trời kéo dài."
            }
            Self::UnhealthyForSensitiveGroups => {
                "Người có vấn đề về hô hấp, trẻ em và người cao tuổi nên hạn chế hoạt động ngoài trời."
            }
            Self::Unhealthy => {
                "Mọi người có thể gặp vấn đề về sức khỏe. Hạn chế hoạt động ngoài trời."
            }
            Self::VeryUnhealthy => "Cảnh báo sức khỏe nghiêm trọng. Tránh hoạt động ngoài trời.",
            Self::Hazardous => "Cảnh báo khẩn cấp. Ở trong nhà và đóng cửa sổ.",
        }
    }
}

/// Vietnamese alert severity ("Severe" -> "Nghiêm trọng")
pub fn alert_severity_vi(severity: &str) -> &str {
    match severity.trim() {
        "Extreme" => "Cực kỳ nghiêm trọng",
        "Severe" => "Nghiêm trọng",
        "Moderate" => "Trung bình",
        "Minor" => "Nhẹ",
        "Unknown" => "Không xác định",
        _ => severity,
    }
}

// Checked in order; the first keyword found in the event name wins.
const ALERT_EVENT_KEYWORDS: &[(&str, &str)] = &[
    ("flood", "Lũ lụt"),
    ("thunderstorm", "Giông bão"),
    ("storm", "Bão"),
    ("heavy rain", "Mưa lớn"),
    ("wind", "Gió mạnh"),
    ("snow", "Tuyết rơi"),
    ("ice", "Băng giá"),
    ("fog", "Sương mù"),
    ("heat", "Nắng nóng"),
    ("cold", "Rét đậm"),
    ("tornado", "Lốc xoáy"),
    ("hurricane", "Bão nhiệt đới"),
    ("typhoon", "Bão"),
];

/// Vietnamese alert type from keywords in a free-text event name
pub fn alert_event_vi(event: &str) -> &str {
    let lowered = event.to_lowercase();
    ALERT_EVENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(event, |(_, vi)| vi)
}

/// Vietnamese country name for the handful the frontend shows most
pub fn country_vi(country: &str) -> &str {
    match country.trim() {
        "Vietnam" | "Viet Nam" => "Việt Nam",
        "Laos" => "Lào",
        "Cambodia" => "Campuchia",
        "China" => "Trung Quốc",
        "Thailand" => "Thái Lan",
        _ => country,
    }
}

/// Vietnamese moon phase name
pub fn moon_phase_vi(phase: &str) -> &str {
    match phase.trim() {
        "New Moon" => "Trăng mới",
        "Waxing Crescent" => "Lưỡi liềm tăng",
        "First Quarter" => "Trăng bán nguyệt đầu",
        "Waxing Gibbous" => "Trăng phình tăng",
        "Full Moon" => "Trăng tròn",
        "Waning Gibbous" => "Trăng phình giảm",
        "Last Quarter" => "Trăng bán nguyệt cuối",
        "Waning Crescent" => "Lưỡi liềm giảm",
        _ => phase,
    }
}
