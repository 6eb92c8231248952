//! Air-quality report: AQI band details, per-pollutant levels and health advice

use serde::Serialize;

use super::translate::AqiCategory;
use crate::models::AirQuality;

const MICROGRAMS_PER_CUBIC_METRE: &str = "μg/m³";

/// Presentation and advice attached to one AQI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiBand {
    pub category: &'static str,
    pub category_vi: &'static str,
    /// Official EPA colour for the band
    pub color: &'static str,
    pub description: &'static str,
    pub description_vi: &'static str,
    pub health_advice: &'static str,
    pub health_advice_vi: &'static str,
    pub mask_recommended: bool,
    pub activities: &'static [&'static str],
}

#[must_use]
pub fn aqi_band(category: AqiCategory) -> AqiBand {
    let (color, description, description_vi, health_advice, health_advice_vi, activities): (
        _,
        _,
        _,
        _,
        _,
        &'static [&'static str],
    ) = match category {
        AqiCategory::Good => (
            "#00e400",
            "Air quality is satisfactory",
            "Chất lượng không khí tốt",
            "No health implications",
            "Không có tác động xấu đến sức khỏe",
            &["all_outdoor_activities"],
        ),
        AqiCategory::Moderate => (
            "#ffff00",
            "Air quality is acceptable for most people",
            "Chất lượng không khí chấp nhận được cho hầu hết mọi người",
            "Unusually sensitive people should consider reducing outdoor activities",
            "Người nhạy cảm nên hạn chế hoạt động ngoài trời",
            &["light_outdoor_exercise", "normal_commuting"],
        ),
        AqiCategory::UnhealthyForSensitiveGroups => (
            "#ff7e00",
            "Members of sensitive groups may experience health effects",
            "Nhóm người nhạy cảm có thể gặp vấn đề sức khỏe",
            "Sensitive groups should reduce outdoor activities",
            "Nhóm nhạy cảm nên hạn chế hoạt động ngoài trời",
            &["indoor_activities", "light_indoor_exercise"],
        ),
        AqiCategory::Unhealthy => (
            "#ff0000",
            "Everyone may begin to experience health effects",
            "Mọi người có thể bị ảnh hưởng sức khỏe",
            "Everyone should reduce outdoor activities",
            "Mọi người nên hạn chế hoạt động ngoài trời",
            &["indoor_activities_only"],
        ),
        AqiCategory::VeryUnhealthy => (
            "#8f3f97",
            "Health warnings of emergency conditions",
            "Cảnh báo sức khỏe khẩn cấp",
            "Everyone should avoid outdoor activities",
            "Mọi người nên tránh hoạt động ngoài trời",
            &["stay_indoors"],
        ),
        AqiCategory::Hazardous => (
            "#7e0023",
            "Emergency conditions affecting entire population",
            "Tình trạng khẩn cấp ảnh hưởng toàn dân",
            "Everyone must avoid outdoor activities",
            "Mọi người phải tránh hoạt động ngoài trời",
            &["stay_indoors_sealed"],
        ),
    };

    AqiBand {
        category: category.label(),
        category_vi: category.label_vi(),
        color,
        description,
        description_vi,
        health_advice,
        health_advice_vi,
        mask_recommended: category >= AqiCategory::UnhealthyForSensitiveGroups,
        activities,
    }
}

/// One pollutant reading and the band it falls in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantLevel {
    pub value: f64,
    #[serde(skip)]
    pub category: AqiCategory,
    pub level: &'static str,
    pub level_vi: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
    pub description_vi: &'static str,
}

impl PollutantLevel {
    fn new(
        value: f64,
        category: AqiCategory,
        description: &'static str,
        description_vi: &'static str,
    ) -> Self {
        Self {
            value,
            category,
            level: category.label(),
            level_vi: category.label_vi(),
            unit: MICROGRAMS_PER_CUBIC_METRE,
            description,
            description_vi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pollutants {
    pub pm2_5: PollutantLevel,
    pub pm10: PollutantLevel,
    pub ozone: PollutantLevel,
}

/// Band for a concentration given the upper bound of each band, best first.
/// Values above the last bound fall in the band after it.
fn band_for(value: f64, upper_bounds: &[f64]) -> AqiCategory {
    const ORDER: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Hazardous,
    ];
    let index = upper_bounds
        .iter()
        .position(|bound| value <= *bound)
        .unwrap_or(upper_bounds.len());
    ORDER[index.min(ORDER.len() - 1)]
}

#[must_use]
pub fn analyze_pollutants(air: &AirQuality) -> Pollutants {
    Pollutants {
        pm2_5: PollutantLevel::new(
            air.pm2_5,
            band_for(air.pm2_5, &[12.0, 35.0, 55.0, 150.0, 250.0]),
            "Fine particulate matter",
            "Hạt bụi mịn",
        ),
        pm10: PollutantLevel::new(
            air.pm10,
            band_for(air.pm10, &[54.0, 154.0, 254.0, 354.0, 424.0]),
            "Coarse particulate matter",
            "Hạt bụi thô",
        ),
        // Ozone tops out at "Very Unhealthy"
        ozone: PollutantLevel::new(
            air.o3,
            band_for(air.o3, &[54.0, 70.0, 85.0, 105.0]),
            "Ground-level ozone",
            "Ozone tầng thấp",
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthRecommendation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: &'static str,
    pub message_vi: &'static str,
    pub priority: Priority,
}

const fn advice(
    kind: &'static str,
    message: &'static str,
    message_vi: &'static str,
    priority: Priority,
) -> HealthRecommendation {
    HealthRecommendation {
        kind,
        message,
        message_vi,
        priority,
    }
}

/// Advice for the overall band plus pollutant-specific warnings.
///
/// Never empty: clean air yields a single low-priority "enjoy outdoors" entry.
#[must_use]
pub fn health_recommendations(
    category: Option<AqiCategory>,
    pollutants: &Pollutants,
) -> Vec<HealthRecommendation> {
    let mut recommendations = Vec::new();

    if let Some(category) = category {
        if category >= AqiCategory::UnhealthyForSensitiveGroups {
            recommendations.push(advice(
                "general",
                "Consider wearing a mask when going outside",
                "Nên đeo khẩu trang khi ra ngoài",
                Priority::High,
            ));
        }
        if category >= AqiCategory::Unhealthy {
            recommendations.push(advice(
                "exercise",
                "Avoid outdoor exercise, exercise indoors instead",
                "Tránh tập thể dục ngoài trời, tập trong nhà",
                Priority::High,
            ));
        }
        if category >= AqiCategory::VeryUnhealthy {
            recommendations.push(advice(
                "windows",
                "Keep windows closed and use air purifier if available",
                "Đóng cửa sổ và dùng máy lọc không khí nếu có",
                Priority::VeryHigh,
            ));
        }
    }

    if pollutants.pm2_5.category >= AqiCategory::Unhealthy {
        recommendations.push(advice(
            "pm2_5",
            "High PM2.5 levels - use N95 mask outdoors",
            "Nồng độ PM2.5 cao - dùng khẩu trang N95 khi ra ngoài",
            Priority::VeryHigh,
        ));
    }

    if matches!(
        pollutants.ozone.category,
        AqiCategory::UnhealthyForSensitiveGroups | AqiCategory::Unhealthy
    ) {
        recommendations.push(advice(
            "ozone",
            "High ozone levels - avoid outdoor activities during peak sun hours",
            "Nồng độ ozone cao - tránh hoạt động ngoài trời vào giờ nắng gay gắt",
            Priority::Medium,
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(advice(
            "general",
            "Air quality is good - enjoy outdoor activities",
            "Chất lượng không khí tốt - thoải mái hoạt động ngoài trời",
            Priority::Low,
        ));
    }

    recommendations
}

/// Full air-quality analysis for one reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    pub us_epa_index: Option<u8>,
    /// `None` when the provider sent no usable index
    pub band: Option<AqiBand>,
    pub pollutants: Pollutants,
    pub health_recommendations: Vec<HealthRecommendation>,
}

impl From<&AirQuality> for AirQualityReport {
    fn from(air: &AirQuality) -> Self {
        let category = air.us_epa_index.and_then(AqiCategory::from_epa_index);
        let pollutants = analyze_pollutants(air);
        Self {
            us_epa_index: air.us_epa_index,
            band: category.map(aqi_band),
            health_recommendations: health_recommendations(category, &pollutants),
            pollutants,
        }
    }
}
