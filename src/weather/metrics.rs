//! Derived comfort metrics computed from current conditions

use serde::Serialize;

/// Comfort score on a 0-10 scale with its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComfortIndex {
    pub level: &'static str,
    pub level_vi: &'static str,
    /// Rounded to one decimal
    pub score: f64,
}

/// UV exposure band and protection advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UvAdvice {
    pub category: &'static str,
    pub category_vi: &'static str,
    pub recommendation: &'static str,
    pub recommendation_vi: &'static str,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Outdoor comfort from temperature, humidity and wind.
///
/// Starts from 10 and subtracts penalties outside 18-27 °C, outside
/// 30-70 % humidity and above 20 km/h wind. A light breeze (5-15 km/h)
/// earns half a point back.
#[must_use]
pub fn comfort_index(temp_c: f64, humidity: u8, wind_kph: f64) -> ComfortIndex {
    let humidity = f64::from(humidity);
    let mut score = 10.0;

    if temp_c < 15.0 {
        score -= ((15.0 - temp_c) * 0.3).min(4.0);
    } else if temp_c > 30.0 {
        score -= ((temp_c - 30.0) * 0.2).min(4.0);
    } else if !(18.0..=27.0).contains(&temp_c) {
        score -= 1.0;
    }

    if humidity < 30.0 {
        score -= 2.0;
    } else if humidity > 80.0 {
        score -= ((humidity - 80.0) * 0.1).min(3.0);
    } else if humidity > 70.0 {
        score -= 1.0;
    }

    if wind_kph > 30.0 {
        score -= ((wind_kph - 30.0) * 0.1).min(3.0);
    } else if wind_kph > 20.0 {
        score -= 1.0;
    } else if (5.0..=15.0).contains(&wind_kph) {
        score += 0.5;
    }

    let score: f64 = score.clamp(0.0, 10.0);
    let (level, level_vi) = match score {
        s if s >= 8.0 => ("Very Comfortable", "Rất thoải mái"),
        s if s >= 6.0 => ("Comfortable", "Thoải mái"),
        s if s >= 4.0 => ("Moderate", "Bình thường"),
        s if s >= 2.0 => ("Uncomfortable", "Khó chịu"),
        _ => ("Very Uncomfortable", "Rất khó chịu"),
    };

    ComfortIndex {
        level,
        level_vi,
        score: round1(score),
    }
}

/// Apparent temperature in hot weather (Rothfusz regression), in °C.
///
/// Returns `temp_c` unchanged below 80 °F.
#[must_use]
pub fn heat_index(temp_c: f64, humidity: u8) -> f64 {
    let t = celsius_to_fahrenheit(temp_c);
    if t < 80.0 {
        return temp_c;
    }
    let h = f64::from(humidity);

    let hi = -42.379 + 2.049_015_23 * t + 10.143_331_27 * h
        - 0.224_755_41 * t * h
        - 6.837_83e-3 * t * t
        - 5.481_717e-2 * h * h
        + 1.228_74e-3 * t * t * h
        + 8.5282e-4 * t * h * h
        - 1.99e-6 * t * t * h * h;

    round1(fahrenheit_to_celsius(hi))
}

/// Apparent temperature in cold wind (NWS formula), in °C.
///
/// Returns `temp_c` unchanged above 10 °C or below 4.8 km/h.
#[must_use]
pub fn wind_chill(temp_c: f64, wind_kph: f64) -> f64 {
    if temp_c > 10.0 || wind_kph < 4.8 {
        return temp_c;
    }
    let v = (wind_kph * 0.621_371).powf(0.16);
    let t = celsius_to_fahrenheit(temp_c);
    let wc = 35.74 + 0.6215 * t - 35.75 * v + 0.4275 * t * v;
    round1(fahrenheit_to_celsius(wc))
}

#[must_use]
pub fn uv_advice(uv: f64) -> UvAdvice {
    let (category, category_vi, recommendation, recommendation_vi) = if uv <= 2.0 {
        ("Low", "Thấp", "No protection needed", "Không cần bảo vệ")
    } else if uv <= 5.0 {
        (
            "Moderate",
            "Trung bình",
            "Wear sunglasses, use sunscreen",
            "Đeo kính râm, dùng kem chống nắng",
        )
    } else if uv <= 7.0 {
        (
            "High",
            "Cao",
            "Use SPF 30+ sunscreen, wear hat",
            "Dùng kem chống nắng SPF 30+, đội mũ",
        )
    } else if uv <= 10.0 {
        (
            "Very High",
            "Rất cao",
            "Use SPF 50+ sunscreen, avoid midday sun",
            "Dùng kem chống nắng SPF 50+, tránh nắng trưa",
        )
    } else {
        (
            "Extreme",
            "Cực cao",
            "Stay indoors, full sun protection required",
            "Ở trong nhà, cần bảo vệ toàn diện",
        )
    };

    UvAdvice {
        category,
        category_vi,
        recommendation,
        recommendation_vi,
    }
}
