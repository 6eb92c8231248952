//! Curated Vietnamese place names and administrative prefixes
//!
//! Keys are lowercase Vietnamese spellings, values are the ASCII terms the
//! weather provider's search endpoint resolves reliably.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Known place names in table order. Keys are unique.
pub const ALIAS_ENTRIES: &[(&str, &str)] = &[
    // Major cities
    ("hà nội", "hanoi"),
    ("thành phố hồ chí minh", "ho chi minh city"),
    ("tp hồ chí minh", "ho chi minh city"),
    ("hồ chí minh", "ho chi minh city"),
    ("tp.hcm", "ho chi minh city"),
    ("hcm", "ho chi minh city"),
    ("sài gòn", "saigon"),
    ("đà nẵng", "da nang"),
    ("hải phòng", "hai phong"),
    ("cần thơ", "can tho"),
    ("biên hòa", "bien hoa"),
    ("nha trang", "nha trang"),
    ("huế", "hue"),
    ("buôn ma thuột", "buon ma thuot"),
    ("pleiku", "pleiku"),
    ("quy nhơn", "quy nhon"),
    ("thủ đức", "thu duc"),
    ("long xuyên", "long xuyen"),
    ("mỹ tho", "my tho"),
    ("cà mau", "ca mau"),
    ("bạc liêu", "bac lieu"),
    ("vũng tàu", "vung tau"),
    ("phan thiết", "phan thiet"),
    ("đà lạt", "da lat"),
    ("vĩnh long", "vinh long"),
    ("rạch giá", "rach gia"),
    ("hạ long", "ha long"),
    ("việt trì", "viet tri"),
    ("nam định", "nam dinh"),
    ("thái nguyên", "thai nguyen"),
    ("thái bình", "thai binh"),
    ("ninh bình", "ninh binh"),
    ("thanh hóa", "thanh hoa"),
    ("vinh", "vinh"),
    ("đồng hới", "dong hoi"),
    ("tam kỳ", "tam ky"),
    ("quảng ngãi", "quang ngai"),
    ("tuy hòa", "tuy hoa"),
    ("phan rang", "phan rang"),
    ("bảo lộc", "bao loc"),
    ("trà vinh", "tra vinh"),
    ("sóc trăng", "soc trang"),
    ("châu đốc", "chau doc"),
    ("hà tĩnh", "ha tinh"),
    ("hòa bình", "hoa binh"),
    ("sơn la", "son la"),
    ("lào cai", "lao cai"),
    ("điện biên phủ", "dien bien phu"),
    ("lai châu", "lai chau"),
    ("yên bái", "yen bai"),
    ("tuyên quang", "tuyen quang"),
    ("hà giang", "ha giang"),
    ("cao bằng", "cao bang"),
    ("bắc kạn", "bac kan"),
    ("lạng sơn", "lang son"),
    ("móng cái", "mong cai"),
    ("bắc ninh", "bac ninh"),
    ("bắc giang", "bac giang"),
    ("phú thọ", "phu tho"),
    ("vĩnh phúc", "vinh phuc"),
    ("hưng yên", "hung yen"),
    ("hải dương", "hai duong"),
    ("hà nam", "ha nam"),
    ("phủ lý", "phu ly"),
    ("nghệ an", "nghe an"),
    ("quảng bình", "quang binh"),
    ("quảng trị", "quang tri"),
    ("kon tum", "kon tum"),
    ("gia lai", "gia lai"),
    ("đắk lắk", "dak lak"),
    ("đắk nông", "dak nong"),
    ("lâm đồng", "lam dong"),
    ("bình phước", "binh phuoc"),
    ("tây ninh", "tay ninh"),
    ("bình dương", "binh duong"),
    ("đồng nai", "dong nai"),
    ("bà rịa", "ba ria"),
    ("long an", "long an"),
    ("tiền giang", "tien giang"),
    ("bến tre", "ben tre"),
    ("đồng tháp", "dong thap"),
    ("an giang", "an giang"),
    ("kiên giang", "kien giang"),
    ("hậu giang", "hau giang"),
    ("vĩnh châu", "vinh chau"),
];

/// Administrative prefixes stripped before a second alias lookup.
pub const ADMIN_PREFIXES: &[&str] = &[
    "thành phố",
    "tp.",
    "tp ",
    "tỉnh",
    "huyện",
    "quận",
    "thị xã",
    "thị trấn",
];

static ALIASES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIAS_ENTRIES.iter().copied().collect());

/// Exact-match lookup of a lowercase place name.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static str> {
    ALIASES.get(key).copied()
}

/// True if `key` is a known alias key.
#[must_use]
pub fn is_alias(key: &str) -> bool {
    ALIASES.contains_key(key)
}

/// Longest administrative prefix `lower` starts with.
#[must_use]
pub fn admin_prefix(lower: &str) -> Option<&'static str> {
    ADMIN_PREFIXES
        .iter()
        .copied()
        .filter(|prefix| lower.starts_with(prefix))
        .max_by_key(|prefix| prefix.len())
}

/// Remove the longest leading administrative prefix and trim the remainder.
///
/// A prefix that would leave nothing behind (e.g. the bare word "quận") is not
/// stripped, so the result is never empty for non-empty input.
#[must_use]
pub fn strip_admin_prefix(lower: &str) -> &str {
    match admin_prefix(lower) {
        Some(prefix) => {
            let rest = lower[prefix.len()..].trim();
            if rest.is_empty() { lower } else { rest }
        }
        None => lower,
    }
}
