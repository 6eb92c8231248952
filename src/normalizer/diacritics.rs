//! Vietnamese diacritic folding
//!
//! Maps every precomposed Vietnamese letter (all tone marks on a, ă, â, e, ê,
//! i, o, ô, ơ, u, ư, y, plus đ) onto its base Latin letter. Input is NFC
//! composed first, so decomposed text ("a" + U+0300) folds the same way.

use unicode_normalization::UnicodeNormalization;

/// NFC-compose `text`: base letters and combining marks become precomposed letters.
#[must_use]
pub fn compose(text: &str) -> String {
    text.nfc().collect()
}

/// Base Latin letter for a lowercase Vietnamese letter, `None` for anything else.
#[must_use]
pub fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ' | 'ẩ'
        | 'ẫ' | 'ậ' => 'a',
        'đ' => 'd',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ' | 'ở'
        | 'ỡ' | 'ợ' => 'o',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// True if `c` (in either case) carries a Vietnamese diacritic.
#[must_use]
pub fn is_vietnamese_letter(c: char) -> bool {
    c.to_lowercase().any(|lower| base_letter(lower).is_some())
}

/// True if any character of `text` carries a Vietnamese diacritic.
#[must_use]
pub fn has_vietnamese_diacritics(text: &str) -> bool {
    text.nfc().any(is_vietnamese_letter)
}

/// Lowercase `text` and replace every Vietnamese letter with its base letter.
///
/// Total: characters outside the table pass through (lowercased), so the empty
/// string folds to itself.
#[must_use]
pub fn fold(text: &str) -> String {
    compose(text)
        .to_lowercase()
        .chars()
        .map(|c| base_letter(c).unwrap_or(c))
        .collect()
}
