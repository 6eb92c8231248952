//! Vietnamese city name normalization
//!
//! Turns free-text, possibly diacritic-laden location names into search
//! candidates the weather provider understands:
//! - Diacritic folding ("Đà Nẵng" → "da nang")
//! - Curated alias table ("tp.hcm" → "ho chi minh city")
//! - Administrative prefix stripping ("Tỉnh Lâm Đồng" → "lâm đồng")
//! - Local autocomplete suggestions over the alias table

pub mod aliases;
pub mod candidates;
pub mod diacritics;

pub use candidates::{generate as generate_candidates, is_vietnamese_query};
pub use diacritics::fold;

use serde::Serialize;

/// Maximum number of local suggestions returned.
pub const MAX_SUGGESTIONS: usize = 10;

/// A known place matching a partial query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Vietnamese display name, title-cased ("Hà Nội")
    pub name_vi: String,
    /// Canonical search term ("hanoi")
    pub search_term: &'static str,
}

/// Suggest known places for a partial query, in alias-table order.
///
/// Matches the Vietnamese name, the Vietnamese name with diacritics folded, or
/// the canonical term. Queries shorter than two characters yield nothing.
#[must_use]
pub fn suggest(query: &str) -> Vec<Suggestion> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Vec::new();
    }

    let lower = diacritics::compose(query).to_lowercase();
    let folded = fold(&lower);

    aliases::ALIAS_ENTRIES
        .iter()
        .filter(|(name, term)| {
            name.contains(lower.as_str())
                || fold(name).contains(folded.as_str())
                || term.contains(lower.as_str())
        })
        .take(MAX_SUGGESTIONS)
        .map(|(name, term)| Suggestion {
            name_vi: title_case(name),
            search_term: term,
        })
        .collect()
}

/// Vietnamese display name for a provider place name, if the place is known.
///
/// "Hanoi" and "Ha Noi" both give "Hà Nội".
#[must_use]
pub fn vietnamese_name(name: &str) -> Option<String> {
    let lower = diacritics::compose(name.trim()).to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let folded = fold(&lower);

    aliases::ALIAS_ENTRIES
        .iter()
        .find(|(key, term)| *term == lower || fold(key) == folded)
        .map(|(key, _)| title_case(key))
}

/// Uppercase every letter that follows a non-letter ("tp.hcm" → "Tp.Hcm").
fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            titled.extend(c.to_uppercase());
        } else {
            titled.push(c);
        }
        word_start = !c.is_alphabetic();
    }
    titled
}
