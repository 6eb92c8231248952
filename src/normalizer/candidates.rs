//! Search candidate generation for location queries

use crate::ThoiTietError;
use crate::normalizer::{aliases, diacritics};

/// Ordered search candidates for `query`, most reliable first.
///
/// 1. alias of the whole lowercased query
/// 2. alias of the query with its administrative prefix stripped
/// 3. the prefix-stripped query with diacritics folded
/// 4. the query itself, original case
///
/// The query is NFC composed first, so decomposed input yields the same list.
///
/// Each step only appends a value not already present, so the list holds
/// one to four distinct entries and always ends with the trimmed query.
///
/// # Errors
/// Returns [`ThoiTietError::EmptyQuery`] for empty or whitespace-only input.
pub fn generate(query: &str) -> Result<Vec<String>, ThoiTietError> {
    let original = diacritics::compose(query.trim());
    if original.is_empty() {
        return Err(ThoiTietError::EmptyQuery);
    }

    let lower = original.to_lowercase();
    let mut candidates: Vec<String> = Vec::with_capacity(4);

    if let Some(canonical) = aliases::lookup(&lower) {
        push_unique(&mut candidates, canonical);
    }

    let stripped = aliases::strip_admin_prefix(&lower);
    if let Some(canonical) = aliases::lookup(stripped) {
        push_unique(&mut candidates, canonical);
    }

    push_unique(&mut candidates, &diacritics::fold(stripped));
    push_unique(&mut candidates, &original);

    Ok(candidates)
}

/// Whether `query` looks like a Vietnamese place name.
///
/// True if it carries a Vietnamese diacritic, starts with an administrative
/// prefix, or is a known alias key (case-insensitive). Plain ASCII/English
/// queries are searched as-is with a single candidate.
#[must_use]
pub fn is_vietnamese_query(query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return false;
    }

    let lower = diacritics::compose(query).to_lowercase();
    diacritics::has_vietnamese_diacritics(&lower)
        || aliases::admin_prefix(&lower).is_some()
        || aliases::is_alias(&lower)
}

fn push_unique(candidates: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !candidates.iter().any(|c| c == value) {
        candidates.push(value.to_string());
    }
}
