//! Active language set computation.
//!
//! A language is offered for selection only when every entry of the
//! translation table defines it, so switching to it can never leave the
//! page half translated. The default language is exempt (originals count
//! as its translations) and always leads the set; the guaranteed languages
//! follow, sorted by country name.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::languages::LanguageRegistry;
use crate::{LanguageCode, TranslationTable};

/// Compute the active language set for `strings`.
///
/// The result always starts with `default_language`, followed by every
/// language defined in all table entries, sorted by country name (languages
/// without a country sort by their language name instead).
pub fn active_languages(
    strings: &TranslationTable,
    default_language: &str,
    languages: &LanguageRegistry,
) -> Vec<LanguageCode> {
    let total_strings = strings.len();

    let mut histogram: IndexMap<&str, usize> = IndexMap::new();
    for translations in strings.values() {
        for code in translations.keys() {
            *histogram.entry(code.as_str()).or_insert(0) += 1;
        }
    }

    let mut guaranteed: Vec<LanguageCode> = histogram
        .into_iter()
        .filter(|(code, count)| *count == total_strings && *code != default_language)
        .map(|(code, _)| code.to_string())
        .collect();

    sort_by_country_name(languages, &mut guaranteed);
    guaranteed.insert(0, default_language.to_string());

    log::debug!(target: "localizer", "active languages: {guaranteed:?}");
    guaranteed
}

/// Sort language codes by the country name of their definition, falling
/// back to the language name for countryless entries. Codes without any
/// definition compare by the code itself.
fn sort_by_country_name(languages: &LanguageRegistry, codes: &mut [LanguageCode]) {
    codes.sort_by(|a, b| {
        let (a_country, a_language) = sort_names(languages, a);
        let (b_country, b_language) = sort_names(languages, b);
        match (a_country, b_country) {
            (Some(a_name), Some(b_name)) => collate(a_name, b_name),
            (Some(a_name), None) => collate(a_name, b_language),
            (None, Some(b_name)) => collate(a_language, b_name),
            (None, None) => collate(a_language, b_language),
        }
    });
}

fn sort_names<'a>(languages: &'a LanguageRegistry, code: &'a str) -> (Option<&'a str>, &'a str) {
    match languages.get(code) {
        Some(definition) => (definition.country.as_deref(), definition.language.as_str()),
        None => (None, code),
    }
}

/// Case-insensitive code point comparison with a case-sensitive tiebreak,
/// so ordering stays total and deterministic.
fn collate(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded != Ordering::Equal {
        folded
    } else {
        a.cmp(b)
    }
}
