//! Language registry.
//!
//! Each language code (`<language>_<COUNTRY>`, or a bare code such as `eo`
//! for languages without a country) maps to a [`LanguageDefinition`]. A
//! builtin registry ships with the crate; user-supplied definitions are
//! merged over it and may both add languages and override builtin ones.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::LanguageCode;

/// Registry of language definitions keyed by language code.
pub type LanguageRegistry = IndexMap<LanguageCode, LanguageDefinition>;

/// Writing direction applied to translated nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Flag artwork for a language, either a sprite class or an image URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One entry of the language registry.
///
/// `country` is optional for languages without a national home. The
/// `*_translated` fields carry the names in the language itself and are
/// presentation data; selection logic never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_translated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_translated: Option<String>,
    pub css_direction: TextDirection,
    pub flag: FlagSpec,
}

static BUILTIN_LANGUAGES: Lazy<LanguageRegistry> =
    Lazy::new(|| serde_json::from_str(include_str!("languages.json")).unwrap());

/// The registry shipped with the crate.
pub fn builtin_languages() -> &'static LanguageRegistry {
    &BUILTIN_LANGUAGES
}

/// Builtin registry extended with `overrides`, which win on conflict.
pub fn merged_registry(overrides: LanguageRegistry) -> LanguageRegistry {
    let mut merged = builtin_languages().clone();
    for (code, definition) in overrides {
        merged.insert(code, definition);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_load_the_builtin_registry() {
        let registry = builtin_languages();
        assert_eq!(registry.len(), 32);

        let english = &registry["en_GB"];
        assert_eq!(english.country.as_deref(), Some("United Kingdom"));
        assert_eq!(english.language, "English");
        assert_eq!(english.css_direction, TextDirection::Ltr);
        assert_eq!(english.flag.class.as_deref(), Some("flag flag-gb"));

        assert_eq!(registry["ar_TN"].css_direction, TextDirection::Rtl);
        assert_eq!(registry["he_IL"].css_direction, TextDirection::Rtl);
        assert_eq!(registry["eo"].country, None);
    }

    #[test]
    fn should_let_overrides_win_on_merge() {
        let mut overrides = LanguageRegistry::new();
        overrides.insert(
            "en_GB".to_string(),
            LanguageDefinition {
                country: Some("Great Britain".to_string()),
                language: "English".to_string(),
                ..Default::default()
            },
        );
        overrides.insert(
            "xx_XX".to_string(),
            LanguageDefinition {
                language: "Test".to_string(),
                ..Default::default()
            },
        );

        let merged = merged_registry(overrides);
        assert_eq!(merged["en_GB"].country.as_deref(), Some("Great Britain"));
        assert!(merged.contains_key("xx_XX"));
        assert_eq!(merged.len(), 33);
    }
}
