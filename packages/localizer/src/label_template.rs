//! Language label interpolation.
//!
//! A label template such as `{{country}} {{(language)}}` is rendered into
//! widget markup per language. Decoration inside a slot (anything around
//! the `language`/`country` words, short of another brace) is kept only
//! when the slot renders, so `{{(language)}}` contributes the parentheses
//! with the name or nothing at all.

use bitflags::bitflags;
use lazy_static::lazy_static;
use regex::Regex;

/// Default template used when the configuration supplies none.
pub const DEFAULT_LABEL_TEMPLATE: &str = "{{country}} {{(language)}}";

bitflags! {
    /// Which parts of a language label are rendered.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayOptions: u8 {
        const FLAG = 0b001;
        const LANGUAGE = 0b010;
        const COUNTRY = 0b100;
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions::all()
    }
}

lazy_static! {
    static ref LANGUAGE_SLOT: Regex = Regex::new(r"\{\{([^{]*)language([^}]*)\}\}").unwrap();
    static ref COUNTRY_SLOT: Regex = Regex::new(r"\{\{([^{]*)country([^}]*)\}\}").unwrap();
}

/// Interpolate `template` for one language.
///
/// Language slots are substituted before country slots, so a template
/// containing the word `language` is never mistaken for a country slot.
/// Dollar signs in names are entity-escaped to keep them out of the
/// replacement syntax.
pub fn interpolate_label(
    template: &str,
    country: Option<&str>,
    language: &str,
    display: DisplayOptions,
) -> String {
    let language_replacement = if display.contains(DisplayOptions::LANGUAGE) {
        let has_country_class = if country.is_some() {
            "ltool-has-country "
        } else {
            ""
        };
        format!(
            "<span class=\"{has_country_class}ltool-language-name\">${{1}}{}${{2}}</span>",
            escape_dollars(language)
        )
    } else {
        String::new()
    };

    let country_replacement = match country {
        Some(name) if display.contains(DisplayOptions::COUNTRY) => format!(
            "<span class=\"ltool-language-country\">${{1}}{}${{2}}</span>",
            escape_dollars(name)
        ),
        _ => String::new(),
    };

    let interpolated = LANGUAGE_SLOT.replace_all(template, language_replacement.as_str());
    let interpolated = COUNTRY_SLOT.replace_all(&interpolated, country_replacement.as_str());

    format!("<span class=\"ltool-language-countryname\">{interpolated}</span>")
}

fn escape_dollars(name: &str) -> String {
    name.replace('$', "&#36;")
}
