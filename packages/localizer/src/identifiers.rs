//! String identifier classification.
//!
//! Keys of the translation table double as selectors into the document.
//! Four prefixed forms exist (`id:`, `class:`, `element:` and
//! `<attribute>::<selector>`); anything else is matched literally against
//! element text. Attribute identifiers are detected first so that a key
//! like `id::id:header` reads as "the `id` attribute of `#header`" rather
//! than as an element identifier.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LocalizeError;
use crate::TranslationTable;

/// Attribute identifiers start with the attribute name and a double colon.
static ATTRIBUTE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z-]+?::").unwrap());

/// The part after the double colon must itself be a prefixed selector.
static EMBEDDED_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(class|id|element):[^:]").unwrap());

/// Selector part of an attribute identifier. Deliberately closed: literal
/// text and nested attribute selectors cannot appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedSelector {
    Id(String),
    Class(String),
    Element(String),
}

/// A classified string identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// `id:<name>`, the element with that id attribute.
    Id(String),
    /// `class:<name>`, all elements carrying the class.
    Class(String),
    /// `element:<tag>`, all elements with the tag name.
    Element(String),
    /// `<attribute>::<selector>`, an attribute on the selected elements.
    Attribute {
        attribute: String,
        selector: EmbeddedSelector,
    },
    /// Anything else: literal element text.
    Text(String),
}

impl Identifier {
    /// Classify a raw translation-table key.
    ///
    /// Only attribute identifiers can fail, and only when the part after
    /// `::` is missing or not a valid embedded selector.
    pub fn classify(key: &str) -> Result<Identifier, LocalizeError> {
        if ATTRIBUTE_KEY.is_match(key) {
            if let Some((attribute, rest)) = key.split_once("::") {
                if rest.is_empty() {
                    return Err(LocalizeError::MissingEmbeddedSelector {
                        identifier: key.to_string(),
                    });
                }
                if !EMBEDDED_SELECTOR.is_match(rest) {
                    return Err(LocalizeError::MalformedAttributeIdentifier {
                        identifier: key.to_string(),
                    });
                }
                let selector = if let Some(name) = rest.strip_prefix("id:") {
                    EmbeddedSelector::Id(name.to_string())
                } else if let Some(name) = rest.strip_prefix("class:") {
                    EmbeddedSelector::Class(name.to_string())
                } else if let Some(name) = rest.strip_prefix("element:") {
                    EmbeddedSelector::Element(name.to_string())
                } else {
                    return Err(LocalizeError::MalformedAttributeIdentifier {
                        identifier: key.to_string(),
                    });
                };
                return Ok(Identifier::Attribute {
                    attribute: attribute.to_ascii_lowercase(),
                    selector,
                });
            }
        }

        if let Some(name) = key.strip_prefix("id:") {
            return Ok(Identifier::Id(name.to_string()));
        }
        if let Some(name) = key.strip_prefix("class:") {
            return Ok(Identifier::Class(name.to_string()));
        }
        if let Some(name) = key.strip_prefix("element:") {
            return Ok(Identifier::Element(name.to_string()));
        }
        Ok(Identifier::Text(key.to_string()))
    }
}

/// Translation-table keys grouped by identifier category, in table order.
/// Keys that fail classification land in `errors` and are dropped from the
/// groups.
#[derive(Debug, Default, PartialEq)]
pub struct Decomposition {
    pub ids: Vec<(String, String)>,
    pub classes: Vec<(String, String)>,
    pub elements: Vec<(String, String)>,
    pub attributes: Vec<(String, String, EmbeddedSelector)>,
    pub texts: Vec<String>,
    pub errors: Vec<LocalizeError>,
}

pub fn decompose(strings: &TranslationTable) -> Decomposition {
    let mut decomposition = Decomposition::default();
    for key in strings.keys() {
        match Identifier::classify(key) {
            Ok(Identifier::Id(name)) => decomposition.ids.push((key.clone(), name)),
            Ok(Identifier::Class(name)) => decomposition.classes.push((key.clone(), name)),
            Ok(Identifier::Element(name)) => decomposition.elements.push((key.clone(), name)),
            Ok(Identifier::Attribute {
                attribute,
                selector,
            }) => decomposition.attributes.push((key.clone(), attribute, selector)),
            Ok(Identifier::Text(_)) => decomposition.texts.push(key.clone()),
            Err(error) => {
                log::warn!(target: "localizer", "skipping identifier: {error}");
                decomposition.errors.push(error);
            }
        }
    }
    decomposition
}
