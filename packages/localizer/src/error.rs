//! Error taxonomy for the localization engine.
//!
//! Failures fall into four groups: configuration problems detected when a
//! tool is created, resolution problems found while mapping string
//! identifiers onto the document, lookup problems at translation time, and
//! method errors from the string-dispatch surface. Resolution and apply-time
//! problems are accumulated and reported per identifier rather than aborting
//! the whole run; only configuration problems are fatal.

use thiserror::Error;

/// Coarse classification of a [`LocalizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resolution,
    Lookup,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    #[error("the default language '{0}' is not defined in the language registry")]
    UnknownDefaultLanguage(String),

    #[error("'{identifier}' needs a class:, id: or element: selector after the attribute name")]
    MissingEmbeddedSelector { identifier: String },

    #[error("'{identifier}' does not look like an attribute identifier (strayed colons?)")]
    MalformedAttributeIdentifier { identifier: String },

    #[error("'{identifier}' must match nodes with exactly one child node, found {found}")]
    NotExactlyOneChild { identifier: String, found: usize },

    #[error("a node matched by '{identifier}' does not contain a text node")]
    NotATextNode { identifier: String },

    #[error("elements matched by '{identifier}' do not share the text '{expected}'")]
    MismatchedText { identifier: String, expected: String },

    #[error("the identifier '{identifier}' does not match any element in the document")]
    UnmatchedSelector { identifier: String },

    #[error("elements matched by '{identifier}' carry different values for the attribute")]
    MismatchedAttributeValues { identifier: String },

    #[error("The language code {0} is not known")]
    UnknownLanguage(String),

    #[error("The string '{0}' was not translated in any language.")]
    StringNotRegistered(String),

    #[error(
        "A translation for the string '{text}' was not defined for language {language}. Defined languages are: {}",
        .defined.join(", ")
    )]
    TranslationNotDefined {
        text: String,
        language: String,
        defined: Vec<String>,
    },

    #[error("no {language} translation exists for '{identifier}'")]
    MissingTranslation { identifier: String, language: String },

    #[error("a node mapped by '{identifier}' is no longer part of the document")]
    StaleNode { identifier: String },

    #[error("the language {0} is not part of the active language set")]
    NotAnActiveLanguage(String),

    #[error("cannot call method {0}")]
    UnknownOperation(String),

    #[error("method {name} expects {expected} argument(s)")]
    WrongOperationArity { name: String, expected: usize },
}

impl LocalizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LocalizeError::UnknownDefaultLanguage(_) => ErrorKind::Configuration,
            LocalizeError::MissingEmbeddedSelector { .. }
            | LocalizeError::MalformedAttributeIdentifier { .. }
            | LocalizeError::NotExactlyOneChild { .. }
            | LocalizeError::NotATextNode { .. }
            | LocalizeError::MismatchedText { .. }
            | LocalizeError::UnmatchedSelector { .. }
            | LocalizeError::MismatchedAttributeValues { .. } => ErrorKind::Resolution,
            LocalizeError::UnknownLanguage(_)
            | LocalizeError::StringNotRegistered(_)
            | LocalizeError::TranslationNotDefined { .. }
            | LocalizeError::MissingTranslation { .. }
            | LocalizeError::StaleNode { .. }
            | LocalizeError::NotAnActiveLanguage(_) => ErrorKind::Lookup,
            LocalizeError::UnknownOperation(_) | LocalizeError::WrongOperationArity { .. } => {
                ErrorKind::Method
            }
        }
    }
}
