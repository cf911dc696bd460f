#![deny(clippy::all)]

//! Page localization engine.
//!
//! The core idea is a reference mapping: every key of a translation table
//! doubles as a selector (`id:header`, `class:note`, `element:h1`,
//! `placeholder::id:name`, or literal text) and is resolved against an
//! in-memory HTML [`dom::Document`] exactly once. Language switches then
//! swap translations and originals in and out of the mapped nodes, in any
//! order, without reparsing the page.
//!
//! [`LocalizationTool`] ties it together: it owns the document, computes
//! the set of languages every string is translated into, applies
//! translations, and renders per-language widget labels.

pub mod dom;
mod error;
pub mod identifiers;
pub mod label_template;
pub mod language_subset;
pub mod languages;
pub mod localization_tool;
pub mod reference_mapping;
pub mod translator;

pub use error::{ErrorKind, LocalizeError};
pub use localization_tool::{
    InteractionMode, LocalizationOptions, LocalizationTool, Operation, OperationOutput,
};
pub use translator::ApplyReport;

use indexmap::IndexMap;

/// A language code such as `en_GB`, or a bare code such as `eo` for
/// languages without a country.
pub type LanguageCode = String;

/// The translation table: string identifier to language code to
/// translated text. Both levels keep their insertion order.
pub type TranslationTable = IndexMap<String, IndexMap<LanguageCode, String>>;
