#![deny(clippy::all)]

//! Command line companion to `page-localizer`.
//!
//! Localizes HTML files on disk through a strings JSON file (the same
//! configuration shape the library's [`page_localizer::LocalizationOptions`]
//! deserializes from) and lists the languages a strings file can fully
//! translate a page into.

pub mod batch;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
