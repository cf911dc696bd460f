//! Translation application.
//!
//! Walks the reference mapping and writes translations (or the recorded
//! originals) into the document. A single unknown language code fails the
//! whole call before anything is touched; per-identifier problems are
//! collected in the report while the remaining identifiers still apply.

use crate::dom::Document;
use crate::error::LocalizeError;
use crate::languages::{LanguageRegistry, TextDirection};
use crate::reference_mapping::ReferenceMapping;
use crate::TranslationTable;

/// What a translation pass did. `translated_nodes` counts node writes, not
/// identifiers; an identifier mapped to three nodes contributes three.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub translated_nodes: usize,
    pub errors: Vec<LocalizeError>,
}

/// Apply `language` to every mapped identifier.
///
/// `None` and the default language both restore the recorded original
/// content. Every touched node also gets its inline text direction set
/// from the language definition, `ltr` when reverting.
pub fn apply_translation(
    document: &mut Document,
    mapping: &ReferenceMapping,
    strings: &TranslationTable,
    languages: &LanguageRegistry,
    default_language: &str,
    language: Option<&str>,
) -> Result<ApplyReport, LocalizeError> {
    let mut direction = TextDirection::Ltr;
    if let Some(code) = language {
        let definition = languages
            .get(code)
            .ok_or_else(|| LocalizeError::UnknownLanguage(code.to_string()))?;
        direction = definition.css_direction;
    }

    let mut report = ApplyReport::default();

    for (identifier, entry) in mapping {
        let translation = match language {
            None => entry.original_text.as_str(),
            Some(code) if code == default_language => entry.original_text.as_str(),
            Some(code) => match strings.get(identifier).and_then(|translations| translations.get(code)) {
                Some(text) => text.as_str(),
                None => {
                    let error = LocalizeError::MissingTranslation {
                        identifier: identifier.clone(),
                        language: code.to_string(),
                    };
                    log::warn!(target: "localizer", "{error}");
                    report.errors.push(error);
                    continue;
                }
            },
        };

        if entry.is_attribute {
            let attribute = identifier
                .split_once("::")
                .map_or(identifier.as_str(), |(name, _)| name);
            for &node in &entry.nodes {
                if !document.set_attribute(node, attribute, translation) {
                    report.errors.push(LocalizeError::StaleNode {
                        identifier: identifier.clone(),
                    });
                    continue;
                }
                document.set_inline_direction(node, direction.as_str());
                report.translated_nodes += 1;
            }
        } else {
            for &node in &entry.nodes {
                if !document.set_markup(node, translation) {
                    report.errors.push(LocalizeError::StaleNode {
                        identifier: identifier.clone(),
                    });
                    continue;
                }
                document.set_inline_direction(node, direction.as_str());
                report.translated_nodes += 1;
            }
        }
    }

    log::debug!(
        target: "localizer",
        "applied {:?}: {} nodes, {} errors",
        language,
        report.translated_nodes,
        report.errors.len()
    );
    Ok(report)
}
