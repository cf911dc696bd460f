//! Reference mapping construction.
//!
//! Resolves every key of the translation table against the document once,
//! up front, so that language switches are pure table lookups plus node
//! writes. Resolution runs in five passes over the decomposed identifiers
//! (ids, classes, elements, attributes, literal text); later passes skip
//! nodes already claimed through an earlier category so no node is mapped
//! twice. Problems never abort the run: the offending identifier is
//! dropped and the error recorded in the result.

use smallvec::SmallVec;

use crate::dom::{Document, NodeId};
use crate::error::LocalizeError;
use crate::identifiers::{decompose, EmbeddedSelector};
use crate::TranslationTable;

/// Where a string identifier lives in the document: the nodes it resolved
/// to and the original content to restore when switching back to the
/// default language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// Attribute identifiers replace an attribute value; everything else
    /// replaces element content.
    pub is_attribute: bool,
    pub original_text: String,
    pub nodes: SmallVec<[NodeId; 4]>,
}

/// Identifier to [`ReferenceEntry`] mapping, in resolution order.
pub type ReferenceMapping = indexmap::IndexMap<String, ReferenceEntry>;

/// Outcome of reference resolution. `errors` holds one entry per dropped
/// identifier; the mapping covers everything that resolved cleanly.
#[derive(Debug, Default)]
pub struct MappingResult {
    pub mapping: ReferenceMapping,
    pub errors: Vec<LocalizeError>,
}

pub fn build_reference_mapping(
    strings: &TranslationTable,
    document: &Document,
    ignore_unmatched_selectors: bool,
) -> MappingResult {
    let decomposition = decompose(strings);
    let mut result = MappingResult {
        mapping: ReferenceMapping::new(),
        errors: decomposition.errors,
    };

    resolve_ids(document, ignore_unmatched_selectors, &decomposition.ids, &mut result);

    // class and element identifiers share the resolution rules; elements
    // additionally yield to class-claimed nodes
    resolve_group(
        strings,
        document,
        &decomposition.classes,
        |document, name| document.elements_by_class(name),
        true,
        false,
        &mut result,
    );
    resolve_group(
        strings,
        document,
        &decomposition.elements,
        |document, name| document.elements_by_tag(name),
        true,
        true,
        &mut result,
    );

    resolve_attributes(document, &decomposition.attributes, &mut result);
    resolve_texts(document, &decomposition.texts, &mut result);

    log::debug!(
        target: "localizer",
        "resolved {} of {} identifiers ({} dropped)",
        result.mapping.len(),
        strings.len(),
        result.errors.len()
    );
    result
}

fn resolve_ids(
    document: &Document,
    ignore_unmatched_selectors: bool,
    ids: &[(String, String)],
    result: &mut MappingResult,
) {
    for (key, name) in ids {
        let node = document.element_by_id(name);
        let child_count = node.map_or(0, |node| document.child_count(node));

        if ignore_unmatched_selectors && child_count == 0 {
            log::debug!(target: "localizer", "'{key}' matched no content, ignoring");
            continue;
        }
        if child_count != 1 {
            drop_identifier(
                result,
                LocalizeError::NotExactlyOneChild {
                    identifier: key.clone(),
                    found: child_count,
                },
            );
            continue;
        }

        // child_count is 1, so the node exists
        let Some(node) = node else { continue };
        match document.sole_text_child(node) {
            Some(text) => {
                result.mapping.insert(
                    key.clone(),
                    ReferenceEntry {
                        is_attribute: false,
                        original_text: text.to_string(),
                        nodes: SmallVec::from_slice(&[node]),
                    },
                );
            }
            None => drop_identifier(
                result,
                LocalizeError::NotATextNode {
                    identifier: key.clone(),
                },
            ),
        }
    }
}

/// Shared resolution for class and element identifiers: collect candidate
/// nodes, skip any claimed by an earlier category, and require each
/// remaining node to hold the same sole text child.
fn resolve_group(
    strings: &TranslationTable,
    document: &Document,
    items: &[(String, String)],
    candidates: impl Fn(&Document, &str) -> Vec<NodeId>,
    skip_claimed_ids: bool,
    skip_claimed_classes: bool,
    result: &mut MappingResult,
) {
    'identifier: for (key, name) in items {
        let mut nodes: SmallVec<[NodeId; 4]> = SmallVec::new();
        let mut shared_text: Option<String> = None;
        let mut texts_all_equal = true;

        for node in candidates(document, name) {
            if skip_claimed_ids && is_claimed_by_id(strings, document, node) {
                continue;
            }
            if skip_claimed_classes && is_claimed_by_class(strings, document, node) {
                continue;
            }

            let child_count = document.child_count(node);
            if child_count != 1 {
                drop_identifier(
                    result,
                    LocalizeError::NotExactlyOneChild {
                        identifier: key.clone(),
                        found: child_count,
                    },
                );
                continue 'identifier;
            }
            let Some(text) = document.sole_text_child(node) else {
                drop_identifier(
                    result,
                    LocalizeError::NotATextNode {
                        identifier: key.clone(),
                    },
                );
                continue 'identifier;
            };

            nodes.push(node);
            match &shared_text {
                None => shared_text = Some(text.to_string()),
                Some(first) if first != text => texts_all_equal = false,
                _ => {}
            }
        }

        let Some(original_text) = shared_text else {
            // nothing matched: a benign no-op, consistent with unmatched
            // selectors being tolerated elsewhere
            continue;
        };
        if !texts_all_equal {
            drop_identifier(
                result,
                LocalizeError::MismatchedText {
                    identifier: key.clone(),
                    expected: original_text,
                },
            );
            continue;
        }

        result.mapping.insert(
            key.clone(),
            ReferenceEntry {
                is_attribute: false,
                original_text,
                nodes,
            },
        );
    }
}

fn resolve_attributes(
    document: &Document,
    attributes: &[(String, String, EmbeddedSelector)],
    result: &mut MappingResult,
) {
    for (key, attribute, selector) in attributes {
        let candidates = match selector {
            EmbeddedSelector::Id(name) => document.element_by_id(name).into_iter().collect(),
            EmbeddedSelector::Class(name) => document.elements_by_class(name),
            EmbeddedSelector::Element(name) => document.elements_by_tag(name),
        };

        let nodes: SmallVec<[NodeId; 4]> = candidates
            .into_iter()
            .filter(|&node| document.has_attribute(node, attribute))
            .collect();

        if nodes.is_empty() {
            drop_identifier(
                result,
                LocalizeError::UnmatchedSelector {
                    identifier: key.clone(),
                },
            );
            continue;
        }

        let original_text = document
            .attribute(nodes[0], attribute)
            .unwrap_or_default()
            .to_string();
        let all_same = nodes
            .iter()
            .all(|&node| document.attribute(node, attribute) == Some(original_text.as_str()));
        if !all_same {
            drop_identifier(
                result,
                LocalizeError::MismatchedAttributeValues {
                    identifier: key.clone(),
                },
            );
            continue;
        }

        result.mapping.insert(
            key.clone(),
            ReferenceEntry {
                is_attribute: true,
                original_text,
                nodes,
            },
        );
    }
}

/// Literal text identifiers match elements whose sole text child equals
/// the identifier exactly, so reverting to the original is lossless.
fn resolve_texts(document: &Document, texts: &[String], result: &mut MappingResult) {
    for key in texts {
        let mut nodes: SmallVec<[NodeId; 4]> = SmallVec::new();
        for node in document.elements_containing_text(key) {
            if document.sole_text_child(node) == Some(key.as_str()) {
                nodes.push(node);
            }
        }
        if nodes.is_empty() {
            continue;
        }
        result.mapping.insert(
            key.clone(),
            ReferenceEntry {
                is_attribute: false,
                original_text: key.clone(),
                nodes,
            },
        );
    }
}

fn is_claimed_by_id(strings: &TranslationTable, document: &Document, node: NodeId) -> bool {
    match document.attribute(node, "id") {
        Some(id) => strings.contains_key(&format!("id:{id}")),
        None => false,
    }
}

fn is_claimed_by_class(strings: &TranslationTable, document: &Document, node: NodeId) -> bool {
    match document.attribute(node, "class") {
        Some(classes) => classes
            .split_whitespace()
            .any(|class| strings.contains_key(&format!("class:{class}"))),
        None => false,
    }
}

fn drop_identifier(result: &mut MappingResult, error: LocalizeError) {
    log::warn!(target: "localizer", "dropping identifier: {error}");
    result.errors.push(error);
}
