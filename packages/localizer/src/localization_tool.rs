//! The localization tool: configuration, construction and the public
//! operation surface.
//!
//! A [`LocalizationTool`] owns a [`Document`] plus the reference mapping
//! built for it at construction time. After that, switching languages is
//! repeatable in any order: translations and originals are swapped in and
//! out of the mapped nodes without reparsing the page.

use serde::Deserialize;

use crate::dom::Document;
use crate::error::LocalizeError;
use crate::label_template::{interpolate_label, DisplayOptions, DEFAULT_LABEL_TEMPLATE};
use crate::language_subset::active_languages;
use crate::languages::{merged_registry, LanguageRegistry};
use crate::reference_mapping::{build_reference_mapping, MappingResult, ReferenceMapping};
use crate::translator::{apply_translation, ApplyReport};
use crate::{LanguageCode, TranslationTable};

/// Decision hook invoked before a user-driven language selection is
/// applied. Returning `false` keeps the selection but suppresses the
/// translation pass.
pub type LanguageSelectedHook = Box<dyn FnMut(&str) -> bool>;

/// Construction-time configuration.
///
/// Deserializes from the same JSON shape the widget is configured with:
/// camel-cased keys, every field optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalizationOptions {
    /// Language the page is authored in. Must be in the registry after
    /// merging.
    pub default_language: LanguageCode,
    /// Extra language definitions, merged over the builtin registry.
    pub languages: LanguageRegistry,
    /// The translation table: string identifier to language to text.
    pub strings: TranslationTable,
    /// Tolerate id identifiers that match no content instead of reporting
    /// a resolution error.
    pub ignore_unmatched_selectors: bool,
    pub show_flag: bool,
    pub show_language: bool,
    pub show_country: bool,
    /// Template for [`LocalizationTool::language_label`].
    pub label_template: String,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        LocalizationOptions {
            default_language: "en_GB".to_string(),
            languages: LanguageRegistry::new(),
            strings: TranslationTable::new(),
            ignore_unmatched_selectors: false,
            show_flag: true,
            show_language: true,
            show_country: true,
            label_template: DEFAULT_LABEL_TEMPLATE.to_string(),
        }
    }
}

/// How the user is currently driving the widget. Affects nothing in the
/// engine itself; hosts use it to decide focus behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Pointer,
    Keyboard,
}

pub struct LocalizationTool {
    document: Document,
    default_language: LanguageCode,
    languages: LanguageRegistry,
    strings: TranslationTable,
    label_template: String,
    display: DisplayOptions,
    active_languages: Vec<LanguageCode>,
    mapping: ReferenceMapping,
    resolution_errors: Vec<LocalizeError>,
    selected_language: LanguageCode,
    interaction_mode: InteractionMode,
    on_language_selected: Option<LanguageSelectedHook>,
}

impl LocalizationTool {
    /// Build a tool for `document`.
    ///
    /// Merges the language registry, computes the active language set and
    /// resolves the reference mapping. Identifiers that fail to resolve
    /// are dropped and reported through [`resolution_errors`]; only an
    /// undefined default language is fatal.
    ///
    /// [`resolution_errors`]: LocalizationTool::resolution_errors
    pub fn new(document: Document, options: LocalizationOptions) -> Result<Self, LocalizeError> {
        let LocalizationOptions {
            default_language,
            languages,
            strings,
            ignore_unmatched_selectors,
            show_flag,
            show_language,
            show_country,
            label_template,
        } = options;

        let languages = merged_registry(languages);
        if !languages.contains_key(&default_language) {
            return Err(LocalizeError::UnknownDefaultLanguage(default_language));
        }

        let active_languages = active_languages(&strings, &default_language, &languages);
        let MappingResult { mapping, errors } =
            build_reference_mapping(&strings, &document, ignore_unmatched_selectors);

        let mut display = DisplayOptions::empty();
        display.set(DisplayOptions::FLAG, show_flag);
        display.set(DisplayOptions::LANGUAGE, show_language);
        display.set(DisplayOptions::COUNTRY, show_country);

        Ok(LocalizationTool {
            document,
            selected_language: default_language.clone(),
            default_language,
            languages,
            strings,
            label_template,
            display,
            active_languages,
            mapping,
            resolution_errors: errors,
            interaction_mode: InteractionMode::default(),
            on_language_selected: None,
        })
    }

    /// Translate the whole document to `language`, or back to the
    /// originals when `None` or the default language is given.
    ///
    /// The selection is updated on success and left untouched when the
    /// language code is unknown.
    pub fn translate(&mut self, language: Option<&str>) -> Result<ApplyReport, LocalizeError> {
        let report = apply_translation(
            &mut self.document,
            &self.mapping,
            &self.strings,
            &self.languages,
            &self.default_language,
            language,
        )?;
        self.selected_language = match language {
            Some(code) => code.to_string(),
            None => self.default_language.clone(),
        };
        Ok(report)
    }

    /// User-driven language selection: the selection changes first, then
    /// the hook (if any) may veto the translation pass.
    ///
    /// `Ok(None)` means the hook vetoed; the selection still points at
    /// `code`, as it does when the subsequent translation fails.
    pub fn select_language(&mut self, code: &str) -> Result<Option<ApplyReport>, LocalizeError> {
        self.selected_language = code.to_string();
        let proceed = match self.on_language_selected.as_mut() {
            Some(hook) => hook(code),
            None => true,
        };
        if !proceed {
            log::debug!(target: "localizer", "selection hook suppressed translating to {code}");
            return Ok(None);
        }
        let report = apply_translation(
            &mut self.document,
            &self.mapping,
            &self.strings,
            &self.languages,
            &self.default_language,
            Some(code),
        )?;
        Ok(Some(report))
    }

    /// Select the language after the current one in the active set.
    /// `Ok(None)` when already at the end (or when the hook vetoed).
    pub fn select_next_language(&mut self) -> Result<Option<ApplyReport>, LocalizeError> {
        let ordinal = self.language_ordinal(&self.selected_language)?;
        if ordinal + 1 >= self.active_languages.len() {
            return Ok(None);
        }
        let next = self.active_languages[ordinal + 1].clone();
        self.select_language(&next)
    }

    /// Select the language before the current one in the active set.
    /// `Ok(None)` when already at the front (or when the hook vetoed).
    pub fn select_previous_language(&mut self) -> Result<Option<ApplyReport>, LocalizeError> {
        let ordinal = self.language_ordinal(&self.selected_language)?;
        if ordinal == 0 {
            return Ok(None);
        }
        let previous = self.active_languages[ordinal - 1].clone();
        self.select_language(&previous)
    }

    /// Translate a single registered string without touching the document.
    pub fn translate_string(&self, text: &str, language: &str) -> Result<&str, LocalizeError> {
        if !self.languages.contains_key(language) {
            return Err(LocalizeError::UnknownLanguage(language.to_string()));
        }
        let translations = self
            .strings
            .get(text)
            .ok_or_else(|| LocalizeError::StringNotRegistered(text.to_string()))?;
        translations
            .get(language)
            .map(String::as_str)
            .ok_or_else(|| LocalizeError::TranslationNotDefined {
                text: text.to_string(),
                language: language.to_string(),
                defined: translations.keys().cloned().collect(),
            })
    }

    /// Widget label markup for one language code.
    pub fn language_label(&self, code: &str) -> Result<String, LocalizeError> {
        let definition = self
            .languages
            .get(code)
            .ok_or_else(|| LocalizeError::UnknownLanguage(code.to_string()))?;
        Ok(interpolate_label(
            &self.label_template,
            definition.country.as_deref(),
            &definition.language,
            self.display,
        ))
    }

    /// Register the selection decision hook. Replaces any previous hook.
    pub fn on_language_selected(&mut self, hook: impl FnMut(&str) -> bool + 'static) {
        self.on_language_selected = Some(Box::new(hook));
    }

    pub fn selected_language(&self) -> &str {
        &self.selected_language
    }

    /// Languages offered for selection: the default language first, then
    /// every language covered by all table entries, sorted by country.
    pub fn active_languages(&self) -> &[LanguageCode] {
        &self.active_languages
    }

    /// Identifiers dropped during reference resolution, in table order.
    pub fn resolution_errors(&self) -> &[LocalizeError] {
        &self.resolution_errors
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    pub fn strings(&self) -> &TranslationTable {
        &self.strings
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    pub fn set_interaction_mode(&mut self, mode: InteractionMode) {
        self.interaction_mode = mode;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Host-side mutation access. Nodes the mapping points at keep their
    /// handles as long as they stay in the tree; removing them surfaces as
    /// stale-node errors on the next translation pass.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Tear the tool down, handing the document back in whatever language
    /// it was last translated to.
    pub fn destroy(self) -> Document {
        self.document
    }

    fn language_ordinal(&self, code: &str) -> Result<usize, LocalizeError> {
        self.active_languages
            .iter()
            .position(|candidate| candidate == code)
            .ok_or_else(|| LocalizeError::NotAnActiveLanguage(code.to_string()))
    }
}

/// A parsed method call for the string-dispatch surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Translate(Option<String>),
    SelectLanguage(String),
    SelectNextLanguage,
    SelectPreviousLanguage,
    TranslateString { text: String, language: String },
    GetSelectedLanguageCode,
    ActiveLanguageCodes,
}

impl Operation {
    /// Parse a method name and positional arguments.
    pub fn parse(name: &str, args: &[&str]) -> Result<Operation, LocalizeError> {
        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(LocalizeError::WrongOperationArity {
                    name: name.to_string(),
                    expected,
                })
            }
        };

        match name {
            "translate" => match args {
                [] => Ok(Operation::Translate(None)),
                [language] => Ok(Operation::Translate(Some(language.to_string()))),
                _ => Err(LocalizeError::WrongOperationArity {
                    name: name.to_string(),
                    expected: 1,
                }),
            },
            "selectLanguage" => {
                arity(1)?;
                Ok(Operation::SelectLanguage(args[0].to_string()))
            }
            "selectNextLanguage" => {
                arity(0)?;
                Ok(Operation::SelectNextLanguage)
            }
            "selectPreviousLanguage" => {
                arity(0)?;
                Ok(Operation::SelectPreviousLanguage)
            }
            "translateString" => {
                arity(2)?;
                Ok(Operation::TranslateString {
                    text: args[0].to_string(),
                    language: args[1].to_string(),
                })
            }
            "getSelectedLanguageCode" => {
                arity(0)?;
                Ok(Operation::GetSelectedLanguageCode)
            }
            "activeLanguageCodes" => {
                arity(0)?;
                Ok(Operation::ActiveLanguageCodes)
            }
            _ => Err(LocalizeError::UnknownOperation(name.to_string())),
        }
    }
}

/// Result of a dispatched [`Operation`].
#[derive(Debug, PartialEq)]
pub enum OperationOutput {
    /// A translation pass ran.
    Applied { translated_nodes: usize },
    /// The selection moved (or stayed) without a translation pass.
    Suppressed,
    Text(String),
    Code(String),
    Codes(Vec<LanguageCode>),
}

impl LocalizationTool {
    /// Execute a parsed operation against this tool.
    pub fn dispatch(&mut self, operation: Operation) -> Result<OperationOutput, LocalizeError> {
        match operation {
            Operation::Translate(language) => {
                let report = self.translate(language.as_deref())?;
                Ok(OperationOutput::Applied {
                    translated_nodes: report.translated_nodes,
                })
            }
            Operation::SelectLanguage(code) => match self.select_language(&code)? {
                Some(report) => Ok(OperationOutput::Applied {
                    translated_nodes: report.translated_nodes,
                }),
                None => Ok(OperationOutput::Suppressed),
            },
            Operation::SelectNextLanguage => match self.select_next_language()? {
                Some(report) => Ok(OperationOutput::Applied {
                    translated_nodes: report.translated_nodes,
                }),
                None => Ok(OperationOutput::Suppressed),
            },
            Operation::SelectPreviousLanguage => match self.select_previous_language()? {
                Some(report) => Ok(OperationOutput::Applied {
                    translated_nodes: report.translated_nodes,
                }),
                None => Ok(OperationOutput::Suppressed),
            },
            Operation::TranslateString { text, language } => {
                let translated = self.translate_string(&text, &language)?;
                Ok(OperationOutput::Text(translated.to_string()))
            }
            Operation::GetSelectedLanguageCode => {
                Ok(OperationOutput::Code(self.selected_language.clone()))
            }
            Operation::ActiveLanguageCodes => {
                Ok(OperationOutput::Codes(self.active_languages.clone()))
            }
        }
    }
}
