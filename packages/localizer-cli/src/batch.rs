//! Batch localization of HTML files.
//!
//! Every input file is parsed, mapped and translated independently, so the
//! batch fans out over a rayon pool. Identifier-level problems (selectors
//! that resolve to nothing, strings without a translation) are collected as
//! warnings per file; only unreadable inputs, malformed strings files and
//! unknown language codes fail the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use page_localizer::dom::Document;
use page_localizer::language_subset::active_languages;
use page_localizer::languages::merged_registry;
use page_localizer::{LocalizationOptions, LocalizationTool};

/// One localized input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub translated_nodes: usize,
    /// Per-identifier resolution and apply problems, already formatted.
    pub warnings: Vec<String>,
}

/// A language offered by a strings file, with a human-readable label.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageListing {
    pub code: String,
    pub label: String,
}

/// Read and deserialize a strings JSON file.
pub fn load_options(path: &Path) -> Result<LocalizationOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read strings file {}", path.display()))?;
    let options: LocalizationOptions = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid strings file", path.display()))?;
    Ok(options)
}

/// Languages every string of the table is translated into, default first.
pub fn list_active_languages(options: &LocalizationOptions) -> Result<Vec<LanguageListing>> {
    let registry = merged_registry(options.languages.clone());
    if !registry.contains_key(&options.default_language) {
        bail!(
            "the default language '{}' is not defined in the language registry",
            options.default_language
        );
    }

    let codes = active_languages(&options.strings, &options.default_language, &registry);
    Ok(codes
        .into_iter()
        .map(|code| {
            let label = match registry.get(&code) {
                Some(definition) => match &definition.country {
                    Some(country) => format!("{} ({})", country, definition.language),
                    None => definition.language.clone(),
                },
                None => String::new(),
            };
            LanguageListing { code, label }
        })
        .collect())
}

/// Localize every input into `language`, in parallel. The first hard error
/// fails the whole batch; already-written outputs are left in place.
pub fn localize_files(
    inputs: &[PathBuf],
    options: &LocalizationOptions,
    language: &str,
    out_dir: Option<&Path>,
) -> Result<Vec<FileOutcome>> {
    let registry = merged_registry(options.languages.clone());
    if !registry.contains_key(language) {
        bail!("The language code {language} is not known");
    }

    inputs
        .par_iter()
        .map(|input| localize_file(input, options.clone(), language, out_dir))
        .collect()
}

/// Localize a single file and write the result next to it (suffixed with
/// the language code) or into `out_dir` under the input's file name.
pub fn localize_file(
    input: &Path,
    options: LocalizationOptions,
    language: &str,
    out_dir: Option<&Path>,
) -> Result<FileOutcome> {
    let html = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let document = Document::parse(&html);

    let mut tool = LocalizationTool::new(document, options)
        .with_context(|| format!("cannot localize {}", input.display()))?;
    let mut warnings: Vec<String> = tool
        .resolution_errors()
        .iter()
        .map(ToString::to_string)
        .collect();

    let report = tool
        .translate(Some(language))
        .with_context(|| format!("cannot localize {}", input.display()))?;
    warnings.extend(report.errors.iter().map(ToString::to_string));

    let output = output_path(input, language, out_dir);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(&output, tool.document().to_html())
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        translated_nodes: report.translated_nodes,
        warnings,
    })
}

fn output_path(input: &Path, language: &str, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(dir) => dir.join(input.file_name().unwrap_or_default()),
        None => {
            let stem = input
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("page");
            let extension = input
                .extension()
                .and_then(|extension| extension.to_str())
                .unwrap_or("html");
            input.with_file_name(format!("{stem}.{language}.{extension}"))
        }
    }
}
