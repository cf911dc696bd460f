use indexmap::IndexMap;
use page_localizer::dom::Document;
use page_localizer::{
    ErrorKind, LocalizationOptions, LocalizationTool, LocalizeError, TranslationTable,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_with_some_text() -> LocalizationTool {
        let mut translations = IndexMap::new();
        translations.insert("it_IT".to_string(), "this is some translation 1".to_string());
        translations.insert("jp_JP".to_string(), "this is some translation 2".to_string());
        translations.insert("fr_FR".to_string(), "this is some translation 3".to_string());

        let mut strings = TranslationTable::new();
        strings.insert("this is some text".to_string(), translations);

        let options = LocalizationOptions {
            strings,
            ..LocalizationOptions::default()
        };
        LocalizationTool::new(Document::parse("<div id=\"dropdown\"></div>"), options).unwrap()
    }

    #[test]
    fn should_translate_a_registered_string() {
        let tool = tool_with_some_text();

        assert_eq!(
            tool.translate_string("this is some text", "it_IT").unwrap(),
            "this is some translation 1"
        );
        assert_eq!(
            tool.translate_string("this is some text", "fr_FR").unwrap(),
            "this is some translation 3"
        );
    }

    #[test]
    fn should_reject_unknown_language_codes() {
        let tool = tool_with_some_text();

        let error = tool
            .translate_string("this is some text", "fooLanguage")
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Lookup);
        assert_eq!(
            error.to_string(),
            "The language code fooLanguage is not known"
        );
    }

    #[test]
    fn should_reject_languages_the_string_is_not_translated_into() {
        let tool = tool_with_some_text();

        let error = tool
            .translate_string("this is some text", "de_DE")
            .unwrap_err();

        assert_eq!(
            error,
            LocalizeError::TranslationNotDefined {
                text: "this is some text".to_string(),
                language: "de_DE".to_string(),
                defined: vec![
                    "it_IT".to_string(),
                    "jp_JP".to_string(),
                    "fr_FR".to_string(),
                ],
            }
        );
        assert_eq!(
            error.to_string(),
            "A translation for the string 'this is some text' was not defined for language \
             de_DE. Defined languages are: it_IT, jp_JP, fr_FR"
        );
    }

    #[test]
    fn should_reject_strings_missing_from_the_table() {
        let tool = tool_with_some_text();

        let error = tool
            .translate_string("this is some other text", "de_DE")
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "The string 'this is some other text' was not translated in any language."
        );
    }

    #[test]
    fn should_honor_languages_added_through_the_registry_overlay() {
        let mut translations = IndexMap::new();
        translations.insert("sl_SI".to_string(), "nekaj besedila".to_string());
        let mut strings = TranslationTable::new();
        strings.insert("some text".to_string(), translations);

        let mut languages = page_localizer::languages::LanguageRegistry::new();
        languages.insert(
            "sl_SI".to_string(),
            serde_json::from_str(
                r#"{"country": "Slovenia", "language": "Slovenian", "flag": {"class": "flag flag-si"}}"#,
            )
            .unwrap(),
        );

        let options = LocalizationOptions {
            strings,
            languages,
            ..LocalizationOptions::default()
        };
        let tool = LocalizationTool::new(Document::parse("<div></div>"), options).unwrap();

        assert_eq!(
            tool.translate_string("some text", "sl_SI").unwrap(),
            "nekaj besedila"
        );
    }
}
