use page_localizer::identifiers::{decompose, EmbeddedSelector, Identifier};
use page_localizer::{LocalizeError, TranslationTable};

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_keys(keys: &[&str]) -> TranslationTable {
        let mut table = TranslationTable::new();
        for key in keys {
            table.insert(key.to_string(), Default::default());
        }
        table
    }

    #[test]
    fn should_classify_prefixed_identifiers() {
        assert_eq!(
            Identifier::classify("id:hello").unwrap(),
            Identifier::Id("hello".to_string())
        );
        assert_eq!(
            Identifier::classify("class:the_class").unwrap(),
            Identifier::Class("the_class".to_string())
        );
        assert_eq!(
            Identifier::classify("element:pre").unwrap(),
            Identifier::Element("pre".to_string())
        );
    }

    #[test]
    fn should_classify_everything_else_as_text() {
        assert_eq!(
            Identifier::classify("some text element here").unwrap(),
            Identifier::Text("some text element here".to_string())
        );
        // a colon alone does not make a selector
        assert_eq!(
            Identifier::classify("note: read this").unwrap(),
            Identifier::Text("note: read this".to_string())
        );
    }

    #[test]
    fn should_detect_attribute_identifiers_before_other_prefixes() {
        assert_eq!(
            Identifier::classify("id::id:hello").unwrap(),
            Identifier::Attribute {
                attribute: "id".to_string(),
                selector: EmbeddedSelector::Id("hello".to_string()),
            }
        );
        assert_eq!(
            Identifier::classify("placeholder::class:localized").unwrap(),
            Identifier::Attribute {
                attribute: "placeholder".to_string(),
                selector: EmbeddedSelector::Class("localized".to_string()),
            }
        );
        assert_eq!(
            Identifier::classify("data-hint::element:input").unwrap(),
            Identifier::Attribute {
                attribute: "data-hint".to_string(),
                selector: EmbeddedSelector::Element("input".to_string()),
            }
        );
    }

    #[test]
    fn should_lowercase_the_attribute_name() {
        assert_eq!(
            Identifier::classify("PLACEHOLDER::id:email").unwrap(),
            Identifier::Attribute {
                attribute: "placeholder".to_string(),
                selector: EmbeddedSelector::Id("email".to_string()),
            }
        );
    }

    #[test]
    fn should_allow_double_colons_inside_the_embedded_name() {
        // everything after the selector prefix belongs to the name
        assert_eq!(
            Identifier::classify("title::class:a::b").unwrap(),
            Identifier::Attribute {
                attribute: "title".to_string(),
                selector: EmbeddedSelector::Class("a::b".to_string()),
            }
        );
    }

    #[test]
    fn should_reject_attribute_identifiers_without_embedded_selector() {
        assert_eq!(
            Identifier::classify("placeholder::").unwrap_err(),
            LocalizeError::MissingEmbeddedSelector {
                identifier: "placeholder::".to_string()
            }
        );
    }

    #[test]
    fn should_reject_malformed_embedded_selectors() {
        assert!(matches!(
            Identifier::classify("placeholder::foo:bar"),
            Err(LocalizeError::MalformedAttributeIdentifier { .. })
        ));
        // an extra colon leaves the selector starting with ':'
        assert!(matches!(
            Identifier::classify("placeholder:::class:x"),
            Err(LocalizeError::MalformedAttributeIdentifier { .. })
        ));
        // 'class:' with nothing after the colon
        assert!(matches!(
            Identifier::classify("placeholder::class:"),
            Err(LocalizeError::MalformedAttributeIdentifier { .. })
        ));
    }

    #[test]
    fn should_decompose_keys_by_category_in_table_order() {
        let table = table_with_keys(&[
            "id::id:hello",
            "id:hello",
            "element:pre",
            "class:the_class",
            "some text element here",
        ]);

        let decomposition = decompose(&table);

        assert_eq!(
            decomposition.ids,
            vec![("id:hello".to_string(), "hello".to_string())]
        );
        assert_eq!(
            decomposition.classes,
            vec![("class:the_class".to_string(), "the_class".to_string())]
        );
        assert_eq!(
            decomposition.elements,
            vec![("element:pre".to_string(), "pre".to_string())]
        );
        assert_eq!(decomposition.texts, vec!["some text element here".to_string()]);
        assert_eq!(
            decomposition.attributes,
            vec![(
                "id::id:hello".to_string(),
                "id".to_string(),
                EmbeddedSelector::Id("hello".to_string()),
            )]
        );
        assert!(decomposition.errors.is_empty());
    }

    #[test]
    fn should_collect_classification_errors_without_dropping_other_keys() {
        let table = table_with_keys(&["placeholder::", "id:ok"]);

        let decomposition = decompose(&table);

        assert_eq!(decomposition.ids.len(), 1);
        assert_eq!(decomposition.errors.len(), 1);
        assert!(matches!(
            decomposition.errors[0],
            LocalizeError::MissingEmbeddedSelector { .. }
        ));
    }
}
