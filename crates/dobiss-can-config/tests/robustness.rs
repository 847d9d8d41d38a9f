//! Integration tests focused on error handling and edge cases.
//!
//! A document that is not well-formed must fail as a whole, while problems
//! with individual outputs must only drop those outputs.

use dobiss_can_config::{
    ConfigError, OutputKind, SkipReason, load_config_from_file, load_config_from_str,
};

/// A minimal valid export used as a base for creating corrupted test cases.
const MINIMAL_VALID_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project xmlns="http://schemas.datacontract.org/2004/07/AmbianceUI.Data" xmlns:i="http://www.w3.org/2001/XMLSchema-instance" xmlns:z="http://schemas.microsoft.com/2003/10/Serialization/">
  <Outputs>
    <Output z:Id="i1" i:type="OutputDim">
      <ID>2</ID>
      <Parent z:Ref="i9"/>
      <VMax>60</VMax>
      <_displayName>Salon</_displayName>
      <_group z:Ref="i8"/>
    </Output>
  </Outputs>
  <Group z:Id="i8"><DisplayName>Beneden</DisplayName></Group>
  <Module z:Id="i9"><Address>4</Address></Module>
</Project>"#;

#[test]
fn test_minimal_document() {
    let parsed = load_config_from_str(MINIMAL_VALID_XML).unwrap();
    assert_eq!(parsed.outputs.len(), 1);
    let salon = &parsed.outputs[0];
    assert_eq!(salon.key(), (4, 2));
    assert_eq!(salon.area.as_deref(), Some("Beneden"));
    assert_eq!(salon.max_level, 60);
}

/// Verifies that the parser catches malformed XML syntax (e.g., unclosed tags).
#[test]
fn test_unclosed_tag_fails_whole_document() {
    let xml = MINIMAL_VALID_XML.replace("</Project>", "");
    let result = load_config_from_str(&xml);
    assert!(
        matches!(result, Err(ConfigError::UnclosedElement { ref element }) if element == "Project"),
        "Expected UnclosedElement error, got {:?}",
        result
    );
}

#[test]
fn test_truncated_document_fails() {
    let xml = r#"<Project><Outputs><Output> ... missing closing tags"#;
    let result = load_config_from_str(xml);
    assert!(result.is_err(), "Expected an error, got {:?}", result);
    assert!(result.unwrap_err().to_string().starts_with("Invalid XML file: "));
}

#[test]
fn test_text_outside_root_fails() {
    let leading = MINIMAL_VALID_XML.replace("<Project ", "garbage<Project ");
    let trailing = MINIMAL_VALID_XML.replace("</Project>", "</Project>trailing garbage");

    for xml in [leading, trailing] {
        let result = load_config_from_str(&xml);
        assert!(
            matches!(result, Err(ConfigError::TextOutsideRoot { .. })),
            "Expected TextOutsideRoot error, got {:?}",
            result
        );
        assert!(!result.unwrap_err().is_read_failure());
    }
}

#[test]
fn test_whitespace_and_bom_around_root_pass() {
    let xml = format!("\u{feff}{}\n\n", MINIMAL_VALID_XML);
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.outputs.len(), 1);
}

#[test]
fn test_mismatched_tag_fails() {
    let xml = MINIMAL_VALID_XML.replace("</Outputs>", "</Output>");
    let result = load_config_from_str(&xml);
    assert!(
        matches!(result, Err(ConfigError::XmlParsing(_))),
        "Expected XmlParsing error, got {:?}",
        result
    );
}

#[test]
fn test_missing_file_is_read_failure() {
    let err = load_config_from_file("/nonexistent/config.dobiss").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.is_read_failure());
}

#[test]
fn test_valid_document_without_outputs() {
    let xml = r#"<Project xmlns="http://schemas.datacontract.org/2004/07/AmbianceUI.Data"><Outputs/></Project>"#;
    let parsed = load_config_from_str(xml).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.skipped_count(), 0);
}

#[test]
fn test_elements_outside_data_namespace_are_ignored() {
    let xml = MINIMAL_VALID_XML.replace(
        r#"<Project xmlns="http://schemas.datacontract.org/2004/07/AmbianceUI.Data""#,
        r#"<Project xmlns="urn:other""#,
    );
    let parsed = load_config_from_str(&xml).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_prefixed_variant_tag() {
    let xml = MINIMAL_VALID_XML.replace(r#"i:type="OutputDim""#, r#"i:type="a:OutputDim""#);
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.outputs[0].output_kind, OutputKind::Dimmer);
}

#[test]
fn test_unknown_variant_is_not_a_candidate() {
    let xml = MINIMAL_VALID_XML.replace(r#"i:type="OutputDim""#, r#"i:type="OutputScene""#);
    let parsed = load_config_from_str(&xml).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.skipped_count(), 0);
}

#[test]
fn test_missing_id_is_skipped_not_fatal() {
    let xml = MINIMAL_VALID_XML.replace("<ID>2</ID>", "");
    let parsed = load_config_from_str(&xml).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.skipped_by_kind().get(&OutputKind::Dimmer), Some(&1));
    assert_eq!(parsed.skipped[0].reason, SkipReason::MissingIndex);
}

#[test]
fn test_non_numeric_id_is_skipped() {
    let xml = MINIMAL_VALID_XML.replace("<ID>2</ID>", "<ID>two</ID>");
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(
        parsed.skipped[0].reason,
        SkipReason::InvalidIndex("two".to_string())
    );
}

#[test]
fn test_unresolved_parent_is_skipped() {
    let xml = MINIMAL_VALID_XML.replace(r#"<Parent z:Ref="i9"/>"#, r#"<Parent z:Ref="i404"/>"#);
    let parsed = load_config_from_str(&xml).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(
        parsed.skipped[0].reason,
        SkipReason::UnresolvedParent("i404".to_string())
    );
}

#[test]
fn test_missing_parent_is_skipped() {
    let xml = MINIMAL_VALID_XML.replace(r#"<Parent z:Ref="i9"/>"#, "");
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.skipped[0].reason, SkipReason::MissingParent);
    assert_eq!(parsed.skipped[0].name.as_deref(), Some("Salon"));
}

#[test]
fn test_invalid_module_address_is_skipped() {
    for (address, expected) in [
        ("<Address>x4</Address>", SkipReason::InvalidAddress("x4".to_string())),
        ("<Address>0</Address>", SkipReason::InvalidAddress("0".to_string())),
        ("", SkipReason::MissingAddress),
    ] {
        let xml = MINIMAL_VALID_XML.replace("<Address>4</Address>", address);
        let parsed = load_config_from_str(&xml).unwrap();
        assert!(parsed.is_empty(), "{address:?} should skip the output");
        assert_eq!(parsed.skipped[0].reason, expected);
    }
}

#[test]
fn test_missing_name_is_skipped() {
    let xml = MINIMAL_VALID_XML.replace(
        "<_displayName>Salon</_displayName>",
        "<_displayName>  </_displayName>",
    );
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.skipped[0].reason, SkipReason::MissingName);
    assert_eq!(parsed.skipped[0].name, None);
}

#[test]
fn test_name_from_subject_sharing_identifier() {
    let xml = MINIMAL_VALID_XML
        .replace("<_displayName>Salon</_displayName>", "")
        .replace(
            "</Outputs>",
            r#"</Outputs><_subject z:Id="i1" i:type="Scene"><_displayName>Salon sfeer</_displayName></_subject>"#,
        );
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.outputs.len(), 1);
    assert_eq!(parsed.outputs[0].name, "Salon sfeer");
}

#[test]
fn test_area_is_optional() {
    let unresolved = MINIMAL_VALID_XML.replace(r#"<_group z:Ref="i8"/>"#, r#"<_group z:Ref="i77"/>"#);
    let parsed = load_config_from_str(&unresolved).unwrap();
    assert_eq!(parsed.outputs[0].area, None);

    let absent = MINIMAL_VALID_XML.replace(r#"<_group z:Ref="i8"/>"#, "");
    let parsed = load_config_from_str(&absent).unwrap();
    assert_eq!(parsed.outputs[0].area, None);
}

#[test]
fn test_max_level_rules() {
    let missing = MINIMAL_VALID_XML.replace("<VMax>60</VMax>", "");
    assert_eq!(load_config_from_str(&missing).unwrap().outputs[0].max_level, 100);

    let garbage = MINIMAL_VALID_XML.replace("<VMax>60</VMax>", "<VMax>hoog</VMax>");
    assert_eq!(load_config_from_str(&garbage).unwrap().outputs[0].max_level, 100);

    let too_high = MINIMAL_VALID_XML.replace("<VMax>60</VMax>", "<VMax>250</VMax>");
    assert_eq!(load_config_from_str(&too_high).unwrap().outputs[0].max_level, 100);

    // Only dimmers carry a ceiling.
    let relay = MINIMAL_VALID_XML.replace(r#"i:type="OutputDim""#, r#"i:type="OutputRelais""#);
    let parsed = load_config_from_str(&relay).unwrap();
    assert_eq!(parsed.outputs[0].output_kind, OutputKind::Relay);
    assert_eq!(parsed.outputs[0].max_level, 100);
}

#[test]
fn test_one_bad_output_does_not_block_the_rest() {
    let xml = MINIMAL_VALID_XML.replace(
        "</Outputs>",
        r#"<Output i:type="OutputRelais"><ID>1</ID><_displayName>Kapot</_displayName></Output>
           <Output i:type="OutputRelais"><ID>3</ID><Parent z:Ref="i9"/><_displayName>Gang</_displayName></Output>
           </Outputs>"#,
    );
    let parsed = load_config_from_str(&xml).unwrap();
    let names: Vec<&str> = parsed.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Salon", "Gang"]);
    assert_eq!(parsed.skipped_by_kind().get(&OutputKind::Relay), Some(&1));
}

#[test]
fn test_duplicates_pass_through() {
    let xml = MINIMAL_VALID_XML.replace(
        "</Outputs>",
        r#"<Output i:type="OutputDim"><ID>2</ID><Parent z:Ref="i9"/><_displayName>Salon bis</_displayName></Output></Outputs>"#,
    );
    let parsed = load_config_from_str(&xml).unwrap();
    assert_eq!(parsed.outputs.len(), 2);
    assert_eq!(parsed.duplicate_keys(), vec![(4, 2)]);
}

#[test]
fn test_undefined_entity_fails() {
    let xml = MINIMAL_VALID_XML.replace("Salon", "Salon &eacute;");
    let result = load_config_from_str(&xml);
    assert!(
        matches!(result, Err(ConfigError::UnknownEntity { ref entity }) if entity == "eacute"),
        "Expected UnknownEntity error, got {:?}",
        result
    );
}
