//! Processor API: format specs, output formats and file processing

use rst_nano::rst::processor::{
    available_formats, process_file, process_str, OutputFormat, ProcessingError, ProcessingSpec,
    ProcessingStage,
};
use rst_nano::rst::testing::{init_logging, RstSources};
use rstest::rstest;

#[rstest]
#[case("token-simple", ProcessingStage::Token, OutputFormat::Simple)]
#[case("token-json", ProcessingStage::Token, OutputFormat::Json)]
#[case("token-yaml", ProcessingStage::Token, OutputFormat::Yaml)]
#[case("ast-json", ProcessingStage::Ast, OutputFormat::Json)]
#[case("ast-yaml", ProcessingStage::Ast, OutputFormat::Yaml)]
#[case("ast-treeviz", ProcessingStage::Ast, OutputFormat::Treeviz)]
fn test_available_specs(
    #[case] format: &str,
    #[case] stage: ProcessingStage,
    #[case] output: OutputFormat,
) {
    let spec = ProcessingSpec::from_string(format).unwrap();
    assert_eq!(spec.stage, stage);
    assert_eq!(spec.format, output);
    assert!(available_formats().contains(&format.to_string()));
}

#[test]
fn test_available_formats_count() {
    assert_eq!(available_formats().len(), 6);
}

#[test]
fn test_ast_treeviz() {
    init_logging();
    let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
    let output = process_str("doc", "Title\n=====\n\n- a\n- b\n", &spec).unwrap();
    insta::assert_snapshot!(output, @r###"
    └─ section: Title (level 1)
      └─ bulletList: -
        ├─ bulletListItem
        │ └─ paragraph: a
        │   └─ text: a
        └─ bulletListItem
          └─ paragraph: b
            └─ text: b
    "###);
}

#[test]
fn test_ast_json_structure() {
    let spec = ProcessingSpec::from_string("ast-json").unwrap();
    let output = process_str("doc", "Title\n=====\n\nBody.\n", &spec).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let section = &json["nodeList"][0];
    assert_eq!(section["type"], "section");
    assert_eq!(section["level"], 1);
}

#[test]
fn test_token_json_is_an_array() {
    let spec = ProcessingSpec::from_string("token-json").unwrap();
    let output = process_str("doc", "- a\n", &spec).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["type"], "bullet");
    assert_eq!(tokens[3]["type"], "eof");
}

#[test]
fn test_yaml_outputs() {
    let spec = ProcessingSpec::from_string("ast-yaml").unwrap();
    let output = process_str("doc", "Some text.\n", &spec).unwrap();
    assert!(output.contains("type: paragraph"));

    let spec = ProcessingSpec::from_string("token-yaml").unwrap();
    let output = process_str("doc", "Some text.\n", &spec).unwrap();
    assert!(output.contains("type: text"));
}

#[test]
fn test_sample_file_processing() {
    for sample in RstSources::list_samples() {
        for format in available_formats() {
            let output = RstSources::get_processed(sample, &format).unwrap();
            assert!(!output.is_empty(), "{} as {}", sample, format);
        }
    }
}

#[test]
fn test_document_named_after_file() {
    let spec = ProcessingSpec::from_string("ast-json").unwrap();
    let path = RstSources::samples_dir().join("000-paragraphs.rst");
    let output = process_file(path, &spec).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["name"], "000-paragraphs");
}

#[test]
fn test_unknown_sample() {
    assert!(matches!(
        RstSources::get_string("999-missing.rst"),
        Err(ProcessingError::InvalidFormat(_))
    ));
}

#[test]
fn test_error_messages() {
    let err = ProcessingSpec::from_string("html-json").unwrap_err();
    assert_eq!(err.to_string(), "Invalid stage: html");
}
