//! Integration tests for the GrammarBuilder API
//!
//! These tests verify that the public API works and is usable.

use pegboard::{
    GrammarBuilder, Node, PegboardError,
    config::{AppConfig, LimitsConfig, OutputConfig, OutputFormat},
};

const LIST_GRAMMAR: &str = r#"
    list -> item (',' item)*;
    item: -> number | '(' list ')';
    number:num -> digit+;
    digit: -> '0' | '1' | '2' | '3' | '4' | '5' | '6' | '7' | '8' | '9';
"#;

#[test]
fn test_builder_api_exists() {
    let _builder = GrammarBuilder::default();
}

#[test]
fn test_compile_and_parse() {
    let builder = GrammarBuilder::default();
    let grammar = builder.compile(LIST_GRAMMAR).expect("Failed to compile");

    let nodes = builder
        .parse(&grammar, "12,(3)", "list")
        .expect("Failed to parse");

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].tag(), Some("list"));
    assert_eq!(nodes[0].text(), "12,(3)");
}

#[test]
fn test_invalid_grammar_returns_parse_error() {
    let builder = GrammarBuilder::default();
    let result = builder.compile("this is not a grammar");

    match result {
        Err(PegboardError::Parse { err, src }) => {
            assert_eq!(src, "this is not a grammar");
            assert!(!err.diagnostics().is_empty());
        }
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

#[test]
fn test_failed_match_returns_trace() {
    let builder = GrammarBuilder::default();
    let grammar = builder.compile(LIST_GRAMMAR).expect("Failed to compile");

    let result = builder.parse(&grammar, "(1", "list");

    match result {
        Err(PegboardError::Match { failure, input }) => {
            assert_eq!(input, "(1");
            assert_eq!(failure.offset(), 2);
            assert_eq!(failure.reason(), "expected text \")\"");
            assert!(failure.rules().iter().any(|rule| rule == "list"));
        }
        other => panic!("Expected Match error, got {other:?}"),
    }
}

#[test]
fn test_configured_depth_limit_applies() {
    let config = AppConfig::new(LimitsConfig::new(4, None), OutputConfig::default());
    let builder = GrammarBuilder::new(config);
    let grammar = builder.compile(LIST_GRAMMAR).expect("Failed to compile");

    assert!(builder.parse(&grammar, "1", "list").is_ok());
    assert!(builder.parse(&grammar, "((((1))))", "list").is_err());
}

#[test]
fn test_configured_input_limit_applies() {
    let config = AppConfig::new(LimitsConfig::new(64, Some(3)), OutputConfig::default());
    let builder = GrammarBuilder::new(config);
    let grammar = builder.compile(LIST_GRAMMAR).expect("Failed to compile");

    assert!(builder.parse(&grammar, "1,2", "list").is_ok());
    assert!(builder.parse(&grammar, "1,2,3", "list").is_err());
}

#[test]
fn test_invalid_limits_return_config_error() {
    let config = AppConfig::new(LimitsConfig::new(0, None), OutputConfig::default());
    let builder = GrammarBuilder::new(config);

    assert!(matches!(
        builder.compile(LIST_GRAMMAR),
        Err(PegboardError::Config(_))
    ));
}

#[test]
fn test_warnings_do_not_fail_compilation() {
    let builder = GrammarBuilder::default();
    let grammar = builder
        .compile("root -> 'a' | missing;")
        .expect("Warnings should not fail compilation");

    assert_eq!(grammar.warnings().len(), 1);
    assert!(builder.parse(&grammar, "a", "root").is_ok());
}

#[test]
fn test_render_uses_configured_format() {
    let nodes = vec![Node::labeled("pair", vec![Node::raw("a")])];

    let tree = GrammarBuilder::default().render(&nodes);
    let debug = GrammarBuilder::new(AppConfig::new(
        LimitsConfig::default(),
        OutputConfig::new(OutputFormat::Debug),
    ))
    .render(&nodes);

    assert_eq!(tree, "pair\n  \"a\"\n");
    assert_eq!(debug, "pair(\"a\")\n");
}

#[test]
fn test_builder_reusability() {
    let builder = GrammarBuilder::default();

    let first = builder.compile("root -> 'x';").expect("Failed to compile first");
    let second = builder.compile("root -> 'y';").expect("Failed to compile second");

    assert!(builder.parse(&first, "x", "root").is_ok());
    assert!(builder.parse(&second, "y", "root").is_ok());
    assert!(builder.parse(&second, "x", "root").is_err());
}
