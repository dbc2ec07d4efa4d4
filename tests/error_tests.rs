use jshape::{JshapeError, ParseError};

#[test]
fn test_file_not_found_message() {
    let err = ParseError::file_not_found("missing.json");
    assert_eq!(err.to_string(), "File not found: missing.json");
}

#[test]
fn test_json_error_includes_origin_and_cause() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = ParseError::json_error("left.json", source);
    let message = err.to_string();
    assert!(message.starts_with("Invalid JSON in left.json"));
}

#[test]
fn test_unknown_format_message() {
    let err = ParseError::unknown_format("data.bin");
    assert!(err.to_string().contains("data.bin"));
}

#[test]
fn test_parse_error_converts_to_top_level() {
    let err: JshapeError = ParseError::file_not_found("x.json").into();
    assert!(matches!(err, JshapeError::Parse(_)));
    assert_eq!(err.to_string(), "File not found: x.json");
}
