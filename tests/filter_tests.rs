use jshape::{compute_differences, filter_diffs, parse_json, FilterConfig, PathPattern};

fn diffs(left: &str, right: &str) -> Vec<jshape::FlatDiff> {
    compute_differences(&parse_json(left).unwrap(), &parse_json(right).unwrap())
}

#[test]
fn test_literal_match() {
    let pattern = PathPattern::parse("metadata.timestamp");
    assert!(pattern.matches_path("metadata.timestamp"));
    assert!(!pattern.matches_path("metadata"));
    assert!(!pattern.matches_path("metadata.timestamp.ns"));
}

#[test]
fn test_single_wildcard_one_segment() {
    let pattern = PathPattern::parse("*.version");
    assert!(pattern.matches_path("package.version"));
    assert!(!pattern.matches_path("version"));
    assert!(!pattern.matches_path("a.b.version"));
}

#[test]
fn test_double_wildcard_any_depth() {
    let pattern = PathPattern::parse("**.version");
    assert!(pattern.matches_path("version"));
    assert!(pattern.matches_path("package.version"));
    assert!(pattern.matches_path("dependencies.foo.version"));
}

#[test]
fn test_trailing_double_wildcard() {
    let pattern = PathPattern::parse("user.**");
    assert!(pattern.matches_path("user"));
    assert!(pattern.matches_path("user.profile.age"));
    assert!(!pattern.matches_path("account.user"));
}

#[test]
fn test_ignore_drops_matching_paths() {
    let all = diffs(
        r#"{"data": 1, "metadata": {"ts": 100}}"#,
        r#"{"data": 2, "metadata": {"ts": 200}}"#,
    );
    let config = FilterConfig::new().ignore("metadata.**");
    let kept = filter_diffs(&all, &config);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].key, "data");
}

#[test]
fn test_only_keeps_matching_paths() {
    let all = diffs(
        r#"{"a": {"x": 1}, "b": {"x": 1}}"#,
        r#"{"a": {"x": 2}, "b": {"x": 2}}"#,
    );
    let config = FilterConfig::new().only("a.**");
    let kept = filter_diffs(&all, &config);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].key, "a.x");
}

#[test]
fn test_ignore_beats_only() {
    let all = diffs(r#"{"a": {"x": 1, "y": 1}}"#, r#"{"a": {"x": 2, "y": 2}}"#);
    let config = FilterConfig::new().only("a.**").ignore("a.y");
    let kept = filter_diffs(&all, &config);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].key, "a.x");
}

#[test]
fn test_empty_config_is_identity() {
    let all = diffs(r#"{"a": 1}"#, r#"{"a": 2}"#);
    let config = FilterConfig::new();
    assert!(!config.has_filters());
    assert_eq!(filter_diffs(&all, &config).len(), all.len());
}
