use std::path::Path;

use super::*;

#[test]
fn parse_applies_default_max_count() {
    let yaml = r"
rules:
  - keyword: iPhone
    url: https://example.com/iphone
  - keyword: laptop
    url: https://example.com/laptops
    max_count: 4
";
    let file = parse_link_rules(yaml, 2).unwrap();
    assert_eq!(file.rules.len(), 2);
    assert_eq!(file.rules[0].max_count, 2);
    assert_eq!(file.rules[1].max_count, 4);
}

#[test]
fn parse_preserves_file_order_and_keyword_casing() {
    let yaml = r"
rules:
  - keyword: MacBook Air
    url: https://example.com/mba
  - keyword: iPad
    url: https://example.com/ipad
";
    let file = parse_link_rules(yaml, 1).unwrap();
    let keywords: Vec<_> = file.rules.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["MacBook Air", "iPad"]);
}

#[test]
fn parse_accepts_camel_case_max_count() {
    let yaml = r"
rules:
  - keyword: tablet
    url: https://example.com/tablets
    maxCount: 5
";
    let file = parse_link_rules(yaml, 1).unwrap();
    assert_eq!(file.rules[0].max_count, 5);
}

#[test]
fn parse_empty_rules_list() {
    let file = parse_link_rules("rules: []\n", 1).unwrap();
    assert!(file.rules.is_empty());
}

#[test]
fn validate_rejects_blank_keyword() {
    let yaml = r#"
rules:
  - keyword: "  "
    url: https://example.com
"#;
    let err = parse_link_rules(yaml, 1).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("keyword")));
}

#[test]
fn validate_rejects_empty_url() {
    let yaml = r#"
rules:
  - keyword: iPhone
    url: ""
"#;
    let err = parse_link_rules(yaml, 1).unwrap_err();
    assert!(err.to_string().contains("empty url"));
}

#[test]
fn validate_rejects_non_http_url() {
    let yaml = r"
rules:
  - keyword: iPhone
    url: ftp://example.com/iphone
";
    let err = parse_link_rules(yaml, 1).unwrap_err();
    assert!(err.to_string().contains("http://"));
}

#[test]
fn validate_rejects_zero_max_count() {
    let yaml = r"
rules:
  - keyword: iPhone
    url: https://example.com/iphone
    max_count: 0
";
    let err = parse_link_rules(yaml, 1).unwrap_err();
    assert!(err.to_string().contains("max_count 0"));
}

#[test]
fn validate_rejects_duplicate_keyword_case_insensitively() {
    let yaml = r"
rules:
  - keyword: iPhone
    url: https://example.com/a
  - keyword: IPHONE
    url: https://example.com/b
";
    let err = parse_link_rules(yaml, 1).unwrap_err();
    assert!(err.to_string().contains("duplicate rule keyword"));
}

#[test]
fn parse_rejects_malformed_yaml() {
    let err = parse_link_rules("rules: [keyword: ", 1).unwrap_err();
    assert!(matches!(err, ConfigError::RulesFileParse(_)));
}

#[test]
fn load_reports_missing_file_path() {
    let err = load_link_rules(Path::new("/nonexistent/link_rules.yaml"), 1).unwrap_err();
    assert!(
        matches!(err, ConfigError::RulesFileIo { ref path, .. } if path.contains("link_rules.yaml"))
    );
}

#[test]
fn load_link_rules_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("link_rules.yaml");
    assert!(
        path.exists(),
        "link_rules.yaml missing at {path:?} — required for this test"
    );
    let rules_file = load_link_rules(&path, 1).expect("failed to load link_rules.yaml");
    assert!(
        !rules_file.rules.is_empty(),
        "link_rules.yaml should contain at least one rule"
    );
    for rule in &rules_file.rules {
        assert!(rule.is_applicable(), "rule '{}' should be applicable", rule.keyword);
        assert!(rule.max_count >= 1);
    }
}
