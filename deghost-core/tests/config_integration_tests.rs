// deghost-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use deghost_core::config::{self, ReviewCategory, ScrubConfig};

#[test]
fn test_load_default_rules() {
    let config = ScrubConfig::load_default_rules().unwrap();
    assert!(!config.line_rules.is_empty());
    assert!(!config.replace_rules.is_empty());
    assert!(!config.review_rules.is_empty());
    assert!(config.line_rules.iter().any(|r| r.name == "ai_attribution_slash"));
    assert!(config.replace_rules.iter().any(|r| r.name == "trailing_comment_period"));
    assert!(config.review_rules.iter().any(|r| r.name == "as_an_ai"));
}

#[test]
fn test_default_rules_validate() {
    let config = ScrubConfig::load_default_rules().unwrap();
    config::validate_rules(&config).unwrap();
}

#[test]
fn test_default_rule_order_is_preserved() {
    let config = ScrubConfig::load_default_rules().unwrap();
    // Attribution rules lead the table so they win over the generic
    // conversational rules for lines matching both.
    assert_eq!(config.line_rules[0].name, "ai_attribution_slash");
    // The trailing-period strip must run after the lead-in strips.
    let lead_in = config
        .replace_rules
        .iter()
        .position(|r| r.name == "filler_subject_lead_in")
        .unwrap();
    let period = config
        .replace_rules
        .iter()
        .position(|r| r.name == "trailing_comment_period")
        .unwrap();
    assert!(lead_in < period);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
line_rules:
  - name: custom_marker
    pattern: '^\s*//\s*scratch\s*$'
    description: "A test rule"
replace_rules:
  - name: custom_swap
    pattern: "foo"
    replace_with: "bar"
review_rules:
  - name: custom_review
    pattern: "hack"
    category: follow-up
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = ScrubConfig::load_from_file(file.path())?;
    assert_eq!(config.line_rules.len(), 1);
    assert_eq!(config.line_rules[0].name, "custom_marker");
    assert_eq!(config.replace_rules[0].replace_with, "bar");
    assert!(!config.replace_rules[0].multiline); // defaulted
    assert_eq!(config.review_rules[0].category, ReviewCategory::FollowUp);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let yaml_content = r#"
line_rules:
  - name: broken
    pattern: "(["
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = ScrubConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Rule validation failed"));
    Ok(())
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}

#[test]
fn test_merge_rules_override_keeps_position() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let original_pos = default_config
        .line_rules
        .iter()
        .position(|r| r.name == "lets_slash")
        .unwrap();

    let user_config = ScrubConfig {
        line_rules: vec![deghost_core::LineRule {
            name: "lets_slash".to_string(),
            pattern: "^//\\s*Let us\\s+".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    };

    let merged = config::merge_rules(default_config.clone(), Some(user_config));
    assert_eq!(merged.line_rules.len(), default_config.line_rules.len());
    assert_eq!(merged.line_rules[original_pos].name, "lets_slash");
    assert_eq!(merged.line_rules[original_pos].pattern, "^//\\s*Let us\\s+");
}

#[test]
fn test_merge_rules_appends_new_names() {
    let default_config = ScrubConfig::load_default_rules().unwrap();
    let default_len = default_config.review_rules.len();

    let user_config = ScrubConfig {
        review_rules: vec![deghost_core::ReviewRule {
            name: "house_style_marker".to_string(),
            pattern: "XXX".to_string(),
            category: ReviewCategory::FollowUp,
            ..Default::default()
        }],
        ..Default::default()
    };

    let merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.review_rules.len(), default_len + 1);
    assert_eq!(merged.review_rules.last().unwrap().name, "house_style_marker");
}

#[test]
fn test_set_active_rules_across_tables() {
    let mut config = ScrubConfig::load_default_rules().unwrap();
    config.set_active_rules(
        &[],
        &["emoji_run".to_string(), "placeholder_token".to_string()],
    );
    assert!(!config.replace_rules.iter().any(|r| r.name == "emoji_run"));
    assert!(!config.review_rules.iter().any(|r| r.name == "placeholder_token"));
    assert!(config.line_rules.iter().any(|r| r.name == "ai_attribution_slash"));
}
