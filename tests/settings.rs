use rharvest::{HarvestError, Settings};
use std::fs;
use std::path::Path;

fn write_config(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
}

const FULL_CONFIG: &str = r#"
http:
  user_agent: "rharvest-tests/0.1"
  timeout: 10
reddit:
  post_base_url: "https://example.test/r/{SUBREDDIT}/new.json"
  comment_base_url: "https://example.test/comments/{POST_ID}.json"
  delay_between_requests: 1.5
paths:
  job_list: "./data/subreddits.csv"
  extract_dir: "./data/out"
report:
  output_file: "./data/extract_report.json"
cleaning:
  word_length: 3
  author_filter_trigger: true
  author_filter:
    - "[deleted]"
    - "AutoModerator"
  output_path: "./data/cleaned.jsonl"
  output_report: "./data/cleaning_report.json"
"#;

#[test]
fn loads_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, FULL_CONFIG);

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.http.timeout, 10);
    assert!(settings.reddit.post_base_url.contains("{SUBREDDIT}"));
    assert!(settings.reddit.comment_base_url.contains("{POST_ID}"));
    assert_eq!(settings.reddit.delay_between_requests, 1.5);
    assert_eq!(settings.cleaning.word_length, 3);
    assert!(settings.cleaning.author_filter_trigger);
    assert_eq!(settings.cleaning.author_filter.len(), 2);
}

/// The author denylist may be omitted entirely; the other cleaning keys are
/// required.
#[test]
fn author_filter_defaults_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(
        &path,
        &FULL_CONFIG.replace("  author_filter:\n    - \"[deleted]\"\n    - \"AutoModerator\"\n", ""),
    );

    let settings = Settings::load(&path).unwrap();
    assert!(settings.cleaning.author_filter.is_empty());
}

#[test]
fn missing_key_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, &FULL_CONFIG.replace("  word_length: 3\n", ""));

    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, HarvestError::ConfigMissing(_)));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, HarvestError::NotFound(_)));
}
