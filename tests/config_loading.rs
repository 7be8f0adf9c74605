//! Loading configuration files and wiring them into the pipeline.

use std::fs;

use tempfile::TempDir;

use ocr_aggregate::config::{Config, ConfigError};
use ocr_aggregate::models::{BoundingBox, Language, TextRegion};

#[tokio::test]
async fn toml_file_configures_the_aggregator() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ocr-aggregate.toml");
    fs::write(
        &path,
        r###"
[aggregation]
page_marker = "## Page {page}"
same_line_tolerance = 2.0

[quality]
confidence_threshold = 0.5

[batch]
workers = 2
"###,
    )
    .unwrap();

    let config = Config::load_from_path(&path).await.unwrap();
    assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    assert_eq!(config.batch.workers, 2);
    assert!(config.validate().is_ok());

    // Same-line tolerance of 2px keeps these on separate lines
    let pages = vec![vec![
        TextRegion::new("droite", BoundingBox::new(300.0, 5.0, 50.0, 10.0), 0.6, Language::Fr),
        TextRegion::new("gauche", BoundingBox::new(10.0, 9.0, 50.0, 10.0), 0.6, Language::Fr),
    ]];
    let result = config.aggregator().aggregate(&pages);
    assert_eq!(result.aggregated_text(), "## Page 1\ndroite gauche");
    assert!(!result
        .recommendations
        .iter()
        .any(|r| r.contains("OCR confidence")));
}

#[tokio::test]
async fn yaml_and_json_files_are_accepted() {
    let dir = TempDir::new().unwrap();

    let yaml = dir.path().join("settings.yaml");
    fs::write(&yaml, "aggregation:\n  mixed_ratio_threshold: 0.5\n").unwrap();
    let config = Config::load_from_path(&yaml).await.unwrap();
    assert_eq!(config.aggregation.mixed_ratio_threshold, 0.5);

    let json = dir.path().join("settings.json");
    fs::write(&json, r#"{"quality": {"mixed_pages_ratio": 0.25}}"#).unwrap();
    let config = Config::load_from_path(&json).await.unwrap();
    assert_eq!(config.quality.mixed_pages_ratio, 0.25);
}

#[tokio::test]
async fn explicit_invalid_file_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[batch]\nworkers = 0\n").unwrap();

    let err = Config::load(Some(path.as_path())).await.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_path(&dir.path().join("absent.toml"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[tokio::test]
async fn page_marker_without_placeholder_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ocr-aggregate.toml");
    fs::write(&path, "[aggregation]\npage_marker = \"--- PAGE ---\"\n").unwrap();

    let err = Config::load(Some(path.as_path())).await.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    assert!(err.to_string().contains("page_marker"));
}
