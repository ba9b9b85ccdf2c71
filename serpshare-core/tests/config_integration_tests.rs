// serpshare-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use serpshare_core::config::{self, ModelConfig, WeightsConfig};
use serpshare_core::{AttributionError, ValidationError, DEFAULT_LAMBDAS};

#[test]
fn test_load_default() {
    let config = ModelConfig::load_default().unwrap();
    assert_eq!(config.weights.visibility, Some(1.5));
    assert_eq!(config.weights.authority, Some(0.0));
    assert_eq!(config.visibility_decay, Some(0.15));
    assert_eq!(config.resolve().unwrap().weights.lambdas(), DEFAULT_LAMBDAS);
}

#[test]
fn test_load_from_file_partial() -> Result<()> {
    let yaml_content = r#"
weights:
  semantic: 2.0
  estimated_clicks: 0.5
visibility_decay: 0.2
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let user = ModelConfig::load_from_file(file.path())?;
    assert_eq!(user.weights.visibility, None);
    assert_eq!(user.max_features, None);

    let merged = config::merge_config(ModelConfig::load_default()?, Some(user));
    let resolved = merged.resolve()?;
    assert_eq!(resolved.weights.lambdas(), [1.5, 2.0, 0.0, 1.0, 0.5]);
    assert!(resolved.weights.clicks.is_enabled());
    assert_eq!(resolved.alpha, 0.2);
    assert_eq!(resolved.max_features, 1000);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_values() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"visibility_decay: 0\n")?;
    let err = ModelConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("visibility decay"));

    let mut file = NamedTempFile::new()?;
    file.write_all(b"max_features: 0\n")?;
    assert!(ModelConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_load_from_file_rejects_malformed_yaml() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"weights: [1, 2\n")?;
    let err = ModelConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_file() {
    let err = ModelConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_override_layers() {
    let file_layer = ModelConfig {
        weights: WeightsConfig { visibility: Some(3.0), ..Default::default() },
        visibility_decay: Some(0.25),
        max_features: Some(50),
    };
    let flag_layer = ModelConfig {
        weights: WeightsConfig::from_lambdas([2.0, 1.5, 1.0, 1.2, 0.8]),
        ..Default::default()
    };
    let merged = config::merge_config(
        config::merge_config(ModelConfig::load_default().unwrap(), Some(file_layer)),
        Some(flag_layer),
    );
    let resolved = merged.resolve().unwrap();
    assert_eq!(resolved.weights.lambdas(), [2.0, 1.5, 1.0, 1.2, 0.8]);
    assert_eq!(resolved.alpha, 0.25);
    assert_eq!(resolved.max_features, 50);
}

#[test]
fn test_non_finite_weight_is_rejected() {
    let config = ModelConfig {
        weights: WeightsConfig { features: Some(f64::NAN), ..Default::default() },
        ..Default::default()
    };
    assert!(matches!(
        config.resolve(),
        Err(AttributionError::Validation(ValidationError::NonFiniteWeight { feature: "features", .. }))
    ));
}
