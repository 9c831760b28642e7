//! Configuration loading with environment overrides.

mod support;

use std::path::PathBuf;

use insight_hub::config::{ConfigError, HubConfig};
use insight_hub::services::AnalyticsContext;
use insight_hub::source::{SourceFactory, SourceType};
use support::with_scoped_env;

const ENV_KEYS: [&str; 4] = ["INSIGHT_HUB_SOURCE", "INSIGHT_HUB_DATA_DIR", "HOST", "PORT"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    ENV_KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn env_overrides_file_values() {
    let config = HubConfig::from_toml_str(
        r#"
        [source]
        type = "local"
        data_dir = "from-file"

        [server]
        port = 9000
        "#,
    )
    .unwrap();

    let mut env = cleared();
    env.extend([
        ("INSIGHT_HUB_SOURCE", Some("json")),
        ("INSIGHT_HUB_DATA_DIR", Some("/srv/exports")),
        ("PORT", Some("7070")),
    ]);
    let config = with_scoped_env(&env, || config.with_env_overrides()).unwrap();

    assert_eq!(config.source_type().unwrap(), SourceType::Json);
    assert_eq!(config.source.data_dir, PathBuf::from("/srv/exports"));
    assert_eq!(config.server.bind_address(), "0.0.0.0:7070");
}

#[test]
fn invalid_env_values_are_rejected() {
    let mut env = cleared();
    env.push(("PORT", Some("eighty")));
    let result = with_scoped_env(&env, || HubConfig::default().with_env_overrides());
    assert!(matches!(result, Err(ConfigError::Invalid(_))));

    let mut env = cleared();
    env.push(("INSIGHT_HUB_SOURCE", Some("postgres")));
    let result = with_scoped_env(&env, || HubConfig::default().with_env_overrides());
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn configured_locations_replace_the_builtin_catalog() {
    let config = HubConfig::from_toml_str(
        r#"
        [[locations]]
        id = "juhu"
        name = "Juhu"
        full_name = "Juhu Studio, Mumbai"
        aliases = ["juhu"]

        [trends]
        strong_pct = 25.0
        "#,
    )
    .unwrap();

    let context = AnalyticsContext::from_config(&config);
    assert_eq!(context.catalog.buckets().len(), 1);
    assert!(context.catalog.get("kwality").is_none());
    assert_eq!(context.thresholds.strong_pct, 25.0);
}

#[test]
fn factory_builds_the_configured_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = HubConfig::default();
    assert!(SourceFactory::from_config(&config).is_ok());

    config.source.source_type = "json".to_string();
    config.source.data_dir = dir.path().to_path_buf();
    assert!(SourceFactory::from_config(&config).is_ok());
}
