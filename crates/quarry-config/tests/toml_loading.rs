//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use figment::Jail;
use pretty_assertions::assert_eq;
use quarry_config::{ConfigError, DEFAULT_NULL_MARKERS, QuarryConfig};

#[test]
fn loads_all_sections_from_local_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "quarry.toml",
            r#"
[store]
url = "libsql://survey.example.io"
auth_token = "secret"
database = "poll_2018"

[source]
path = "data/sample.csv"
delimiter = ";"
null_markers = ["NA", "N/A"]

[pipeline]
exchange_rate = 4.2
batch_size = 50
"#,
        )?;

        let config = QuarryConfig::load(None).expect("config loads");
        assert_eq!(config.store.url, "libsql://survey.example.io");
        assert_eq!(config.store.auth_token, "secret");
        assert_eq!(config.store.database, "poll_2018");
        assert_eq!(config.source.path, "data/sample.csv");
        assert_eq!(config.source.delimiter, ";");
        assert_eq!(config.source.null_markers, vec!["NA", "N/A"]);
        assert!((config.pipeline.exchange_rate - 4.2).abs() < f64::EPSILON);
        assert_eq!(config.pipeline.batch_size, 50);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("quarry.toml", "[pipeline]\nbatch_size = 10\n")?;

        let config = QuarryConfig::load(None).expect("config loads");
        assert_eq!(config.pipeline.batch_size, 10);
        assert!((config.pipeline.exchange_rate - 5.6).abs() < f64::EPSILON);
        assert_eq!(config.store.database, "stackoverflow_poll");
        assert_eq!(config.source.null_markers, DEFAULT_NULL_MARKERS);
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file("quarry.toml", "[store]\ndatabase = \"local\"\n")?;
        jail.create_file("override.toml", "[store]\ndatabase = \"explicit\"\n")?;

        let config =
            QuarryConfig::load(Some(std::path::Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.store.database, "explicit");
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = QuarryConfig::load(Some(std::path::Path::new("nope.toml")));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("quarry.toml", "[store]\ndatabase = \"from_toml\"\n")?;
        jail.set_env("QUARRY_STORE__DATABASE", "from_env");
        jail.set_env("QUARRY_PIPELINE__BATCH_SIZE", "7");

        let config = QuarryConfig::load(None).expect("config loads");
        assert_eq!(config.store.database, "from_env");
        assert_eq!(config.pipeline.batch_size, 7);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected_after_merge() {
    Jail::expect_with(|jail| {
        jail.set_env("QUARRY_PIPELINE__BATCH_SIZE", "0");

        match QuarryConfig::load(None) {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "pipeline.batch_size");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
        Ok(())
    });
}

#[test]
fn remote_store_without_token_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("QUARRY_STORE__URL", "libsql://survey.example.io");

        let result = QuarryConfig::load(None);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
