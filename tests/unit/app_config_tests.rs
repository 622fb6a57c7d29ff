/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use xml_translator::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.languages, vec!["RU".to_string(), "EN".to_string()]);
    assert_eq!(config.default_language(), Some("RU"));
    assert_eq!(config.dictionary_section, "Title");
    assert!(config.substitution.trim_text);
    assert!(!config.substitution.trim_attributes);
    assert_eq!(config.output.default_extension, "xml");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.languages.clear();
    assert!(config.validate().is_err());

    config.languages = vec!["RU".to_string(), "RU".to_string()];
    assert!(config.validate().is_err());

    config.languages = vec!["RU".to_string(), "  ".to_string()];
    assert!(config.validate().is_err());

    config.languages = vec!["DE".to_string()];
    assert!(config.validate().is_ok());

    config.dictionary_section = String::new();
    assert!(config.validate().is_err());
    config.dictionary_section = "Title".to_string();

    config.output.default_extension = " ".to_string();
    assert!(config.validate().is_err());
}

/// Test that codes differing only in case are rejected as duplicates
#[test]
fn test_validate_withCaseOnlyDuplicateLanguages_shouldFail() {
    let mut config = Config::default();

    config.languages = vec!["RU".to_string(), "ru".to_string()];
    assert!(config.validate().is_err());

    config.languages = vec!["EN".to_string(), " en ".to_string()];
    assert!(config.validate().is_err());
}

/// Test that a missing config file falls back to defaults without creating it
#[test]
fn test_loadOrDefault_withMissingFile_shouldReturnDefaultsAndNotWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config, Config::default());
    assert!(!path.exists());
    Ok(())
}

/// Test that partial config files are completed with defaults
#[test]
fn test_loadOrDefault_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "languages": ["EN", "DE"], "substitution": { "trim_attributes": true }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.default_language(), Some("EN"));
    assert_eq!(config.dictionary_section, "Title");
    assert!(config.substitution.trim_text);
    assert!(config.substitution.trim_attributes);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that malformed config files are rejected
#[test]
fn test_loadOrDefault_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ languages: ")?;

    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

/// Test log level conversion to the log facade
#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
