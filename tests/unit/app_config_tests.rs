/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use anyhow::Result;
use sitelingo::app_config::{is_configured_credential, Config, LogLevel, PLACEHOLDER_API_KEY};
use crate::common;

#[test]
fn test_default_shouldOfferSixLanguagesWithKoreanSource() {
    let config = Config::default();

    let codes: Vec<&str> = config.supported_languages.keys().map(String::as_str).collect();
    assert_eq!(codes, vec!["en", "ja", "ko", "th", "vi", "zh"]);
    assert_eq!(config.default_language, "ko");
    assert_eq!(config.display_name("ja"), Some("日本語"));
    assert_eq!(config.translation.api_key, PLACEHOLDER_API_KEY);
    assert!(!config.translation.has_credential());
}

#[test]
fn test_isConfiguredCredential_withRealKey_shouldBeTrue() {
    assert!(is_configured_credential("AIzaSyExample"));
    assert!(!is_configured_credential(PLACEHOLDER_API_KEY));
    assert!(!is_configured_credential("YOUR_KEY"));
    assert!(!is_configured_credential(""));
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.default_language, "ko");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.supported_languages, config.supported_languages);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "translation": { "api_key": "abc", "batch_size": 3 }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.translation.api_key, "abc");
    assert_eq!(config.translation.batch_size, 3);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.cache_expiry_ms, 24 * 60 * 60 * 1000);
    assert!(config.translation.has_credential());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_validate_withDefaultOutsideSupported_shouldFail() {
    let mut config = Config::default();
    config.default_language = "fr".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("fr"));
}

#[test]
fn test_validate_withInvalidLanguageCode_shouldFail() {
    let mut config = Config::default();
    config.supported_languages.insert("xx".to_string(), "Nowhere".to_string());

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroBatchSize_shouldFail() {
    let mut config = Config::default();
    config.translation.batch_size = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.translation.endpoint = "not a url".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_resolveStorageDir_withExplicitDir_shouldUseIt() -> Result<()> {
    let mut config = Config::default();
    config.storage_dir = Some(PathBuf::from("/tmp/sitelingo-test"));

    assert_eq!(config.resolve_storage_dir()?, PathBuf::from("/tmp/sitelingo-test"));
    Ok(())
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
