use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for page language codes
///
/// This module provides functions for validating ISO 639-1 (2-letter) codes,
/// looking up language names, and reducing browser/system locales to the
/// primary language subtag used for language selection.

/// Validate that a code is a known ISO 639-1 (2-letter) language code
pub fn validate_language_code(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Reduce a locale string to its primary language subtag
///
/// Accepts browser tags (`en-US`), POSIX locales (`en_US.UTF-8`) and
/// bare codes. Returns `None` for empty input and the `C`/`POSIX` locales.
pub fn primary_subtag(locale: &str) -> Option<String> {
    let primary = locale
        .trim()
        .split(['-', '_', '.', '@'])
        .next()?
        .to_lowercase();

    if primary.is_empty() || primary == "c" || primary == "posix" {
        return None;
    }

    Some(primary)
}

/// Check if two language codes or locales share the same primary language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (primary_subtag(code1), primary_subtag(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = validate_language_code(code)?;
    Ok(lang.to_name().to_string())
}

/// Get the language name in the language itself, falling back to the English name
pub fn get_native_name(code: &str) -> Result<String> {
    let lang = validate_language_code(code)?;
    Ok(lang.to_autonym().unwrap_or_else(|| lang.to_name()).to_string())
}
