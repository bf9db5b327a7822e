/*!
 * Tests for language code utilities
 */

use sitelingo::language_utils::{
    get_language_name, get_native_name, language_codes_match, primary_subtag, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withSupportedCodes_shouldSucceed() {
    for code in ["ko", "en", "ja", "zh", "vi", "th"] {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
    assert!(validate_language_code(" EN ").is_ok());
}

#[test]
fn test_validateLanguageCode_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("eng").is_err());
    assert!(validate_language_code("en-US").is_err());
}

#[test]
fn test_primarySubtag_withBrowserTag_shouldReturnLanguage() {
    assert_eq!(primary_subtag("en-US"), Some("en".to_string()));
    assert_eq!(primary_subtag("zh-Hant-TW"), Some("zh".to_string()));
    assert_eq!(primary_subtag("JA"), Some("ja".to_string()));
}

#[test]
fn test_primarySubtag_withPosixLocale_shouldReturnLanguage() {
    assert_eq!(primary_subtag("ko_KR.UTF-8"), Some("ko".to_string()));
    assert_eq!(primary_subtag("vi@latin"), Some("vi".to_string()));
}

#[test]
fn test_primarySubtag_withEmptyOrCLocale_shouldReturnNone() {
    assert_eq!(primary_subtag(""), None);
    assert_eq!(primary_subtag("  "), None);
    assert_eq!(primary_subtag("C"), None);
    assert_eq!(primary_subtag("C.UTF-8"), None);
    assert_eq!(primary_subtag("POSIX"), None);
}

#[test]
fn test_languageCodesMatch_withSameLanguage_shouldBeTrue() {
    assert!(language_codes_match("en", "en-GB"));
    assert!(language_codes_match("th_TH", "th"));
    assert!(!language_codes_match("en", "ja"));
    assert!(!language_codes_match("", ""));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("ko").unwrap(), "Korean");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert!(get_language_name("xx").is_err());
}

#[test]
fn test_getNativeName_withKnownCode_shouldReturnName() {
    assert!(!get_native_name("ko").unwrap().is_empty());
    assert!(get_native_name("xx").is_err());
}
