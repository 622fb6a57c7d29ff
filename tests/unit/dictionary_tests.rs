/*!
 * Tests for dictionary file loading
 */

use anyhow::Result;
use xml_translator::dictionary::TranslationMap;
use xml_translator::errors::DictionaryError;
use crate::common;

/// Test the basic loading scenario
#[test]
fn test_load_withRussianSelected_shouldReturnTitleMapping() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "dict.json",
        r#"{"RU": {"Title": {"Hello": "Привет"}}}"#,
    )?;

    let map = TranslationMap::load(&path, "RU", "Title")?;

    let expected: TranslationMap = [("Hello", "Привет")].into_iter().collect();
    assert_eq!(map, expected);
    Ok(())
}

/// Test lenient lookup of an absent language
#[test]
fn test_load_withAbsentLanguage_shouldReturnEmptyMap() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "dict.json",
        r#"{"RU": {"Title": {"Hello": "Привет"}}}"#,
    )?;

    let map = TranslationMap::load(&path, "EN", "Title")?;

    assert!(map.is_empty());
    Ok(())
}

/// Test that a custom section name is honoured
#[test]
fn test_load_withCustomSection_shouldReadThatSection() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_dictionary(temp_dir.path())?;

    let map = TranslationMap::load(&path, "EN", "Other")?;

    assert_eq!(map.get("Hello"), Some("Hi"));
    Ok(())
}

/// Test that a missing file is an I/O error
#[test]
fn test_load_withMissingFile_shouldFailWithIoError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = TranslationMap::load(temp_dir.path().join("missing.json"), "RU", "Title");

    assert!(matches!(result, Err(DictionaryError::Io { .. })));
    Ok(())
}
