use std::collections::HashSet;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::field::Immediateness;
use crate::locale::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file {}: {source}", path.display())]
    IoError { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse configuration file {}: {source}", path.display())]
    ParseError { path: PathBuf, source: serde_json::Error },
}

/// Numbered list of validation errors, one per line
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSettings {
    /// Locale order for display and for filing plain strings.
    ///
    /// - `[]`: keep the registry's current order (default)
    /// - `["fi", "en"]`: `fi` becomes the preview locale
    pub locales: Vec<String>,

    /// Immediateness of fields built from these settings.
    pub immediate: Immediateness,

    pub read_only: bool,
}

impl FieldSettings {
    /// # Errors
    /// - Unparsable locale tag
    /// - The same locale listed twice
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, tag) in self.locales.iter().enumerate() {
            match Locale::parse(tag) {
                Ok(locale) => {
                    if !seen.insert(locale.clone()) {
                        errors.push(ValidationError::new(
                            format!("locales[{index}]"),
                            format!("Locale '{locale}' is listed more than once"),
                        ));
                    }
                }
                Err(e) => {
                    errors.push(ValidationError::new(
                        format!("locales[{index}]"),
                        format!("{e}. Example: \"en\" or \"fi-FI\""),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The configured locale order; tags that fail to parse are skipped
    #[must_use]
    pub fn locale_order(&self) -> Vec<Locale> {
        self.locales.iter().filter_map(|tag| Locale::parse(tag).ok()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = FieldSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"immediate": "perEntry"}"#;

        let settings: FieldSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.immediate, eq(Immediateness::PerEntry));
        assert_that!(settings.locales, is_empty());
        assert_that!(settings.read_only, eq(false));
    }

    #[rstest]
    fn deserialize_full_settings() {
        let json = r#"{"locales": ["fi", "en_GB"], "immediate": "normal", "readOnly": true}"#;

        let settings: FieldSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.locales, elements_are![eq("fi"), eq("en_GB")]);
        assert_that!(settings.immediate, eq(Immediateness::Normal));
        assert_that!(settings.read_only, eq(true));
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_rejects_unknown_immediateness() {
        let result = serde_json::from_str::<FieldSettings>(r#"{"immediate": "always"}"#);

        assert_that!(result, err(anything()));
    }

    #[rstest]
    fn locale_order_parses_tags() {
        let settings = FieldSettings {
            locales: vec!["fi_FI".to_string(), "en".to_string()],
            ..FieldSettings::default()
        };

        let order: Vec<String> = settings.locale_order().iter().map(ToString::to_string).collect();

        assert_that!(order, elements_are![eq("fi-FI"), eq("en")]);
    }

    #[rstest]
    fn validate_invalid_locale() {
        let settings = FieldSettings {
            locales: vec!["en".to_string(), "not a locale".to_string()],
            ..FieldSettings::default()
        };

        let errors = settings.validate().unwrap_err();

        assert_that!(
            errors,
            elements_are![all![
                field!(ValidationError.field_path, eq("locales[1]")),
                field!(ValidationError.message, contains_substring("Invalid locale tag"))
            ]]
        );
    }

    #[rstest]
    fn validate_duplicate_locale() {
        let settings = FieldSettings {
            locales: vec!["en-US".to_string(), "en_us".to_string()],
            ..FieldSettings::default()
        };

        let errors = settings.validate().unwrap_err();

        assert_that!(
            errors,
            elements_are![all![
                field!(ValidationError.field_path, eq("locales[1]")),
                field!(ValidationError.message, contains_substring("more than once"))
            ]]
        );
    }

    #[rstest]
    fn multiple_errors_are_numbered() {
        let settings = FieldSettings {
            locales: vec!["?".to_string(), "fi".to_string(), "FI".to_string()],
            ..FieldSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = ConfigError::ValidationErrors(errors).to_string();

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. locales[0]"));
        assert_that!(error_message, contains_substring("2. locales[2]"));
    }
}
