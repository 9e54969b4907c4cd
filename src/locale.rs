//! Locale identifiers with a canonical, round-trippable tag

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Tag used when the platform locale cannot be determined
const FALLBACK_TAG: &str = "en";

/// Errors from parsing a locale tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Invalid locale tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },
}

impl LocaleError {
    /// Builds an `InvalidTag` error
    fn invalid(tag: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTag { tag: tag.to_string(), reason: reason.into() }
    }
}

/// A locale identifier.
///
/// The tag is held in canonical form: lowercase language, titlecase script,
/// uppercase region and lowercase variants joined with `-` (e.g. `en`,
/// `en-US`, `zh-Hant-TW`). Two locales are equal iff their tags are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Canonical tag
    tag: Arc<str>,
}

impl Locale {
    /// Parses a locale tag.
    ///
    /// Accepts `-` or `_` as separators and any letter case. POSIX suffixes
    /// such as `.UTF-8` or `@euro` are ignored.
    ///
    /// # Examples
    /// ```
    /// use translation_text_field::Locale;
    ///
    /// let locale = Locale::parse("en_us.UTF-8").unwrap();
    /// assert_eq!(locale.tag(), "en-US");
    /// ```
    pub fn parse(input: &str) -> Result<Self, LocaleError> {
        let stripped = input.trim().split(['.', '@']).next().unwrap_or_default();
        if stripped.is_empty() {
            return Err(LocaleError::invalid(input, "empty tag"));
        }

        let mut subtags = stripped.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LocaleError::invalid(input, "language must be 2-8 letters"));
        }

        let mut parts = vec![language.to_ascii_lowercase()];
        let mut stage = Stage::Language;
        for subtag in subtags {
            let (next, canonical) = classify(subtag, stage)
                .ok_or_else(|| LocaleError::invalid(input, format!("unexpected subtag '{subtag}'")))?;
            stage = next;
            parts.push(canonical);
        }

        Ok(Self { tag: Arc::from(parts.join("-")) })
    }

    /// The platform locale, or `en` if it cannot be determined.
    ///
    /// The POSIX `C` and `POSIX` locales name no language and count as
    /// undetermined.
    #[must_use]
    pub fn platform_default() -> Self {
        Self::from_platform(sys_locale::get_locale().as_deref())
    }

    /// Locale for a platform-reported name
    fn from_platform(detected: Option<&str>) -> Self {
        let name = detected.filter(|name| !is_posix_default(name));
        match name.map(Self::parse) {
            Some(Ok(locale)) => locale,
            Some(Err(e)) => {
                tracing::debug!("Ignoring unparsable platform locale: {e}");
                Self::fallback()
            }
            None => {
                tracing::debug!("Platform locale unavailable, using '{FALLBACK_TAG}'");
                Self::fallback()
            }
        }
    }

    /// The fallback locale
    fn fallback() -> Self {
        Self { tag: Arc::from(FALLBACK_TAG) }
    }

    /// The canonical tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The language subtag (e.g. `en`)
    #[must_use]
    pub fn language(&self) -> &str {
        self.tag.split('-').next().unwrap_or_default()
    }

    /// The script subtag, if any (e.g. `Hant`)
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.tag
            .split('-')
            .skip(1)
            .find(|s| s.len() == 4 && s.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
    }

    /// The region subtag, if any (e.g. `US`, `419`)
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.tag.split('-').skip(1).find(|s| is_region(s) && s.chars().all(|c| !c.is_ascii_lowercase()))
    }
}

/// Whether `name` is the POSIX `C` / `POSIX` locale, with or without a codeset
fn is_posix_default(name: &str) -> bool {
    let base = name.trim().split(['.', '@']).next().unwrap_or_default();
    base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX")
}

/// Position reached while reading subtags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    /// Only the language has been read
    Language,
    /// A script subtag has been read
    Script,
    /// A region subtag has been read
    Region,
    /// At least one variant has been read
    Variant,
}

/// Classifies a subtag following `stage`, returning the new stage and the canonical spelling
fn classify(subtag: &str, stage: Stage) -> Option<(Stage, String)> {
    let len = subtag.len();
    let alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());

    if stage < Stage::Script && len == 4 && alpha {
        let mut chars = subtag.chars();
        let first = chars.next()?.to_ascii_uppercase();
        let rest = chars.as_str().to_ascii_lowercase();
        return Some((Stage::Script, format!("{first}{rest}")));
    }
    if stage < Stage::Region && is_region(subtag) {
        return Some((Stage::Region, subtag.to_ascii_uppercase()));
    }
    if (4..=8).contains(&len) && subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some((Stage::Variant, subtag.to_ascii_lowercase()));
    }
    None
}

/// Two letters or three digits
fn is_region(subtag: &str) -> bool {
    (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
        || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::language("en", "en")]
    #[case::uppercase_language("EN", "en")]
    #[case::region("en-US", "en-US")]
    #[case::underscore("en_US", "en-US")]
    #[case::lowercase_region("en-us", "en-US")]
    #[case::numeric_region("es-419", "es-419")]
    #[case::script("zh-hant-tw", "zh-Hant-TW")]
    #[case::variant("de-DE-1996", "de-DE-1996")]
    #[case::posix_encoding("fi_FI.UTF-8", "fi-FI")]
    #[case::posix_modifier("de_DE@euro", "de-DE")]
    #[case::three_letter_language("kok-IN", "kok-IN")]
    fn parse_canonicalizes(#[case] input: &str, #[case] expected: &str) {
        let locale = Locale::parse(input).unwrap();

        assert_that!(locale.tag(), eq(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_encoding(".UTF-8")]
    #[case::single_letter("e")]
    #[case::digits_language("12")]
    #[case::empty_subtag("en--US")]
    #[case::region_after_variant("en-1996-US")]
    #[case::too_long("en-abcdefghi")]
    fn parse_rejects_invalid_tags(#[case] input: &str) {
        assert_that!(Locale::parse(input), err(anything()));
    }

    #[rstest]
    fn equality_follows_canonical_tag() {
        let a = Locale::parse("en_US").unwrap();
        let b = Locale::parse("en-us").unwrap();

        assert_that!(a, eq(&b));
        assert_that!(a.to_string(), eq("en-US"));
    }

    #[rstest]
    fn tag_round_trips_through_parse() {
        let locale = Locale::parse("sr_latn_rs").unwrap();

        let reparsed = Locale::parse(locale.tag()).unwrap();

        assert_that!(reparsed, eq(&locale));
    }

    #[googletest::test]
    fn accessors_split_components() {
        let locale = Locale::parse("zh-Hant-TW").unwrap();

        expect_that!(locale.language(), eq("zh"));
        expect_that!(locale.script(), some(eq("Hant")));
        expect_that!(locale.region(), some(eq("TW")));

        let plain = Locale::parse("fi").unwrap();
        expect_that!(plain.script(), none());
        expect_that!(plain.region(), none());
    }

    #[rstest]
    #[case::unavailable(None, "en")]
    #[case::c(Some("C"), "en")]
    #[case::c_utf8(Some("C.UTF-8"), "en")]
    #[case::posix(Some("POSIX"), "en")]
    #[case::unparsable(Some("?"), "en")]
    #[case::regional(Some("fi_FI.UTF-8"), "fi-FI")]
    fn platform_name_resolves_to_locale(#[case] detected: Option<&str>, #[case] expected: &str) {
        assert_that!(Locale::from_platform(detected).tag(), eq(expected));
    }

    #[rstest]
    fn error_message_names_tag() {
        let err = Locale::parse("x").unwrap_err();

        assert_that!(err.to_string(), contains_substring("'x'"));
    }

    #[rstest]
    fn serializes_as_tag_string() {
        let locale = Locale::parse("pt_BR").unwrap();

        let json = serde_json::to_string(&locale).unwrap();
        let back: Locale = serde_json::from_str(&json).unwrap();

        assert_that!(json, eq("\"pt-BR\""));
        assert_that!(back, eq(&locale));
    }

    #[rstest]
    fn platform_default_is_parseable() {
        let locale = Locale::platform_default();

        assert_that!(Locale::parse(locale.tag()), ok(eq(&locale)));
    }
}
