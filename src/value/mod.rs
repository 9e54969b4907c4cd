//! Immutable multilingual strings
//!
//! A [`MultilingualValue`] is a table from [`Locale`] to translated text.
//!
//! # Invariants
//!
//! 1. Every entry has a locale and a text; the text may be empty.
//! 2. Instances never change after construction. Edits return new instances
//!    and share the unchanged snapshot where possible.
//! 3. Equality and hashing depend on the entries only, not on their order.
//! 4. Iteration follows first-insertion order.

mod builder;

use std::collections::HashMap;
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::sync::{
    Arc,
    LazyLock,
};

use serde::de::{
    self,
    MapAccess,
    Visitor,
};
use serde::ser::SerializeMap;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

pub use builder::Builder;

use crate::error::FieldError;
use crate::locale::Locale;

/// Token returned by [`MultilingualValue::render_for`] for missing translations
pub const MISSING_TRANSLATION: &str = "null";

/// The canonical empty value
static EMPTY: LazyLock<MultilingualValue> =
    LazyLock::new(|| MultilingualValue { entries: Arc::from(Vec::new()) });

/// An immutable multilingual string.
///
/// # Examples
/// ```
/// use translation_text_field::{Locale, MultilingualValue};
///
/// let en = Locale::parse("en").unwrap();
/// let fi = Locale::parse("fi").unwrap();
///
/// let value = MultilingualValue::empty().set(en.clone(), "hi").set(fi.clone(), "moi").unset(&en);
///
/// assert_eq!(value, MultilingualValue::of(fi, "moi"));
/// assert_eq!(value.render_for(&en), "null");
/// ```
#[derive(Clone)]
pub struct MultilingualValue {
    /// Snapshot of the pairs, one per locale
    entries: Arc<[(Locale, String)]>,
}

impl MultilingualValue {
    /// The canonical empty value
    #[must_use]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// A value with exactly one translation
    #[must_use]
    pub fn of(locale: Locale, text: impl Into<String>) -> Self {
        Self { entries: Arc::from(vec![(locale, text.into())]) }
    }

    /// Nullable form of [`MultilingualValue::of`]
    pub fn try_of(locale: Option<Locale>, text: Option<String>) -> Result<Self, FieldError> {
        let locale = locale.ok_or_else(|| FieldError::null_argument("locale"))?;
        let text = text.ok_or_else(|| FieldError::null_argument("text"))?;
        Ok(Self::of(locale, text))
    }

    /// A value holding a copy of every pair in `map`
    #[must_use]
    pub fn of_map<S: Into<String>>(map: impl IntoIterator<Item = (Locale, S)>) -> Self {
        Self::with_map(map).create()
    }

    /// Nullable form of [`MultilingualValue::of_map`].
    ///
    /// A pair with a missing text is reported by its locale, a pair with a
    /// missing locale by its text.
    pub fn try_of_map(
        map: impl IntoIterator<Item = (Option<Locale>, Option<String>)>,
    ) -> Result<Self, FieldError> {
        let mut entries = Vec::new();
        for (locale, text) in map {
            match (locale, text) {
                (Some(locale), Some(text)) => builder::put(&mut entries, locale, text),
                (None, text) => {
                    return Err(FieldError::NullArgument(format!(
                        "Map contained a null key, which is not allowed. Its value was: {}",
                        text.as_deref().unwrap_or(MISSING_TRANSLATION)
                    )));
                }
                (Some(locale), None) => {
                    return Err(FieldError::NullArgument(format!(
                        "Map contained a null value, which is not allowed. Its key was: {locale}"
                    )));
                }
            }
        }
        Ok(Self::from_entries(entries))
    }

    /// A builder seeded with one pair
    pub fn with(locale: Locale, text: impl Into<String>) -> Builder {
        Builder::new().and(locale, text)
    }

    /// A builder seeded with every pair in `map`
    pub fn with_map<S: Into<String>>(map: impl IntoIterator<Item = (Locale, S)>) -> Builder {
        Builder::new().and_map(map)
    }

    /// Wraps pairs that are already unique per locale
    fn from_entries(entries: Vec<(Locale, String)>) -> Self {
        if entries.is_empty() { Self::empty() } else { Self { entries: Arc::from(entries) } }
    }

    /// A copy of this value with `locale` set to `text`
    #[must_use]
    pub fn set(&self, locale: Locale, text: impl Into<String>) -> Self {
        let mut entries = self.entries.to_vec();
        builder::put(&mut entries, locale, text.into());
        Self::from_entries(entries)
    }

    /// A copy of this value without `locale`
    #[must_use]
    pub fn unset(&self, locale: &Locale) -> Self {
        if !self.has(locale) {
            return self.clone();
        }
        let entries = self.entries.iter().filter(|(existing, _)| existing != locale).cloned().collect();
        Self::from_entries(entries)
    }

    /// The text for `locale`, if any
    #[must_use]
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.entries.iter().find(|(existing, _)| existing == locale).map(|(_, text)| text.as_str())
    }

    /// The text for `locale`, or the literal `"null"` when there is none.
    ///
    /// Renderers depend on the `"null"` token; use [`MultilingualValue::get`]
    /// to tell a missing translation apart from that literal text.
    #[must_use]
    pub fn render_for(&self, locale: &Locale) -> String {
        self.get(locale).unwrap_or(MISSING_TRANSLATION).to_string()
    }

    /// Whether a translation exists for `locale`
    #[must_use]
    pub fn has(&self, locale: &Locale) -> bool {
        self.get(locale).is_some()
    }

    /// The locales in iteration order
    #[must_use]
    pub fn locales(&self) -> impl ExactSizeIterator<Item = &Locale> + '_ {
        self.entries.iter().map(|(locale, _)| locale)
    }

    /// The pairs in iteration order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }

    /// A read-only map view of the pairs
    #[must_use]
    pub fn as_map(&self) -> HashMap<&Locale, &str> {
        self.iter().collect()
    }

    /// Number of translations
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no translations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over the pairs of a [`MultilingualValue`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Position in the snapshot
    inner: std::slice::Iter<'a, (Locale, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Locale, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(locale, text)| (locale, text.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a MultilingualValue {
    type Item = (&'a Locale, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Default for MultilingualValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for MultilingualValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
            || (self.size() == other.size()
                && self.iter().all(|(locale, text)| other.get(locale) == Some(text)))
    }
}

impl Eq for MultilingualValue {}

impl Hash for MultilingualValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable_by_key(|(locale, _)| *locale);
        sorted.hash(state);
    }
}

impl fmt::Display for MultilingualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (locale, text)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{locale}={text}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for MultilingualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter().map(|(locale, text)| (locale.tag(), text))).finish()
    }
}

impl<S: Into<String>> FromIterator<(Locale, S)> for MultilingualValue {
    fn from_iter<I: IntoIterator<Item = (Locale, S)>>(iter: I) -> Self {
        Self::of_map(iter)
    }
}

impl Serialize for MultilingualValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.size()))?;
        for (locale, text) in self {
            map.serialize_entry(locale, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MultilingualValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MultilingualValueVisitor)
    }
}

/// Reads a `{ "<tag>": "<text>" }` object in document order
struct MultilingualValueVisitor;

impl<'de> Visitor<'de> for MultilingualValueVisitor {
    type Value = MultilingualValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from locale tags to text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((locale, text)) = access.next_entry::<Locale, Option<String>>()? {
            pairs.push((Some(locale), text));
        }
        MultilingualValue::try_of_map(pairs).map_err(de::Error::custom)
    }
}
