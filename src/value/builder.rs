//! Accumulator for multilingual values

use crate::error::FieldError;
use crate::locale::Locale;

use super::MultilingualValue;

/// Collects locale/text pairs and materializes them into a [`MultilingualValue`].
///
/// Created through [`MultilingualValue::with`] and [`MultilingualValue::with_map`].
/// [`Builder::create`] consumes the builder, so it cannot be reused afterwards:
///
/// ```compile_fail
/// use translation_text_field::{Locale, MultilingualValue};
///
/// let en = Locale::parse("en").unwrap();
/// let builder = MultilingualValue::with(en, "a");
/// let first = builder.create();
/// let second = builder.create();
/// ```
///
/// Clone the builder first to take more than one snapshot.
#[derive(Debug, Clone)]
#[must_use]
pub struct Builder {
    /// Pairs in first-insertion order, one per locale
    entries: Vec<(Locale, String)>,
}

impl Builder {
    /// Empty builder
    pub(super) const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds a locale/text pair, overwriting any earlier text for the locale
    pub fn and(mut self, locale: Locale, text: impl Into<String>) -> Self {
        put(&mut self.entries, locale, text.into());
        self
    }

    /// Adds every pair of `map`, last write wins
    pub fn and_map<S: Into<String>>(mut self, map: impl IntoIterator<Item = (Locale, S)>) -> Self {
        for (locale, text) in map {
            put(&mut self.entries, locale, text.into());
        }
        self
    }

    /// Nullable form of [`Builder::and`]
    pub fn try_and(self, locale: Option<Locale>, text: Option<String>) -> Result<Self, FieldError> {
        let locale = locale.ok_or_else(|| FieldError::null_argument("locale"))?;
        let text = text.ok_or_else(|| FieldError::null_argument("text"))?;
        Ok(self.and(locale, text))
    }

    /// Materializes the collected pairs
    #[must_use]
    pub fn create(self) -> MultilingualValue {
        MultilingualValue::from_entries(self.entries)
    }
}

/// Overwrites the text of `locale` in place or appends a new pair
pub(super) fn put(entries: &mut Vec<(Locale, String)>, locale: Locale, text: String) {
    if let Some(entry) = entries.iter_mut().find(|(existing, _)| *existing == locale) {
        entry.1 = text;
    } else {
        entries.push((locale, text));
    }
}
