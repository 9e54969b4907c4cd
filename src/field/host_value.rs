//! Values offered to a field by the host application

use std::borrow::Cow;

use serde_json::Value;

use crate::error::FieldError;
use crate::locale::Locale;
use crate::value::MultilingualValue;

/// A value offered to [`TranslationField::set_value`](super::TranslationField::set_value).
///
/// `Text` and `Chars` are the string-like kinds. `Integer`, `Float` and
/// `Boolean` exist so hosts can hand over whatever their data source holds;
/// the field rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// Clears the field
    Null,
    /// Stored as-is
    Multilingual(MultilingualValue),
    /// A character sequence
    Text(String),
    /// An array of characters, joined in order
    Chars(Vec<char>),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl HostValue {
    /// Human readable name of the kind, used in error messages
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Multilingual(_) => "multilingual value",
            Self::Text(_) => "text",
            Self::Chars(_) => "character array",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Whether the value is text or a character array
    #[must_use]
    pub const fn is_string_like(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Chars(_))
    }

    /// Coerces the value into what a field stores.
    ///
    /// String-like values are filed under `preview_locale`, which is only
    /// consulted for them.
    pub fn coerce(
        self,
        preview_locale: impl FnOnce() -> Result<Locale, FieldError>,
    ) -> Result<Option<MultilingualValue>, FieldError> {
        match self {
            Self::Null => Ok(None),
            Self::Multilingual(value) => Ok(Some(value)),
            Self::Text(text) => Ok(Some(MultilingualValue::of(preview_locale()?, text))),
            Self::Chars(chars) => {
                Ok(Some(MultilingualValue::of(preview_locale()?, chars.into_iter().collect::<String>())))
            }
            other => Err(FieldError::Conversion(format!(
                "Value must be either a MultilingualValue or string-like (text or character array), got {}",
                other.kind()
            ))),
        }
    }

    /// Reads a host value from JSON.
    ///
    /// Objects become multilingual values (`{"en": "Hello"}`), arrays of
    /// one-character strings become character arrays.
    pub fn from_json(json: Value) -> Result<Self, FieldError> {
        match json {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Boolean(b)),
            Value::Number(n) => {
                Ok(n.as_i64().map_or_else(|| Self::Float(n.as_f64().unwrap_or_default()), Self::Integer))
            }
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| single_char(&item))
                .collect::<Option<Vec<char>>>()
                .map(Self::Chars)
                .ok_or_else(|| {
                    FieldError::Conversion(
                        "Arrays must hold single-character strings to count as a character array"
                            .to_string(),
                    )
                }),
            object @ Value::Object(_) => serde_json::from_value(object)
                .map(Self::Multilingual)
                .map_err(|e| FieldError::Conversion(format!("Invalid multilingual object: {e}"))),
        }
    }
}

/// The character of a one-character JSON string
fn single_char(item: &Value) -> Option<char> {
    let mut chars = item.as_str()?.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

impl From<MultilingualValue> for HostValue {
    fn from(value: MultilingualValue) -> Self {
        Self::Multilingual(value)
    }
}

impl From<Option<MultilingualValue>> for HostValue {
    fn from(value: Option<MultilingualValue>) -> Self {
        value.map_or(Self::Null, Self::Multilingual)
    }
}

impl From<&str> for HostValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for HostValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Cow<'_, str>> for HostValue {
    fn from(text: Cow<'_, str>) -> Self {
        Self::Text(text.into_owned())
    }
}

impl From<char> for HostValue {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

impl From<Vec<char>> for HostValue {
    fn from(chars: Vec<char>) -> Self {
        Self::Chars(chars)
    }
}

impl From<&[char]> for HostValue {
    fn from(chars: &[char]) -> Self {
        Self::Chars(chars.to_vec())
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for HostValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}
