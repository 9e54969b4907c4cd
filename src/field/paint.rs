//! Renderer wire projection
//!
//! A field ships its value as two index-aligned arrays, `strings` and
//! `locales`, plus the `immediate` attribute. `(locales[i], strings[i])` is
//! the i-th translation. The renderer echoes edited arrays back as
//! [`ClientVariables`].

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

use crate::error::FieldError;
use crate::locale::Locale;
use crate::value::MultilingualValue;

use super::Immediateness;

/// Variable holding the translated texts
pub const STRINGS_VARIABLE: &str = "strings";
/// Variable holding the canonical locale tags
pub const LOCALES_VARIABLE: &str = "locales";
/// Attribute holding the [`Immediateness`] ordinal
pub const IMMEDIATE_ATTRIBUTE: &str = "immediate";

/// Sink for the data a field sends to its renderer
pub trait PaintTarget {
    /// Adds a string-array variable
    fn add_variable(&mut self, name: &str, values: &[String]) -> Result<(), FieldError>;

    /// Adds an integer attribute
    fn add_attribute(&mut self, name: &str, value: u8) -> Result<(), FieldError>;
}

/// What a field sends to its renderer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RendererProjection {
    pub strings: Vec<String>,
    pub locales: Vec<String>,
    pub immediate: u8,
}

impl RendererProjection {
    /// Projects `value` (`None` for a cleared field) in its iteration order
    #[must_use]
    pub fn new(value: Option<&MultilingualValue>, immediateness: Immediateness) -> Self {
        let size = value.map_or(0, MultilingualValue::size);
        let mut strings = Vec::with_capacity(size);
        let mut locales = Vec::with_capacity(size);

        for (locale, text) in value.into_iter().flatten() {
            strings.push(text.to_string());
            locales.push(locale.tag().to_string());
        }

        Self { strings, locales, immediate: immediateness.ordinal() }
    }

    /// Writes the projection to `target`
    pub fn paint(&self, target: &mut dyn PaintTarget) -> Result<(), FieldError> {
        target.add_variable(STRINGS_VARIABLE, &self.strings)?;
        target.add_variable(LOCALES_VARIABLE, &self.locales)?;
        target.add_attribute(IMMEDIATE_ATTRIBUTE, self.immediate)
    }
}

/// Arrays echoed back by the renderer after an edit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientVariables {
    pub strings: Vec<String>,
    pub locales: Vec<String>,
}

impl ClientVariables {
    /// Rebuilds the value the arrays describe
    pub fn to_value(&self) -> Result<MultilingualValue, FieldError> {
        if self.strings.len() != self.locales.len() {
            return Err(FieldError::MalformedVariables(format!(
                "{} strings but {} locales",
                self.strings.len(),
                self.locales.len()
            )));
        }

        let pairs = self
            .locales
            .iter()
            .zip(&self.strings)
            .map(|(tag, text)| Locale::parse(tag).map(|locale| (locale, text.as_str())))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FieldError::MalformedVariables(e.to_string()))?;
        Ok(MultilingualValue::of_map(pairs))
    }
}

impl From<&RendererProjection> for ClientVariables {
    fn from(projection: &RendererProjection) -> Self {
        Self { strings: projection.strings.clone(), locales: projection.locales.clone() }
    }
}

/// [`PaintTarget`] that collects everything into JSON
#[derive(Debug, Clone, Default)]
pub struct JsonPaintTarget {
    /// Painted variables by name
    variables: Map<String, Value>,
    /// Painted attributes by name
    attributes: Map<String, Value>,
}

impl JsonPaintTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A painted variable, if any
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// A painted attribute, if any
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// `{"variables": {...}, "attributes": {...}}`
    #[must_use]
    pub fn into_json(self) -> Value {
        let mut root = Map::new();
        root.insert("variables".to_string(), Value::Object(self.variables));
        root.insert("attributes".to_string(), Value::Object(self.attributes));
        Value::Object(root)
    }
}

impl PaintTarget for JsonPaintTarget {
    fn add_variable(&mut self, name: &str, values: &[String]) -> Result<(), FieldError> {
        let array = values.iter().cloned().map(Value::String).collect();
        self.variables.insert(name.to_string(), Value::Array(array));
        Ok(())
    }

    fn add_attribute(&mut self, name: &str, value: u8) -> Result<(), FieldError> {
        self.attributes.insert(name.to_string(), Value::from(value));
        Ok(())
    }
}
