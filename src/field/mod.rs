//! A form field editing one multilingual value
//!
//! The field coerces host values into a [`MultilingualValue`], publishes it to
//! the renderer as a [`RendererProjection`] and rebuilds it from the arrays
//! the renderer echoes back.

mod host_value;
mod immediateness;
mod paint;
mod property;

use std::fmt;

pub use host_value::HostValue;
pub use immediateness::Immediateness;
pub use paint::{
    ClientVariables,
    IMMEDIATE_ATTRIBUTE,
    JsonPaintTarget,
    LOCALES_VARIABLE,
    PaintTarget,
    RendererProjection,
    STRINGS_VARIABLE,
};
pub use property::{
    ObjectProperty,
    Property,
    ValueType,
};

use crate::error::{
    FieldError,
    HostPolicyError,
};
use crate::registry::LocaleOrderRegistry;
use crate::value::MultilingualValue;

/// Callback notified with the new value after every change
pub type ValueChangeListener = Box<dyn FnMut(Option<&MultilingualValue>) + Send>;

/// A text field for entering every translation of a string in one go.
///
/// Not thread-safe in the sense that it is meant to have a single owner; it
/// can still be moved between threads.
pub struct TranslationField {
    /// Stored value; `None` when cleared
    value: Option<MultilingualValue>,
    /// Propagation policy shipped to the renderer
    immediateness: Immediateness,
    /// Whether the field refuses writes
    read_only: bool,
    /// Bound host data source
    data_source: Option<Box<dyn Property>>,
    /// Change callbacks in registration order
    listeners: Vec<ValueChangeListener>,
}

impl TranslationField {
    /// A field holding the empty value
    #[must_use]
    pub fn new() -> Self {
        Self::with_value(MultilingualValue::empty())
    }

    /// A field holding `value`
    #[must_use]
    pub fn with_value(value: MultilingualValue) -> Self {
        Self {
            value: Some(value),
            immediateness: Immediateness::None,
            read_only: false,
            data_source: None,
            listeners: Vec::new(),
        }
    }

    /// A field bound to `property`, starting from the property's value
    pub fn with_data_source(property: impl Property + 'static) -> Result<Self, FieldError> {
        let mut field = Self::new();
        field.set_data_source(Some(Box::new(property)))?;
        Ok(field)
    }

    /// Binds the field to a data source, or unbinds it with `None`.
    ///
    /// The field takes over the data source's current value.
    pub fn set_data_source(&mut self, property: Option<Box<dyn Property>>) -> Result<(), FieldError> {
        let Some(property) = property else {
            tracing::debug!("Unbinding data source");
            self.data_source = None;
            return Ok(());
        };

        let coerced = property.value().coerce(LocaleOrderRegistry::preview_locale)?;
        tracing::debug!("Bound data source {property:?}");
        self.data_source = Some(property);
        self.store(coerced);
        Ok(())
    }

    /// The bound data source
    #[must_use]
    pub fn data_source(&self) -> Option<&dyn Property> {
        self.data_source.as_deref()
    }

    /// Sets the field's value.
    ///
    /// Plain text and character arrays are stored under the caller's preview
    /// locale. On error the stored value is left unchanged.
    pub fn set_value(&mut self, value: impl Into<HostValue>) -> Result<(), FieldError> {
        if self.read_only {
            return Err(HostPolicyError::ReadOnlyField.into());
        }

        let value = value.into();
        let kind = value.kind();
        let coerced = value.coerce(LocaleOrderRegistry::preview_locale)?;
        tracing::trace!("Coerced {kind} into {coerced:?}");

        if let Some(property) = &mut self.data_source {
            if property.is_read_only() {
                return Err(HostPolicyError::ReadOnlyDataSource.into());
            }
            property.set_value(HostValue::from(coerced.clone()))?;
        }

        self.store(coerced);
        Ok(())
    }

    /// Stores `value` and notifies listeners if it differs from the current one
    fn store(&mut self, value: Option<MultilingualValue>) {
        if self.value == value {
            return;
        }
        tracing::debug!("Field value changed to {value:?}");
        self.value = value;
        for listener in &mut self.listeners {
            listener(self.value.as_ref());
        }
    }

    /// The stored value; `None` when cleared
    #[must_use]
    pub const fn value(&self) -> Option<&MultilingualValue> {
        self.value.as_ref()
    }

    /// The value type this field advertises to its host
    #[must_use]
    pub fn declared_value_type() -> ValueType {
        ValueType::of::<MultilingualValue>()
    }

    /// `true` sets [`Immediateness::Normal`], `false` sets [`Immediateness::None`]
    pub fn set_immediate(&mut self, immediate: bool) {
        self.set_immediateness(Immediateness::from(immediate));
    }

    pub fn set_immediateness(&mut self, immediateness: Immediateness) {
        tracing::debug!("Immediateness set to {immediateness:?}");
        self.immediateness = immediateness;
    }

    /// Nullable form of [`TranslationField::set_immediateness`]
    pub fn try_set_immediateness(
        &mut self,
        immediateness: Option<Immediateness>,
    ) -> Result<(), FieldError> {
        let immediateness = immediateness.ok_or_else(|| FieldError::null_argument("immediateness"))?;
        self.set_immediateness(immediateness);
        Ok(())
    }

    #[must_use]
    pub const fn immediateness(&self) -> Immediateness {
        self.immediateness
    }

    /// Whether the host hears about edits before it asks for the value
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.immediateness != Immediateness::None
    }

    pub const fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether writes are refused, by the field or its data source
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only || self.data_source.as_ref().is_some_and(|p| p.is_read_only())
    }

    /// Registers a callback for value changes
    pub fn add_value_change_listener(
        &mut self,
        listener: impl FnMut(Option<&MultilingualValue>) + Send + 'static,
    ) {
        self.listeners.push(Box::new(listener));
    }

    /// What the renderer receives
    #[must_use]
    pub fn projection(&self) -> RendererProjection {
        RendererProjection::new(self.value.as_ref(), self.immediateness)
    }

    /// Sends the projection to `target`
    pub fn paint(&self, target: &mut dyn PaintTarget) -> Result<(), FieldError> {
        self.projection().paint(target)
    }

    /// Applies arrays echoed back by the renderer
    pub fn change_variables(&mut self, variables: &ClientVariables) -> Result<(), FieldError> {
        let value = variables.to_value()?;
        tracing::debug!("Renderer sent {} translations", value.size());
        self.set_value(value)
    }
}

impl Default for TranslationField {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TranslationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationField")
            .field("value", &self.value)
            .field("immediateness", &self.immediateness)
            .field("read_only", &self.read_only)
            .field("data_source", &self.data_source)
            .field("listeners", &format_args!("<{} listeners>", self.listeners.len()))
            .finish()
    }
}
