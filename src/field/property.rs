//! Host-side data sources a field can be bound to

use std::any::{
    TypeId,
    type_name,
};
use std::fmt;

use crate::error::{
    FieldError,
    HostPolicyError,
};

use super::HostValue;

/// A host data source holding the field's value
pub trait Property: fmt::Debug + Send {
    /// The current value
    fn value(&self) -> HostValue;

    /// Stores a new value
    fn set_value(&mut self, value: HostValue) -> Result<(), FieldError>;

    /// Whether writes are refused
    fn is_read_only(&self) -> bool {
        false
    }
}

/// An in-memory [`Property`]
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    /// Stored value
    value: HostValue,
    /// Whether writes are refused
    read_only: bool,
}

impl ObjectProperty {
    #[must_use]
    pub const fn new(value: HostValue) -> Self {
        Self { value, read_only: false }
    }

    /// A property that refuses writes
    #[must_use]
    pub const fn read_only(value: HostValue) -> Self {
        Self { value, read_only: true }
    }
}

impl Property for ObjectProperty {
    fn value(&self) -> HostValue {
        self.value.clone()
    }

    fn set_value(&mut self, value: HostValue) -> Result<(), FieldError> {
        if self.read_only {
            return Err(HostPolicyError::ReadOnlyDataSource.into());
        }
        self.value = value;
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

/// Static type a field advertises to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    /// Runtime identity
    id: TypeId,
    /// Readable name
    name: &'static str,
}

impl ValueType {
    /// The value type of `T`
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is the value type of `T`
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
