use thiserror::Error;

use crate::locale::LocaleError;

/// Errors raised by the multilingual value, the field and the locale registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required input was absent
    #[error("{0}")]
    NullArgument(String),
    /// A host value that is neither null, multilingual nor string-like
    #[error("{0}")]
    Conversion(String),
    /// Rejected by the host (e.g. a write to a read-only field)
    #[error(transparent)]
    HostPolicy(#[from] HostPolicyError),
    /// The preview locale was requested while the locale order is empty
    #[error("Locale order is empty, there is no preview locale")]
    EmptyLocaleOrder,
    /// Renderer variables that cannot be turned back into a value
    #[error("Malformed renderer variables: {0}")]
    MalformedVariables(String),
    /// The locale order was written from a runtime task outside a scope
    #[error(
        "Locale order written from an async task outside LocaleOrderRegistry::scope; \
         the write would leak to other tasks on the same worker thread"
    )]
    UnscopedAsyncWrite,
    /// A locale tag could not be parsed
    #[error(transparent)]
    InvalidLocale(#[from] LocaleError),
}

/// Policy violations reported by the host side of a field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostPolicyError {
    /// The field itself is read-only
    #[error("Field is read-only")]
    ReadOnlyField,
    /// The bound data source is read-only
    #[error("Data source is read-only")]
    ReadOnlyDataSource,
    /// Any other rejection by a host data source
    #[error("Data source rejected the value: {0}")]
    Rejected(String),
}

impl FieldError {
    /// `NullArgument` for an absent parameter
    #[must_use]
    pub fn null_argument(parameter: &str) -> Self {
        Self::NullArgument(format!("{parameter} may not be null"))
    }
}
