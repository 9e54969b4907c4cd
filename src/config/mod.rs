//! Settings for fields and the locale order

/// Settings file discovery and parsing
mod loader;
/// Settings lifecycle and field construction
mod manager;
/// Settings and configuration error types
mod types;

pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    FieldSettings,
    ValidationError,
};
