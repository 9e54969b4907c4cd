//! translation-text-field
//!
//! 多言語文字列を一度に編集するフォームフィールドと、その値を表す不変オブジェクト

pub mod config;
pub mod error;
pub mod field;
pub mod locale;
pub mod registry;
mod test_utils;
pub mod value;

pub use error::{
    FieldError,
    HostPolicyError,
};
pub use field::{
    HostValue,
    Immediateness,
    RendererProjection,
    TranslationField,
};
pub use locale::Locale;
pub use registry::LocaleOrderRegistry;
pub use value::MultilingualValue;
