//! Attribute registrar: binds translatable fields to a model type and
//! generates their accessor surface.

/// Bound field and its accessors
mod attribute;
/// Per-registration and per-call overrides
mod options;
/// Model type and operation table
mod registrar;

pub use attribute::{
    AttributePolicy,
    LocaleAccessor,
    TranslatedAttribute,
};
pub use options::{
    ReadOptions,
    RegisterOptions,
    WriteOptions,
};
pub use registrar::{
    ModelType,
    Operation,
};
