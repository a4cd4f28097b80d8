//! Process-wide translatable defaults, injected into the registrar.
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    BeforeWriteHook,
    ConfigError,
    DEFAULT_SUFFIX,
    DefaultLocale,
    Fallback,
    LocaleResolver,
    TranslatableSettings,
    ValidationError,
};
