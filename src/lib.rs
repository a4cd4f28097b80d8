//! translatable-attrs
//!
//! Locale-keyed translatable fields for host record types: generated
//! per-locale accessors, blank-value policy and fallback resolution.
//!
//! ```
//! use translatable_attrs::{
//!     ConfigManager,
//!     Fallback,
//!     ModelType,
//!     ReadOptions,
//!     RegisterOptions,
//!     TranslatableRecord,
//!     TranslationMap,
//!     WriteOptions,
//! };
//!
//! #[derive(Default)]
//! struct Post {
//!     title_translations: Option<TranslationMap>,
//! }
//!
//! impl TranslatableRecord for Post {}
//!
//! let mut config = ConfigManager::new();
//! config.configure(|settings| {
//!     settings.available_locales = vec!["en".into(), "es".into(), "de".into()];
//! })?;
//!
//! let mut model = ModelType::new("Post").with_accessor(
//!     "title_translations",
//!     |post: &Post| post.title_translations.clone(),
//!     |post: &mut Post, map| post.title_translations = Some(map),
//! );
//! model.register(&config, "title_translations", RegisterOptions::new().fallback(Fallback::Any))?;
//!
//! let mut post = Post::default();
//! model.write(&config, &mut post, "set_title_es", Some("Nombre"), WriteOptions::new())?;
//!
//! assert_eq!(model.read(&config, &post, "title_en", &ReadOptions::new())?, Some("Nombre".into()));
//! # Ok::<(), translatable_attrs::TranslatableError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod locale;
pub mod model;
pub mod record;
pub mod types;

pub use config::{
    BeforeWriteHook,
    ConfigManager,
    DefaultLocale,
    Fallback,
    TranslatableSettings,
};
pub use error::TranslatableError;
pub use model::{
    ModelType,
    ReadOptions,
    RegisterOptions,
    TranslatedAttribute,
    WriteOptions,
};
pub use record::{
    FieldSlots,
    TranslatableRecord,
};
pub use types::TranslationMap;
