use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::error::HookError;
use crate::locale::normalize_locale;

/// Suffix every raw translatable field name must end with, unless overridden.
pub const DEFAULT_SUFFIX: &str = "_translations";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "availableLocales[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where a read looks when the requested locale has no matching value.
///
/// In JSON: `false` disables fallback, `true` or `"any"` searches the whole
/// map, any other string names a single locale and an array lists locales
/// to try in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "FallbackRepr")]
pub enum Fallback {
    #[default]
    Disabled,
    /// First matching entry in map order, excluding the requested locale.
    Any,
    /// Raw value of this locale, without a presence check.
    Locale(String),
    /// First listed locale whose value matches.
    Locales(Vec<String>),
}

impl Fallback {
    #[must_use]
    pub fn locale(locale: impl Into<String>) -> Self {
        Self::Locale(locale.into())
    }

    #[must_use]
    pub fn locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Locales(locales.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for Fallback {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Any } else { Self::Disabled }
    }
}

/// JSON shapes accepted for [`Fallback`].
#[derive(Deserialize)]
#[serde(untagged)]
enum FallbackRepr {
    /// `true` / `false`
    Flag(bool),
    /// `"any"` or a locale code
    Locale(String),
    /// Ordered locale list
    Locales(Vec<String>),
}

impl From<FallbackRepr> for Fallback {
    fn from(repr: FallbackRepr) -> Self {
        match repr {
            FallbackRepr::Flag(enabled) => enabled.into(),
            FallbackRepr::Locale(locale) if locale == "any" => Self::Any,
            FallbackRepr::Locale(locale) => Self::Locale(locale),
            FallbackRepr::Locales(locales) => Self::Locales(locales),
        }
    }
}

/// Zero-argument callback returning the current locale.
pub type LocaleResolver = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Locale used by the locale-agnostic getter when none is passed explicitly.
#[derive(Clone)]
pub enum DefaultLocale {
    Fixed(String),
    /// Consulted on every read, so it can follow a request-scoped locale.
    Computed(LocaleResolver),
}

impl DefaultLocale {
    #[must_use]
    pub fn fixed(locale: impl Into<String>) -> Self {
        Self::Fixed(locale.into())
    }

    #[must_use]
    pub fn computed(resolver: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(resolver))
    }

    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Fixed(locale) => Some(locale.clone()),
            Self::Computed(resolver) => resolver(),
        }
    }
}

impl fmt::Debug for DefaultLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(locale) => f.debug_tuple("Fixed").field(locale).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultLocale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Fixed)
    }
}

/// Change notification invoked before a locale value is modified.
///
/// Receives the raw field name and the host record. Returning an error
/// aborts the write and leaves the stored map untouched.
#[derive(Clone)]
pub struct BeforeWriteHook(Arc<dyn Fn(&str, &mut dyn Any) -> Result<(), HookError> + Send + Sync>);

impl BeforeWriteHook {
    #[must_use]
    pub fn new(
        hook: impl Fn(&str, &mut dyn Any) -> Result<(), HookError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(hook))
    }

    pub fn call(&self, field: &str, record: &mut dyn Any) -> Result<(), HookError> {
        (self.0)(field, record)
    }
}

impl fmt::Debug for BeforeWriteHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BeforeWriteHook(..)")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatableSettings {
    /// Recognized locale codes. Order only drives accessor generation order.
    pub available_locales: Vec<String>,

    /// Required ending of raw field names; stripped once to form the short name.
    pub suffix: String,

    /// Store empty strings and explicit absence instead of removing the key.
    pub allow_blank: bool,

    pub fallback: Fallback,

    pub default_locale: Option<DefaultLocale>,

    #[serde(skip)]
    pub before_write: Option<BeforeWriteHook>,

    /// Generate a slot-backed get/set pair when the model has no plain accessor.
    pub set_missing_accessor: bool,

    /// `true`: a locale matches when its value is non-empty.
    /// `false`: a locale matches when its key exists at all.
    pub presence_based: bool,
}

impl TranslatableSettings {
    /// # Errors
    /// - Empty suffix
    /// - Locale that normalizes to an empty token
    /// - Two locales that normalize to the same accessor token
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.suffix.is_empty() {
            errors.push(ValidationError::new(
                "suffix",
                "The suffix cannot be empty. Example: \"_translations\"",
            ));
        }

        let mut seen: HashMap<String, &str> = HashMap::new();
        for (index, locale) in self.available_locales.iter().enumerate() {
            let token = normalize_locale(locale);
            if token.is_empty() {
                errors.push(ValidationError::new(
                    format!("availableLocales[{index}]"),
                    format!("Locale '{locale}' has no letters to build an accessor name from"),
                ));
                continue;
            }
            if let Some(previous) = seen.get(&token) {
                errors.push(ValidationError::new(
                    format!("availableLocales[{index}]"),
                    format!("Locale '{locale}' normalizes to '{token}', same as '{previous}'"),
                ));
            } else {
                seen.insert(token, locale);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslatableSettings {
    fn default() -> Self {
        Self {
            available_locales: Vec::new(),
            suffix: DEFAULT_SUFFIX.to_string(),
            allow_blank: false,
            fallback: Fallback::Disabled,
            default_locale: None,
            before_write: None,
            set_missing_accessor: false,
            presence_based: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn default_settings() {
        let settings = TranslatableSettings::default();

        assert_that!(settings.available_locales, is_empty());
        assert_that!(settings.suffix, eq("_translations"));
        assert_that!(settings.allow_blank, eq(false));
        assert_that!(settings.fallback, eq(&Fallback::Disabled));
        assert!(settings.default_locale.is_none());
        assert!(settings.before_write.is_none());
        assert_that!(settings.set_missing_accessor, eq(false));
        assert_that!(settings.presence_based, eq(true));
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"availableLocales": ["en", "pt-BR"], "allowBlank": true, "defaultLocale": "en"}"#;

        let settings: TranslatableSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.available_locales, elements_are![eq("en"), eq("pt-BR")]);
        assert_that!(settings.allow_blank, eq(true));
        assert_that!(settings.suffix, eq("_translations"));
        assert_that!(settings.default_locale.and_then(|d| d.resolve()), some(eq("en")));
    }

    #[rstest]
    #[case::disabled("false", Fallback::Disabled)]
    #[case::enabled("true", Fallback::Any)]
    #[case::any(r#""any""#, Fallback::Any)]
    #[case::single(r#""de""#, Fallback::locale("de"))]
    #[case::ordered(r#"["de", "es"]"#, Fallback::locales(["de", "es"]))]
    fn deserialize_fallback(#[case] json: &str, #[case] expected: Fallback) {
        let fallback: Fallback = serde_json::from_str(json).unwrap();

        assert_that!(fallback, eq(&expected));
    }

    #[rstest]
    fn computed_default_locale_is_called_on_resolve() {
        let default_locale = DefaultLocale::computed(|| Some("de".to_string()));

        assert_that!(default_locale.resolve(), some(eq("de")));
    }

    #[rstest]
    fn validate_invalid_suffix_empty() {
        let settings = TranslatableSettings { suffix: String::new(), ..Default::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("suffix")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_locale_without_letters() {
        let settings = TranslatableSettings {
            available_locales: vec!["en".to_string(), "42".to_string()],
            ..Default::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("availableLocales[1]")),
                field!(ValidationError.message, contains_substring("no letters"))
            ]])
        );
    }

    #[rstest]
    fn validate_colliding_locale_tokens() {
        let settings = TranslatableSettings {
            available_locales: vec!["pt-BR".to_string(), "en".to_string(), "pt_br".to_string()],
            ..Default::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("availableLocales[2]")),
                field!(ValidationError.message, contains_substring("same as 'pt-BR'"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = TranslatableSettings {
            suffix: String::new(),
            available_locales: vec!["_".to_string()],
            ..Default::default()
        };

        let config_error = ConfigError::ValidationErrors(settings.validate().unwrap_err());

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. suffix"));
        assert_that!(error_message, contains_substring("2. availableLocales[0]"));
    }
}
