use std::fmt;

use super::options::{
    ReadOptions,
    WriteOptions,
};
use crate::config::{
    BeforeWriteHook,
    ConfigManager,
    DefaultLocale,
    Fallback,
};
use crate::engine::{
    self,
    WriteRequest,
    locale_matches,
};
use crate::error::{
    Result,
    TranslatableError,
};
use crate::locale::normalize_locale;
use crate::record::{
    FieldAccessor,
    TranslatableRecord,
};
use crate::types::TranslationMap;

/// Policy captured when the field was registered.
#[derive(Debug, Clone)]
pub struct AttributePolicy {
    pub allow_blank: bool,
    pub fallback: Fallback,
    pub default_locale: Option<DefaultLocale>,
    pub before_write: Option<BeforeWriteHook>,
    pub presence_based: bool,
}

/// Names of the getter/setter pair generated for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleAccessor {
    /// Locale as configured at registration time
    pub locale: String,
    /// `<short_name>_<token>`
    pub getter: String,
    /// `set_<short_name>_<token>`
    pub setter: String,
}

impl LocaleAccessor {
    /// Accessor names of `short_name` for `locale`.
    pub(super) fn new(short_name: &str, locale: &str) -> Self {
        let token = normalize_locale(locale);
        Self {
            locale: locale.to_string(),
            getter: format!("{short_name}_{token}"),
            setter: format!("set_{short_name}_{token}"),
        }
    }
}

/// A translatable field bound to a model type.
///
/// Every accessor fetches the raw map from the record on each call and
/// checks locales against the locale set of the [`ConfigManager`] passed
/// in, not the one seen at registration.
pub struct TranslatedAttribute<R> {
    /// Raw field name, including the suffix
    raw_name: String,
    /// Raw name with the suffix stripped once
    short_name: String,
    /// Effective policy at registration time
    policy: AttributePolicy,
    /// Plain accessor, if the model had or generated one
    accessor: Option<FieldAccessor<R>>,
    /// Per-locale accessor names, from the locale set at registration time
    locales: Vec<LocaleAccessor>,
}

impl<R: TranslatableRecord> TranslatedAttribute<R> {
    /// Builds the attribute with one [`LocaleAccessor`] per locale in `snapshot`.
    pub(super) fn new(
        raw_name: String,
        short_name: String,
        policy: AttributePolicy,
        accessor: Option<FieldAccessor<R>>,
        snapshot: &[String],
    ) -> Self {
        let locales = snapshot.iter().map(|locale| LocaleAccessor::new(&short_name, locale)).collect();
        Self { raw_name, short_name, policy, accessor, locales }
    }

    /// Replaces the raw accessor, for accessors declared after registration.
    pub(super) fn bind_accessor(&mut self, accessor: FieldAccessor<R>) {
        self.accessor = Some(accessor);
    }

    /// Raw field name, including the suffix.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Raw name with the suffix stripped once.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Effective policy captured at registration.
    #[must_use]
    pub const fn policy(&self) -> &AttributePolicy {
        &self.policy
    }

    /// Per-locale accessor names, in generation order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleAccessor] {
        &self.locales
    }

    /// Name of the locale-agnostic getter.
    #[must_use]
    pub fn getter_name(&self) -> &str {
        &self.short_name
    }

    /// Name of the locale-agnostic bulk setter.
    #[must_use]
    pub fn setter_name(&self) -> String {
        format!("set_{}", self.short_name)
    }

    /// Accessor of the raw field, or `MissingAccessor`.
    fn accessor(&self) -> Result<&FieldAccessor<R>> {
        self.accessor
            .as_ref()
            .ok_or_else(|| TranslatableError::MissingAccessor { field: self.raw_name.clone() })
    }

    /// Raw map currently stored on the record.
    pub fn raw(&self, record: &R) -> Result<Option<TranslationMap>> {
        self.accessor()?.load(record, &self.raw_name)
    }

    /// Replaces the raw map verbatim, bypassing blank policy and hook.
    pub fn set_raw(&self, record: &mut R, map: TranslationMap) -> Result<()> {
        self.accessor()?.store(record, &self.raw_name, map)
    }

    /// Locale-agnostic getter.
    ///
    /// The locale is `options.locale`, else the default locale (computed
    /// resolvers are invoked now), else none, which fails with
    /// `InvalidLocale`.
    pub fn get(&self, config: &ConfigManager, record: &R, options: &ReadOptions) -> Result<Option<String>> {
        let locale = options
            .locale
            .clone()
            .or_else(|| self.policy.default_locale.as_ref().and_then(DefaultLocale::resolve));
        self.read(config, record, locale.as_deref(), options)
    }

    /// Getter for a single locale.
    pub fn get_in(
        &self,
        config: &ConfigManager,
        record: &R,
        locale: &str,
        options: &ReadOptions,
    ) -> Result<Option<String>> {
        self.read(config, record, Some(locale), options)
    }

    /// Shared body of the getters once the locale is known.
    fn read(
        &self,
        config: &ConfigManager,
        record: &R,
        locale: Option<&str>,
        options: &ReadOptions,
    ) -> Result<Option<String>> {
        let raw = self.raw(record)?;
        engine::read(
            &config.get_settings().available_locales,
            raw.as_ref(),
            locale,
            options.fallback.as_ref().unwrap_or(&self.policy.fallback),
            options.presence_based.unwrap_or(self.policy.presence_based),
        )
    }

    /// Locale-agnostic bulk setter.
    ///
    /// Keys are normalized, then each entry is written in order with the
    /// same options. Entries written before a failing one stay written.
    pub fn set(
        &self,
        config: &ConfigManager,
        record: &mut R,
        values: &TranslationMap,
        options: WriteOptions,
    ) -> Result<()> {
        for (locale, value) in values {
            let token = normalize_locale(locale);
            self.set_in(config, record, &token, value.as_deref(), options)?;
        }
        Ok(())
    }

    /// Setter for a single locale.
    pub fn set_in(
        &self,
        config: &ConfigManager,
        record: &mut R,
        locale: &str,
        value: Option<&str>,
        options: WriteOptions,
    ) -> Result<()> {
        let accessor = self.accessor()?;
        engine::write(
            &config.get_settings().available_locales,
            record,
            accessor,
            WriteRequest {
                field: &self.raw_name,
                locale: Some(locale),
                value,
                allow_blank: options.allow_blank.unwrap_or(self.policy.allow_blank),
                before_write: self.policy.before_write.as_ref(),
            },
        )
    }

    /// Locales of the stored map that satisfy the match policy, in map order.
    pub fn translated_locales(&self, record: &R, presence_based: Option<bool>) -> Result<Vec<String>> {
        let presence_based = presence_based.unwrap_or(self.policy.presence_based);
        let Some(map) = self.raw(record)? else {
            return Ok(Vec::new());
        };
        Ok(map
            .keys()
            .filter(|locale| locale_matches(&map, locale, presence_based))
            .cloned()
            .collect())
    }
}

impl<R> fmt::Debug for TranslatedAttribute<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatedAttribute")
            .field("raw_name", &self.raw_name)
            .field("short_name", &self.short_name)
            .field("policy", &self.policy)
            .field("accessor", &self.accessor)
            .field("locales", &self.locales)
            .finish()
    }
}
