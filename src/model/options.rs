use crate::config::{
    BeforeWriteHook,
    DefaultLocale,
    Fallback,
};

/// Overrides applied to a single registration.
///
/// Every `None` falls back to the value in the [`ConfigManager`] at
/// registration time. Overrides never modify the manager.
///
/// [`ConfigManager`]: crate::config::ConfigManager
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub suffix: Option<String>,
    pub allow_blank: Option<bool>,
    pub fallback: Option<Fallback>,
    pub default_locale: Option<DefaultLocale>,
    pub before_write: Option<BeforeWriteHook>,
    pub set_missing_accessor: Option<bool>,
    pub presence_based: Option<bool>,
}

impl RegisterOptions {
    /// Options with every override unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Required ending of the raw field name.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Keep blank writes instead of removing the key.
    #[must_use]
    pub const fn allow_blank(mut self, allow_blank: bool) -> Self {
        self.allow_blank = Some(allow_blank);
        self
    }

    /// Fallback used by this field's getters.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<Fallback>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Locale of the locale-agnostic getter when none is passed.
    #[must_use]
    pub fn default_locale(mut self, default_locale: DefaultLocale) -> Self {
        self.default_locale = Some(default_locale);
        self
    }

    /// Change notification run before each modifying write.
    #[must_use]
    pub fn before_write(mut self, hook: BeforeWriteHook) -> Self {
        self.before_write = Some(hook);
        self
    }

    /// Generate a slot-backed accessor pair when the model has none.
    #[must_use]
    pub const fn set_missing_accessor(mut self, enabled: bool) -> Self {
        self.set_missing_accessor = Some(enabled);
        self
    }

    /// Match by non-empty value (`true`) or by key existence (`false`).
    #[must_use]
    pub const fn presence_based(mut self, presence_based: bool) -> Self {
        self.presence_based = Some(presence_based);
        self
    }
}

/// Per-call overrides for generated getters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Explicit locale for the locale-agnostic getter; ignored by per-locale getters.
    pub locale: Option<String>,
    pub fallback: Option<Fallback>,
    pub presence_based: Option<bool>,
}

impl ReadOptions {
    /// Options that defer to the field's policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit locale for the locale-agnostic getter.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Fallback for this read only.
    #[must_use]
    pub fn fallback(mut self, fallback: impl Into<Fallback>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Match policy for this read only.
    #[must_use]
    pub const fn presence_based(mut self, presence_based: bool) -> Self {
        self.presence_based = Some(presence_based);
        self
    }
}

/// Per-call overrides for generated setters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub allow_blank: Option<bool>,
}

impl WriteOptions {
    /// Options that defer to the field's policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank policy for this write only.
    #[must_use]
    pub const fn allow_blank(mut self, allow_blank: bool) -> Self {
        self.allow_blank = Some(allow_blank);
        self
    }
}
