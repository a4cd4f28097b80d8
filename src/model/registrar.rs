use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use super::attribute::{
    AttributePolicy,
    TranslatedAttribute,
};
use super::options::{
    ReadOptions,
    RegisterOptions,
    WriteOptions,
};
use crate::config::ConfigManager;
use crate::error::{
    Result,
    TranslatableError,
};
use crate::record::{
    FieldAccessor,
    FieldGetter,
    FieldSetter,
    TranslatableRecord,
};
use crate::types::TranslationMap;

/// An entry of a model type's operation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Plain getter of a raw field
    ReadRaw { field: String },
    /// Plain setter of a raw field
    WriteRaw { field: String },
    /// Locale-agnostic getter
    Read { field: String },
    /// Locale-agnostic bulk setter
    WriteAll { field: String },
    /// Getter bound to one locale
    ReadLocale { field: String, locale: String },
    /// Setter bound to one locale
    WriteLocale { field: String, locale: String },
}

/// A host record type and the operations generated on it.
///
/// Registrations on one model type never affect another.
pub struct ModelType<R> {
    /// Host type name, used in logs
    name: String,
    /// Plain accessors declared by the host, by raw field name
    plain_accessors: HashMap<String, FieldAccessor<R>>,
    /// Registered fields, by raw field name
    attributes: IndexMap<String, TranslatedAttribute<R>>,
    /// Operation table, in definition order
    operations: IndexMap<String, Operation>,
}

impl<R: TranslatableRecord> ModelType<R> {
    /// Creates a model type with no accessors and an empty operation table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plain_accessors: HashMap::new(),
            attributes: IndexMap::new(),
            operations: IndexMap::new(),
        }
    }

    /// Host type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares the host's plain get/set pair for a raw field.
    ///
    /// May be called before or after the field is registered; a registered
    /// field switches to the new accessor.
    #[must_use]
    pub fn with_accessor(
        mut self,
        field: impl Into<String>,
        get: FieldGetter<R>,
        set: FieldSetter<R>,
    ) -> Self {
        let field = field.into();
        self.define_raw_accessor(&field, FieldAccessor::Plain { get, set });
        self
    }

    /// Stores the raw accessor of `field`, adds its `<field>` / `set_<field>`
    /// operations and rebinds the field if it is already registered.
    fn define_raw_accessor(&mut self, field: &str, accessor: FieldAccessor<R>) {
        self.plain_accessors.insert(field.to_string(), accessor);
        if let Some(attribute) = self.attributes.get_mut(field) {
            attribute.bind_accessor(accessor);
        }
        self.operations.insert(field.to_string(), Operation::ReadRaw { field: field.to_string() });
        self.operations
            .insert(format!("set_{field}"), Operation::WriteRaw { field: field.to_string() });
    }

    /// Binds `raw_field` as a translatable field and generates its accessors.
    ///
    /// Per-locale accessors are generated for the locales configured right
    /// now; locales added later get none on this field.
    ///
    /// # Errors
    /// - `InvalidSuffix` if `raw_field` does not end with the effective
    ///   suffix, or consists of the suffix alone
    /// - `DuplicateRegistration` if `raw_field` is already registered here
    pub fn register(
        &mut self,
        config: &ConfigManager,
        raw_field: &str,
        options: RegisterOptions,
    ) -> Result<&TranslatedAttribute<R>> {
        let defaults = config.get_settings();
        let suffix = options.suffix.unwrap_or_else(|| defaults.suffix.clone());

        let short_name = match raw_field.strip_suffix(suffix.as_str()) {
            Some(short) if !short.is_empty() && !suffix.is_empty() => short.to_string(),
            _ => {
                return Err(TranslatableError::InvalidSuffix { field: raw_field.to_string(), suffix });
            }
        };

        if self.attributes.contains_key(raw_field) {
            return Err(TranslatableError::DuplicateRegistration { field: raw_field.to_string() });
        }

        let set_missing_accessor =
            options.set_missing_accessor.unwrap_or(defaults.set_missing_accessor);
        if set_missing_accessor && !self.plain_accessors.contains_key(raw_field) {
            tracing::debug!(model = %self.name, field = raw_field, "Generating slot accessor");
            self.define_raw_accessor(raw_field, FieldAccessor::Slot);
        }

        let policy = AttributePolicy {
            allow_blank: options.allow_blank.unwrap_or(defaults.allow_blank),
            fallback: options.fallback.unwrap_or_else(|| defaults.fallback.clone()),
            default_locale: options.default_locale.or_else(|| defaults.default_locale.clone()),
            before_write: options.before_write.or_else(|| defaults.before_write.clone()),
            presence_based: options.presence_based.unwrap_or(defaults.presence_based),
        };

        let attribute = TranslatedAttribute::new(
            raw_field.to_string(),
            short_name,
            policy,
            self.plain_accessors.get(raw_field).copied(),
            &defaults.available_locales,
        );
        self.define_operations(&attribute);

        tracing::debug!(
            model = %self.name,
            field = raw_field,
            short_name = attribute.short_name(),
            locales = attribute.locales().len(),
            "Registered translatable field"
        );

        Ok(self.attributes.entry(raw_field.to_string()).or_insert(attribute))
    }

    /// Adds the generated accessors of `attribute` to the operation table.
    ///
    /// A name already in the table is redefined.
    fn define_operations(&mut self, attribute: &TranslatedAttribute<R>) {
        let field = attribute.raw_name().to_string();
        self.operations
            .insert(attribute.getter_name().to_string(), Operation::Read { field: field.clone() });
        self.operations.insert(attribute.setter_name(), Operation::WriteAll { field: field.clone() });
        for accessor in attribute.locales() {
            self.operations.insert(
                accessor.getter.clone(),
                Operation::ReadLocale { field: field.clone(), locale: accessor.locale.clone() },
            );
            self.operations.insert(
                accessor.setter.clone(),
                Operation::WriteLocale { field: field.clone(), locale: accessor.locale.clone() },
            );
        }
    }

    /// Registered field by raw name.
    #[must_use]
    pub fn attribute(&self, raw_field: &str) -> Option<&TranslatedAttribute<R>> {
        self.attributes.get(raw_field)
    }

    /// Registered fields in registration order.
    pub fn attributes(&self) -> impl Iterator<Item = &TranslatedAttribute<R>> {
        self.attributes.values()
    }

    /// Operation table entry for `name`.
    #[must_use]
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Returns true if an operation named `name` was generated or declared.
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names in definition order.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Registered field an operation points at.
    fn attribute_for(&self, field: &str) -> Result<&TranslatedAttribute<R>> {
        self.attributes
            .get(field)
            .ok_or_else(|| TranslatableError::MissingAccessor { field: field.to_string() })
    }

    /// Error for a name with no suitable operation.
    fn unknown(name: &str) -> TranslatableError {
        TranslatableError::UnknownOperation(name.to_string())
    }

    /// Calls a generated getter by name (`title` or `title_en`).
    ///
    /// # Errors
    /// `UnknownOperation` if `name` is not a translated getter, plus any
    /// error of the getter itself.
    pub fn read(
        &self,
        config: &ConfigManager,
        record: &R,
        name: &str,
        options: &ReadOptions,
    ) -> Result<Option<String>> {
        match self.operation(name).ok_or_else(|| Self::unknown(name))? {
            Operation::Read { field } => self.attribute_for(field)?.get(config, record, options),
            Operation::ReadLocale { field, locale } => {
                self.attribute_for(field)?.get_in(config, record, locale, options)
            }
            _ => Err(Self::unknown(name)),
        }
    }

    /// Calls a generated per-locale setter by name (`set_title_en`).
    pub fn write(
        &self,
        config: &ConfigManager,
        record: &mut R,
        name: &str,
        value: Option<&str>,
        options: WriteOptions,
    ) -> Result<()> {
        match self.operation(name).ok_or_else(|| Self::unknown(name))? {
            Operation::WriteLocale { field, locale } => {
                self.attribute_for(field)?.set_in(config, record, locale, value, options)
            }
            _ => Err(Self::unknown(name)),
        }
    }

    /// Calls a map-taking setter by name: the bulk setter (`set_title`)
    /// or a plain raw setter (`set_title_translations`).
    pub fn write_all(
        &self,
        config: &ConfigManager,
        record: &mut R,
        name: &str,
        values: &TranslationMap,
        options: WriteOptions,
    ) -> Result<()> {
        match self.operation(name).ok_or_else(|| Self::unknown(name))? {
            Operation::WriteAll { field } => {
                self.attribute_for(field)?.set(config, record, values, options)
            }
            Operation::WriteRaw { field } => self.raw_accessor(field)?.store(record, field, values.clone()),
            _ => Err(Self::unknown(name)),
        }
    }

    /// Calls a plain raw getter by name (`title_translations`).
    pub fn read_raw(&self, record: &R, name: &str) -> Result<Option<TranslationMap>> {
        match self.operation(name).ok_or_else(|| Self::unknown(name))? {
            Operation::ReadRaw { field } => self.raw_accessor(field)?.load(record, field),
            _ => Err(Self::unknown(name)),
        }
    }

    /// Raw accessor an operation points at.
    fn raw_accessor(&self, field: &str) -> Result<&FieldAccessor<R>> {
        self.plain_accessors
            .get(field)
            .ok_or_else(|| TranslatableError::MissingAccessor { field: field.to_string() })
    }
}

impl<R> fmt::Debug for ModelType<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
