//! Write engine.

use crate::config::BeforeWriteHook;
use crate::error::{
    Result,
    TranslatableError,
};
use crate::locale::canonical_locale;
use crate::record::{
    FieldAccessor,
    TranslatableRecord,
};

/// A single-locale mutation of a raw translation field.
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    /// Raw field name, passed to the hook and used for slot storage
    pub field: &'a str,
    pub locale: Option<&'a str>,
    /// `None` and `Some("")` are blank
    pub value: Option<&'a str>,
    pub allow_blank: bool,
    pub before_write: Option<&'a BeforeWriteHook>,
}

/// Applies `request` to the map stored on `record`.
///
/// The hook runs before the map is modified, and only when the stored
/// value differs from the new one. Blank values remove the locale key
/// unless blanks are allowed, in which case they are stored verbatim.
///
/// # Errors
/// - `InvalidLocale` if the locale is absent or not in `available`
/// - `WriteAborted` if the hook returns an error
/// - `MissingAccessor` if the record cannot provide the field
pub fn write<R: TranslatableRecord>(
    available: &[String],
    record: &mut R,
    accessor: &FieldAccessor<R>,
    request: WriteRequest<'_>,
) -> Result<()> {
    let WriteRequest { field, locale, value, allow_blank, before_write } = request;
    let locale = canonical_locale(available, locale)?;

    let mut map = accessor.load(record, field)?.unwrap_or_default();

    if let Some(hook) = before_write
        && map.get(locale).and_then(Option::as_deref) != value
    {
        hook.call(field, record).map_err(|source| TranslatableError::WriteAborted {
            field: field.to_string(),
            source,
        })?;
    }

    if value.is_none_or(str::is_empty) && !allow_blank {
        tracing::trace!(field, locale, "Removing blank translation");
        map.shift_remove(locale);
    } else {
        map.insert(locale.to_string(), value.map(ToString::to_string));
    }

    accessor.store(record, field, map)
}
