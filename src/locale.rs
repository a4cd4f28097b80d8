//! Locale identifier normalization.
//!
//! The normalized token is used both as the suffix of generated accessor
//! names (`title_ptbr`) and to match a requested locale against the
//! configured ones, so `"pt-BR"`, `"pt_BR"` and `"ptbr"` all address the
//! same locale.

use crate::error::{
    Result,
    TranslatableError,
};

/// Lowercases the identifier and drops every character outside `a-z`.
///
/// Total over any input; may return an empty string.
#[must_use]
pub fn normalize_locale(locale: &str) -> String {
    locale.to_lowercase().chars().filter(char::is_ascii_lowercase).collect()
}

/// Resolves `requested` to the configured locale it addresses.
///
/// Returns the entry of `available` whose normalized token equals the
/// requested one, so map keys always use the configured spelling.
///
/// # Errors
/// `InvalidLocale` if nothing was requested or no configured locale matches.
pub fn canonical_locale<'a>(available: &'a [String], requested: Option<&str>) -> Result<&'a str> {
    let Some(requested) = requested else {
        return Err(TranslatableError::InvalidLocale(None));
    };

    let token = normalize_locale(requested);
    if token.is_empty() {
        return Err(TranslatableError::InvalidLocale(Some(requested.to_string())));
    }

    available
        .iter()
        .find(|locale| normalize_locale(locale) == token)
        .map(String::as_str)
        .ok_or_else(|| TranslatableError::InvalidLocale(Some(requested.to_string())))
}
