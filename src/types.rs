//! Core types used throughout the crate.

use indexmap::IndexMap;

/// Locale code to text mapping stored in a translatable field.
///
/// Insertion order is significant: `Fallback::Any` returns the first matching
/// entry in map order. A `None` value is an explicitly stored absence.
pub type TranslationMap = IndexMap<String, Option<String>>;

/// Builds a [`TranslationMap`] from `(locale, text)` pairs, keeping their order.
///
/// # Examples
/// ```
/// use translatable_attrs::types::translation_map;
///
/// let map = translation_map([("es", "Nombre"), ("de", "Titel")]);
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["es", "de"]);
/// assert_eq!(map.get("de"), Some(&Some("Titel".to_string())));
/// ```
#[must_use]
pub fn translation_map<K, V, I>(entries: I) -> TranslationMap
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(locale, text)| (locale.into(), Some(text.into()))).collect()
}

/// Returns true if the value is neither absent nor an empty string.
#[must_use]
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.is_empty())
}
