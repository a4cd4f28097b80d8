//! Resolution engine.

use crate::config::Fallback;
use crate::error::Result;
use crate::locale::canonical_locale;
use crate::types::{
    TranslationMap,
    is_present,
};

/// Returns true if `locale` satisfies the match policy in `map`.
///
/// Presence-based matching requires a non-empty value; existence-based
/// matching only requires the key, whatever its value.
#[must_use]
pub fn locale_matches(map: &TranslationMap, locale: &str, presence_based: bool) -> bool {
    if presence_based {
        is_present(map.get(locale).and_then(Option::as_deref))
    } else {
        map.contains_key(locale)
    }
}

/// Stored text of `locale`, flattening a missing key and a stored `None`.
fn value_of(map: &TranslationMap, locale: &str) -> Option<String> {
    map.get(locale).cloned().flatten()
}

/// Configured spelling of a fallback target, or the target as written
/// when no configured locale matches it.
fn fallback_key<'a>(available: &'a [String], target: &'a str) -> &'a str {
    canonical_locale(available, Some(target)).unwrap_or(target)
}

/// Reads the value of `locale` from `raw`, falling back per `fallback`.
///
/// Fallback is only consulted when the requested locale itself does not
/// match. Fallback targets are matched to their configured spelling like
/// the requested locale. A `Fallback::Locale` target is read directly,
/// without applying the match policy.
///
/// # Errors
/// `InvalidLocale` if `locale` is absent or not in `available`.
pub fn read(
    available: &[String],
    raw: Option<&TranslationMap>,
    locale: Option<&str>,
    fallback: &Fallback,
    presence_based: bool,
) -> Result<Option<String>> {
    let locale = canonical_locale(available, locale)?;

    let Some(map) = raw else {
        return Ok(None);
    };

    if locale_matches(map, locale, presence_based) {
        return Ok(value_of(map, locale));
    }

    let resolved = match fallback {
        Fallback::Disabled => value_of(map, locale),
        Fallback::Any => map
            .iter()
            .filter(|(candidate, _)| candidate.as_str() != locale)
            .find(|(candidate, _)| locale_matches(map, candidate, presence_based))
            .and_then(|(_, value)| value.clone()),
        Fallback::Locale(target) => value_of(map, fallback_key(available, target)),
        Fallback::Locales(targets) => targets
            .iter()
            .map(|target| fallback_key(available, target))
            .find(|target| locale_matches(map, target, presence_based))
            .and_then(|target| value_of(map, target)),
    };

    tracing::trace!(locale, ?fallback, found = resolved.is_some(), "Resolved through fallback");

    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::error::TranslatableError;
    use crate::types::translation_map;

    #[fixture]
    fn available() -> Vec<String> {
        ["en", "es", "de", "fr"].iter().map(ToString::to_string).collect()
    }

    fn read_en(
        available: &[String],
        map: &TranslationMap,
        fallback: &Fallback,
        presence_based: bool,
    ) -> Option<String> {
        read(available, Some(map), Some("en"), fallback, presence_based).unwrap()
    }

    #[rstest]
    #[case::ordered_list(Fallback::locales(["de"]), Some("Titel"))]
    #[case::any(Fallback::Any, Some("Nombre"))]
    #[case::disabled(Fallback::Disabled, None)]
    #[case::list_without_match(Fallback::locales(["fr"]), None)]
    #[case::list_order_wins(Fallback::locales(["fr", "de", "es"]), Some("Titel"))]
    fn presence_based_fallback(
        available: Vec<String>,
        #[case] fallback: Fallback,
        #[case] expected: Option<&str>,
    ) {
        let map = translation_map([("es", "Nombre"), ("de", "Titel")]);

        assert_that!(
            read_en(&available, &map, &fallback, true).as_deref(),
            eq(expected)
        );
    }

    #[rstest]
    fn existence_based_primary_empty_string_matches(available: Vec<String>) {
        let map = translation_map([("es", "Nombre"), ("en", ""), ("de", "Titel")]);

        assert_that!(read_en(&available, &map, &Fallback::Disabled, false), some(eq("")));
        assert_that!(read_en(&available, &map, &Fallback::Any, false), some(eq("")));
    }

    #[rstest]
    fn existence_based_any_takes_first_existing_key(available: Vec<String>) {
        let map = translation_map([("es", "Nombre"), ("de", "Titel")]);

        assert_that!(read_en(&available, &map, &Fallback::Any, false), some(eq("Nombre")));
    }

    #[rstest]
    fn existence_based_any_accepts_stored_blank(available: Vec<String>) {
        let mut map = TranslationMap::new();
        map.insert("es".to_string(), None);
        map.insert("de".to_string(), Some("Titel".to_string()));

        assert_that!(read_en(&available, &map, &Fallback::Any, false), none());
        assert_that!(read_en(&available, &map, &Fallback::Any, true), some(eq("Titel")));
    }

    #[rstest]
    fn presence_based_skips_blank_primary(available: Vec<String>) {
        let map = translation_map([("en", ""), ("es", "Nombre")]);

        assert_that!(read_en(&available, &map, &Fallback::Any, true), some(eq("Nombre")));
        assert_that!(read_en(&available, &map, &Fallback::Disabled, true), some(eq("")));
    }

    #[rstest]
    fn matching_primary_never_consults_fallback(available: Vec<String>) {
        let map = translation_map([("es", "Nombre"), ("en", "Name")]);

        assert_that!(read_en(&available, &map, &Fallback::Any, true), some(eq("Name")));
        assert_that!(read_en(&available, &map, &Fallback::locale("es"), true), some(eq("Name")));
    }

    #[rstest]
    fn single_locale_fallback_skips_presence_check(available: Vec<String>) {
        let map = translation_map([("es", ""), ("de", "Titel")]);

        assert_that!(read_en(&available, &map, &Fallback::locale("es"), true), some(eq("")));
        assert_that!(read_en(&available, &map, &Fallback::locales(["es"]), true), none());
    }

    #[rstest]
    fn list_fallback_honors_presence_check(available: Vec<String>) {
        let map = translation_map([("es", ""), ("de", "Titel")]);

        assert_that!(
            read_en(&available, &map, &Fallback::locales(["es", "de"]), true),
            some(eq("Titel"))
        );
        assert_that!(
            read_en(&available, &map, &Fallback::locales(["es", "de"]), false),
            some(eq(""))
        );
    }

    #[rstest]
    fn absent_map_reads_absent(available: Vec<String>) {
        assert_that!(read(&available, None, Some("en"), &Fallback::Any, true), ok(none()));
    }

    #[rstest]
    #[case::missing(None)]
    #[case::unknown(Some("it"))]
    fn invalid_locale_fails_even_without_map(
        available: Vec<String>,
        #[case] locale: Option<&str>,
    ) {
        assert!(matches!(
            read(&available, None, locale, &Fallback::Disabled, true),
            Err(TranslatableError::InvalidLocale(_))
        ));
    }

    #[rstest]
    #[case::single(Fallback::locale("ptbr"), Some("Olá"))]
    #[case::single_other_spelling(Fallback::locale("PT_br"), Some("Olá"))]
    #[case::ordered(Fallback::locales(["pt_BR"]), Some("Olá"))]
    #[case::ordered_after_miss(Fallback::locales(["es", "PTBR"]), Some("Olá"))]
    #[case::any(Fallback::Any, Some("Olá"))]
    #[case::unconfigured_target(Fallback::locales(["fr"]), None)]
    fn fallback_targets_use_configured_spelling(
        #[case] fallback: Fallback,
        #[case] expected: Option<&str>,
    ) {
        let available = vec!["en".to_string(), "es".to_string(), "pt-BR".to_string()];
        let map = translation_map([("pt-BR", "Olá")]);

        let resolved = read(&available, Some(&map), Some("en"), &fallback, true).unwrap();

        assert_that!(resolved.as_deref(), eq(expected));
    }

    #[rstest]
    fn single_locale_fallback_in_other_spelling_skips_presence_check() {
        let available = vec!["en".to_string(), "pt-BR".to_string()];
        let map = translation_map([("pt-BR", ""), ("en", "")]);

        assert_that!(
            read(&available, Some(&map), Some("en"), &Fallback::locale("pt_br"), true).unwrap(),
            some(eq(""))
        );
    }

    #[rstest]
    fn locale_is_canonicalized_before_lookup() {
        let available = vec!["pt-BR".to_string()];
        let map = translation_map([("pt-BR", "Olá")]);

        assert_that!(
            read(&available, Some(&map), Some("ptbr"), &Fallback::Disabled, true).unwrap(),
            some(eq("Olá"))
        );
    }
}
