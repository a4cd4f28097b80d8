//! Host record contract: how the raw translation map is fetched and stored.

use std::collections::HashMap;
use std::fmt;

use crate::error::{
    Result,
    TranslatableError,
};
use crate::types::TranslationMap;

/// A host record carrying translatable fields.
///
/// Records whose model declares plain accessors need nothing beyond this
/// impl. Records relying on slot-backed accessors (`set_missing_accessor`)
/// expose their [`FieldSlots`].
pub trait TranslatableRecord: 'static {
    fn slots(&self) -> Option<&FieldSlots> {
        None
    }

    fn slots_mut(&mut self) -> Option<&mut FieldSlots> {
        None
    }
}

/// Per-instance storage for fields whose accessor pair was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSlots {
    /// Stored maps, by raw field name
    values: HashMap<String, TranslationMap>,
}

impl FieldSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&TranslationMap> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, map: TranslationMap) {
        self.values.insert(field.into(), map);
    }
}

/// Plain getter for a raw field. Returns a fresh copy of the stored map.
pub type FieldGetter<R> = fn(&R) -> Option<TranslationMap>;

/// Plain setter for a raw field. Receives the full updated map.
pub type FieldSetter<R> = fn(&mut R, TranslationMap);

/// Plain get/set pair for a raw translation field.
pub enum FieldAccessor<R> {
    /// Supplied by the host.
    Plain { get: FieldGetter<R>, set: FieldSetter<R> },
    /// Generated at registration, backed by the record's [`FieldSlots`].
    Slot,
}

impl<R: TranslatableRecord> FieldAccessor<R> {
    /// Fetches the current map of `field`.
    ///
    /// # Errors
    /// `MissingAccessor` for a slot accessor on a record without slots.
    pub fn load(&self, record: &R, field: &str) -> Result<Option<TranslationMap>> {
        match self {
            Self::Plain { get, .. } => Ok(get(record)),
            Self::Slot => record
                .slots()
                .map(|slots| slots.get(field).cloned())
                .ok_or_else(|| missing_accessor(field)),
        }
    }

    /// Stores the full map of `field`.
    ///
    /// # Errors
    /// `MissingAccessor` for a slot accessor on a record without slots.
    pub fn store(&self, record: &mut R, field: &str, map: TranslationMap) -> Result<()> {
        match self {
            Self::Plain { set, .. } => {
                set(record, map);
                Ok(())
            }
            Self::Slot => {
                let slots = record.slots_mut().ok_or_else(|| missing_accessor(field))?;
                slots.set(field, map);
                Ok(())
            }
        }
    }
}

/// Error for a field the record cannot provide.
fn missing_accessor(field: &str) -> TranslatableError {
    TranslatableError::MissingAccessor { field: field.to_string() }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldAccessor<R> {}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { .. } => f.write_str("Plain"),
            Self::Slot => f.write_str("Slot"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::types::translation_map;

    #[derive(Default)]
    struct Article {
        title: Option<TranslationMap>,
        slots: FieldSlots,
    }

    impl TranslatableRecord for Article {
        fn slots(&self) -> Option<&FieldSlots> {
            Some(&self.slots)
        }

        fn slots_mut(&mut self) -> Option<&mut FieldSlots> {
            Some(&mut self.slots)
        }
    }

    struct Bare;

    impl TranslatableRecord for Bare {}

    #[rstest]
    fn plain_accessor_round_trips_through_host_field() {
        let accessor: FieldAccessor<Article> = FieldAccessor::Plain {
            get: |article| article.title.clone(),
            set: |article, map| article.title = Some(map),
        };
        let mut article = Article::default();

        accessor.store(&mut article, "title_translations", translation_map([("en", "Hi")])).unwrap();

        assert!(article.title.is_some());
        assert_that!(
            accessor.load(&article, "title_translations").unwrap(),
            some(eq(&translation_map([("en", "Hi")])))
        );
    }

    #[rstest]
    fn slot_accessor_uses_record_slots() {
        let accessor: FieldAccessor<Article> = FieldAccessor::Slot;
        let mut article = Article::default();

        assert_that!(accessor.load(&article, "body_translations").unwrap(), none());

        accessor.store(&mut article, "body_translations", translation_map([("en", "Body")])).unwrap();

        assert!(article.slots.get("body_translations").is_some());
        assert!(article.title.is_none());
    }

    #[rstest]
    fn slot_accessor_without_slots_fails() {
        let accessor: FieldAccessor<Bare> = FieldAccessor::Slot;

        assert!(matches!(
            accessor.load(&Bare, "body_translations"),
            Err(TranslatableError::MissingAccessor { .. })
        ));
        assert!(matches!(
            accessor.store(&mut Bare, "body_translations", TranslationMap::new()),
            Err(TranslatableError::MissingAccessor { .. })
        ));
    }
}
