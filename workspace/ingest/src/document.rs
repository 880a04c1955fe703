use std::collections::HashMap;
use std::collections::hash_map::Entry;

use common::IdSequence;
use model::entities::document;

use crate::error::{IngestError, Result};

/// Natural identity of a document: accounting year, journal and document
/// number, shared by both ledger-line sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub year: i32,
    pub journal: String,
    pub number: String,
}

/// Assigns canonical document identity for one run.
///
/// The first request for a key allocates the next synthetic id and builds
/// the document from that caller's row; every later request returns the
/// stored document unchanged, regardless of which source file asks. The
/// import phase order therefore decides which source's description a
/// shared document carries.
#[derive(Debug, Default)]
pub struct DocumentResolver {
    documents: HashMap<DocumentKey, document::Model>,
    ids: IdSequence,
}

impl DocumentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a key, invoking `build` only when the key is first seen.
    /// Returns the document and whether this call created it.
    ///
    /// A stored document must agree with the key that finds it; a mismatch
    /// means the registry was corrupted and is reported instead of being
    /// silently overwritten.
    pub fn resolve_with<F>(&mut self, key: DocumentKey, build: F) -> Result<(&document::Model, bool)>
    where
        F: FnOnce(i64) -> document::Model,
    {
        match self.documents.entry(key) {
            Entry::Occupied(entry) => {
                let key = entry.key();
                let existing = entry.get();
                if existing.journal_id != key.journal
                    || existing.number != key.number
                    || existing.period_id / 100 != key.year
                {
                    return Err(IngestError::DocumentConflict {
                        year: key.year,
                        journal: key.journal.clone(),
                        number: key.number.clone(),
                        existing_id: existing.id,
                    });
                }
                Ok((entry.into_mut(), false))
            }
            Entry::Vacant(entry) => {
                let id = self.ids.next_id();
                Ok((entry.insert(build(id)), true))
            }
        }
    }

    /// Number of documents created so far (equals the last allocated id).
    pub fn created(&self) -> i64 {
        self.ids.last_id()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn key(year: i32, journal: &str, number: &str) -> DocumentKey {
        DocumentKey {
            year,
            journal: journal.to_owned(),
            number: number.to_owned(),
        }
    }

    fn build_document(id: i64, key: &DocumentKey, description: &str) -> document::Model {
        document::Model {
            id,
            period_id: key.year * 100 + 1,
            journal_id: key.journal.clone(),
            number: key.number.clone(),
            dt: NaiveDate::from_ymd_opt(key.year, 1, 15).unwrap(),
            description: description.to_owned(),
        }
    }

    #[test]
    fn first_sight_allocates_and_builds() {
        let mut resolver = DocumentResolver::new();
        let k = key(2024, "VEN", "1");
        let (document, created) = resolver
            .resolve_with(k.clone(), |id| build_document(id, &k, "first"))
            .unwrap();
        assert!(created);
        assert_eq!(document.id, 1);
        assert_eq!(document.description, "first");
        assert_eq!(resolver.created(), 1);
    }

    #[test]
    fn second_sight_reuses_without_building() {
        let mut resolver = DocumentResolver::new();
        let k = key(2024, "VEN", "1");
        resolver
            .resolve_with(k.clone(), |id| build_document(id, &k, "account history"))
            .unwrap();

        // The party-history phase racing for the same key must not build.
        let (document, created) = resolver
            .resolve_with(k.clone(), |_| panic!("builder must not run for a seen key"))
            .unwrap();
        assert!(!created);
        assert_eq!(document.id, 1);
        assert_eq!(document.description, "account history");
        assert_eq!(resolver.created(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_sequential_ids() {
        let mut resolver = DocumentResolver::new();
        for (number, expected_id) in [("1", 1), ("2", 2), ("3", 3)] {
            let k = key(2024, "VEN", number);
            let (document, created) = resolver
                .resolve_with(k.clone(), |id| build_document(id, &k, "doc"))
                .unwrap();
            assert!(created);
            assert_eq!(document.id, expected_id);
        }
        // Same number in another journal is a different document.
        let k = key(2024, "ACH", "1");
        let (document, _) = resolver
            .resolve_with(k.clone(), |id| build_document(id, &k, "doc"))
            .unwrap();
        assert_eq!(document.id, 4);
    }

    #[test]
    fn corrupted_registry_is_detected() {
        let mut resolver = DocumentResolver::new();
        let k = key(2024, "VEN", "1");
        // A builder that records the wrong journal simulates an
        // inconsistent merge.
        resolver
            .resolve_with(k.clone(), |id| {
                let mut document = build_document(id, &k, "doc");
                document.journal_id = "ACH".to_owned();
                document
            })
            .unwrap();

        let error = resolver
            .resolve_with(k, |id| build_document(id, &key(2024, "VEN", "1"), "doc"))
            .unwrap_err();
        assert!(matches!(error, IngestError::DocumentConflict { existing_id: 1, .. }));
    }
}
