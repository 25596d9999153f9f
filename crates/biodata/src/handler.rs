//! Request dispatch.
//!
//! The handler ties validation, storage and queries together for one request at
//! a time. It knows nothing about HTTP; the server and CLI both drive it.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::query;
use crate::record::Record;
use crate::storage::RecordStore;
use crate::validate::{validate, RawSubmission, ValidationError};

/// Result of a submission that did not fail on storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The record passed validation and was appended.
    Saved {
        /// The record as stored, for confirmation display.
        record: Record,
    },
    /// Validation failed; nothing was stored.
    Rejected {
        /// Every failed check.
        errors: Vec<ValidationError>,
    },
}

impl SubmitOutcome {
    /// Whether the submission was stored.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Search results for a non-blank query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSection {
    /// The trimmed query, echoed back.
    pub query: String,
    /// Matching records in store order.
    pub matches: Vec<Record>,
    /// Set when `matches` is empty.
    pub no_matches: bool,
}

/// One page request: an optional submission and an optional search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Form submission to process first, if any.
    pub submission: Option<RawSubmission>,
    /// Search query, if any.
    pub query: Option<String>,
}

/// Everything a page shows after handling a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Outcome of the submission, when the request carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmitOutcome>,
    /// Search results, when the request carried a non-blank query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSection>,
    /// Full listing, always present.
    pub listing: Vec<Record>,
}

/// Stateless request handler over an injected record store.
#[derive(Debug)]
pub struct RequestHandler<S> {
    store: S,
}

impl<S: RecordStore> RequestHandler<S> {
    /// Create a handler over `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a submission and append it when valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the record was valid but could not be persisted.
    pub fn submit(&self, raw: RawSubmission) -> Result<SubmitOutcome> {
        match validate(raw) {
            Ok(record) => {
                self.store.append(record.clone())?;
                info!(nim = %record.student_id, "Saved submission");
                Ok(SubmitOutcome::Saved { record })
            }
            Err(errors) => {
                debug!("Rejected submission with {} errors", errors.len());
                Ok(SubmitOutcome::Rejected { errors })
            }
        }
    }

    /// Search the store when `query` is non-blank.
    ///
    /// Returns `None` for a missing or blank query; no search is performed.
    pub fn query(&self, query: Option<&str>) -> Option<SearchSection> {
        let query = query.map(str::trim).filter(|q| !q.is_empty())?;

        let matches = query::search(&self.store.load(), query);
        debug!(query, matches = matches.len(), "Search");
        Some(SearchSection {
            query: query.to_string(),
            no_matches: matches.is_empty(),
            matches,
        })
    }

    /// The full listing in store order.
    #[must_use]
    pub fn list(&self) -> Vec<Record> {
        query::list(&self.store.load())
    }

    /// Handle a full page request: submission, then search, then listing.
    ///
    /// # Errors
    ///
    /// Returns an error if a valid submission could not be persisted.
    pub fn page(&self, request: PageRequest) -> Result<PageView> {
        let submission = request.submission.map(|raw| self.submit(raw)).transpose()?;
        let search = self.query(request.query.as_deref());
        let listing = self.list();

        Ok(PageView {
            submission,
            search,
            listing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryStore;
    use crate::validate::Field;

    /// A store whose saves always fail.
    struct FailingStore(MemoryStore);

    impl RecordStore for FailingStore {
        fn load(&self) -> Vec<Record> {
            self.0.load()
        }

        fn save(&self, _records: &[Record]) -> Result<()> {
            Err(Error::storage_write(
                "/readonly/db.json",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    fn rin() -> RawSubmission {
        RawSubmission {
            nama: "Rin".to_string(),
            nim: "3337240001".to_string(),
            prodi: "Informatika".to_string(),
            gender: "Perempuan".to_string(),
            hobi: vec!["Musik".to_string(), "Coding".to_string()],
            alamat: "Jl. A".to_string(),
        }
    }

    fn handler() -> RequestHandler<MemoryStore> {
        RequestHandler::new(MemoryStore::new())
    }

    #[test]
    fn test_submit_saves_valid() {
        let handler = handler();
        let outcome = handler.submit(rin()).unwrap();

        let SubmitOutcome::Saved { record } = outcome else {
            panic!("expected saved outcome");
        };
        assert_eq!(record.name, "Rin");
        assert!(!record.timestamp.is_empty());
        assert_eq!(handler.store().load(), vec![record]);
    }

    #[test]
    fn test_submit_rejects_invalid_without_persisting() {
        let handler = handler();
        handler.submit(rin()).unwrap();
        let before = handler.store().load();

        let mut raw = rin();
        raw.nim = "  ".to_string();
        let outcome = handler.submit(raw).unwrap();

        let SubmitOutcome::Rejected { errors } = outcome else {
            panic!("expected rejected outcome");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::StudentId);
        assert_eq!(handler.store().load(), before);
    }

    #[test]
    fn test_submit_write_failure_propagates() {
        let handler = RequestHandler::new(FailingStore(MemoryStore::new()));
        let err = handler.submit(rin()).unwrap_err();
        assert!(err.is_storage_write());
    }

    #[test]
    fn test_submit_invalid_skips_store_even_if_failing() {
        let handler = RequestHandler::new(FailingStore(MemoryStore::new()));
        let outcome = handler.submit(RawSubmission::default()).unwrap();
        assert!(!outcome.is_saved());
    }

    #[test]
    fn test_query_blank_is_none() {
        let handler = handler();
        handler.submit(rin()).unwrap();
        assert!(handler.query(None).is_none());
        assert!(handler.query(Some("")).is_none());
        assert!(handler.query(Some("   ")).is_none());
    }

    #[test]
    fn test_rin_scenario() {
        let handler = handler();
        let SubmitOutcome::Saved { record } = handler.submit(rin()).unwrap() else {
            panic!("expected saved outcome");
        };

        let found = handler.query(Some("rin")).unwrap();
        assert_eq!(found.query, "rin");
        assert_eq!(found.matches, vec![record]);
        assert!(!found.no_matches);

        let missing = handler.query(Some("nonexistent")).unwrap();
        assert!(missing.matches.is_empty());
        assert!(missing.no_matches);
    }

    #[test]
    fn test_query_echoes_trimmed() {
        let handler = handler();
        let section = handler.query(Some("  Informatika ")).unwrap();
        assert_eq!(section.query, "Informatika");
    }

    #[test]
    fn test_list_empty_store() {
        assert!(handler().list().is_empty());
    }

    #[test]
    fn test_page_without_input_still_lists() {
        let handler = handler();
        handler.submit(rin()).unwrap();

        let view = handler.page(PageRequest::default()).unwrap();
        assert!(view.submission.is_none());
        assert!(view.search.is_none());
        assert_eq!(view.listing.len(), 1);
    }

    #[test]
    fn test_page_submit_then_search_then_list() {
        let handler = handler();
        let view = handler
            .page(PageRequest {
                submission: Some(rin()),
                query: Some("3337".to_string()),
            })
            .unwrap();

        assert!(view.submission.as_ref().is_some_and(SubmitOutcome::is_saved));
        assert_eq!(view.search.as_ref().unwrap().matches.len(), 1);
        assert_eq!(view.listing.len(), 1);
    }

    #[test]
    fn test_page_rejected_still_lists() {
        let handler = handler();
        handler.submit(rin()).unwrap();

        let view = handler
            .page(PageRequest {
                submission: Some(RawSubmission::default()),
                query: None,
            })
            .unwrap();

        assert!(matches!(
            view.submission,
            Some(SubmitOutcome::Rejected { ref errors }) if errors.len() == 6
        ));
        assert_eq!(view.listing.len(), 1);
    }

    #[test]
    fn test_page_write_failure_is_error() {
        let handler = RequestHandler::new(FailingStore(MemoryStore::new()));
        let result = handler.page(PageRequest {
            submission: Some(rin()),
            query: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_page_view_serialization() {
        let handler = handler();
        let view = handler
            .page(PageRequest {
                submission: Some(rin()),
                query: Some("zzz".to_string()),
            })
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["submission"]["status"], "saved");
        assert_eq!(json["submission"]["record"]["nama"], "Rin");
        assert_eq!(json["search"]["no_matches"], true);
        assert_eq!(json["listing"].as_array().unwrap().len(), 1);

        let empty = serde_json::to_value(handler.page(PageRequest::default()).unwrap()).unwrap();
        assert!(empty.get("submission").is_none());
        assert!(empty.get("search").is_none());
    }

    #[test]
    fn test_rejected_serialization() {
        let outcome = handler().submit(RawSubmission::default()).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["errors"][0]["field"], "name");
        assert_eq!(json["errors"][0]["message"], "Nama Lengkap wajib diisi.");
    }
}
