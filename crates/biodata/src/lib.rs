//! `biodata` - Collect, store and search student biodata
//!
//! Submissions are validated, appended to a single JSON file, and searched by
//! case-insensitive substring over name, student id and program. The same
//! operations are exposed over HTTP ([`server`]) and the `biodata` CLI.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod query;
pub mod record;
pub mod server;
pub mod storage;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use handler::{PageRequest, PageView, RequestHandler, SearchSection, SubmitOutcome};
pub use logging::init_logging;
pub use record::Record;
pub use storage::{FileStore, MemoryStore, RecordStore, StoreStats};
pub use validate::{validate, RawSubmission, ValidationError};
