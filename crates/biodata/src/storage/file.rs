//! JSON file record store.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{RecordStore, StoreStats};
use crate::error::{Error, Result};
use crate::record::Record;

/// A [`RecordStore`] backed by a single pretty-printed JSON array on disk.
///
/// Saves go through a temporary file in the same directory that is renamed
/// over the target, so readers only ever see a complete file. Saves from the
/// same `FileStore` are serialized; separate processes each write their own
/// temporary file and the last rename wins.
#[derive(Debug)]
pub struct FileStore {
    /// Path to the JSON file.
    path: PathBuf,
    /// Held for the duration of every save.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at the given path.
    ///
    /// Creates the parent directories if they don't exist. The file itself is
    /// only created by the first save; until then the store loads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directories cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        info!("Record store at {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Get the path to the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the store file and its temporaries.
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn read_records(&self) -> Option<Vec<Record>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No record store at {} yet", self.path.display());
                return None;
            }
            Err(err) => {
                warn!("Cannot read {}: {}; treating as empty", self.path.display(), err);
                return None;
            }
        };

        match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(rows) => Some(rows.into_iter().filter_map(|row| self.read_row(row)).collect()),
            Err(err) => {
                warn!(
                    "Cannot parse {}: {}; treating as empty",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn read_row(&self, row: serde_json::Value) -> Option<Record> {
        match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping malformed row in {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn write_records(&self, bytes: &[u8]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;

        // Keep the permissions of the file being replaced.
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }

        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

/// Serialize records as a JSON array indented with four spaces.
fn encode(records: &[Record]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

impl RecordStore for FileStore {
    fn load(&self) -> Vec<Record> {
        self.read_records().unwrap_or_default()
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let bytes = encode(records)?;

        let _guard = self.write_lock.lock();
        self.write_records(&bytes)
            .map_err(|source| Error::storage_write(&self.path, source))?;

        debug!(
            "Saved {} records ({} bytes) to {}",
            records.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn stats(&self) -> StoreStats {
        let mut stats = StoreStats::from_records(&self.load());
        stats.size_bytes = std::fs::metadata(&self.path).map_or(0, |m| m.len());
        stats
    }
}
