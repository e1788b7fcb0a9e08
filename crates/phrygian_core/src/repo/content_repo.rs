//! Site content storage port and its implementations.
//!
//! # Responsibility
//! - Define the `ContentStore` contract (whole-document read/write).
//! - Bind it to a JSON file for production and to memory for tests.
//!
//! # Invariants
//! - Every read parses the full document; every write replaces it.
//! - Written JSON is pretty-printed with 2-space indentation and a
//!   trailing newline.
//! - A failed write leaves the previous file content in place.

use crate::model::site_content::SiteContent;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Document is missing or unreadable.
    Read {
        location: PathBuf,
        source: std::io::Error,
    },
    /// Document bytes are not a valid site content document.
    Parse {
        location: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory document could not be serialized.
    Serialize(serde_json::Error),
    /// Document could not be written.
    Write {
        location: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Returns whether this failure happened while loading the document.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { location, source } => {
                write!(f, "failed to read `{}`: {source}", location.display())
            }
            Self::Parse { location, source } => {
                write!(f, "invalid content document `{}`: {source}", location.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize content document: {err}"),
            Self::Write { location, source } => {
                write!(f, "failed to write `{}`: {source}", location.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

/// Whole-document storage port for site content.
pub trait ContentStore {
    fn read(&self) -> StoreResult<SiteContent>;
    fn write(&self, content: &SiteContent) -> StoreResult<()>;
}

/// JSON file backed content store.
#[derive(Debug, Clone)]
pub struct JsonFileContentStore {
    path: PathBuf,
}

impl JsonFileContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ContentStore for JsonFileContentStore {
    fn read(&self) -> StoreResult<SiteContent> {
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Read {
            location: self.path.clone(),
            source,
        })?;
        debug!(
            "event=content_read module=store status=ok bytes={}",
            bytes.len()
        );
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            location: self.path.clone(),
            source,
        })
    }

    fn write(&self, content: &SiteContent) -> StoreResult<()> {
        let bytes = encode_document(content)?;
        let staging = self.staging_path();

        // Write beside the target, then rename over it.
        let result = std::fs::write(&staging, &bytes)
            .and_then(|()| std::fs::rename(&staging, &self.path));
        if let Err(source) = result {
            let _ = std::fs::remove_file(&staging);
            error!("event=content_write module=store status=error error={source}");
            return Err(StoreError::Write {
                location: self.path.clone(),
                source,
            });
        }

        debug!(
            "event=content_write module=store status=ok bytes={}",
            bytes.len()
        );
        Ok(())
    }
}

/// In-memory content store holding the serialized document text.
///
/// Keeps the same parse/serialize path as the file store, so a document that
/// would not survive the file round trip does not survive here either.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    document: Mutex<Option<Vec<u8>>>,
}

impl InMemoryContentStore {
    /// Creates an empty store; reads fail until a document is written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `content`.
    pub fn with_content(content: &SiteContent) -> StoreResult<Self> {
        let store = Self::new();
        store.write(content)?;
        Ok(store)
    }

    /// Creates a store seeded with raw document text.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            document: Mutex::new(Some(raw.into())),
        }
    }

    fn location() -> PathBuf {
        PathBuf::from(":memory:")
    }
}

impl ContentStore for InMemoryContentStore {
    fn read(&self) -> StoreResult<SiteContent> {
        let guard = self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let bytes = guard.as_ref().ok_or_else(|| StoreError::Read {
            location: Self::location(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no document stored"),
        })?;
        serde_json::from_slice(bytes).map_err(|source| StoreError::Parse {
            location: Self::location(),
            source,
        })
    }

    fn write(&self, content: &SiteContent) -> StoreResult<()> {
        let bytes = encode_document(content)?;
        let mut guard = self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(bytes);
        Ok(())
    }
}

fn encode_document(content: &SiteContent) -> StoreResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(content).map_err(StoreError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{ContentStore, InMemoryContentStore, JsonFileContentStore};
    use crate::model::site_content::SiteContent;
    use serde_json::json;

    #[test]
    fn file_store_writes_two_space_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        let store = JsonFileContentStore::new(&path);

        let content: SiteContent =
            serde_json::from_value(json!({"hero": {"title": "X"}})).unwrap();
        store.write(&content).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"hero\": {\n    \"title\": \"X\"\n  },"));
        assert!(text.ends_with("}\n"));
        assert!(!dir.path().join("content.json.tmp").exists());
    }

    #[test]
    fn file_store_missing_file_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileContentStore::new(dir.path().join("absent.json"));
        assert!(store.read().unwrap_err().is_read_failure());
    }

    #[test]
    fn file_store_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileContentStore::new(dir.path().join("nope").join("content.json"));
        let err = store.write(&SiteContent::default()).unwrap_err();
        assert!(!err.is_read_failure());
    }

    #[test]
    fn memory_store_rejects_invalid_json() {
        let store = InMemoryContentStore::with_raw("{not json");
        assert!(store.read().unwrap_err().is_read_failure());
    }

    #[test]
    fn empty_memory_store_is_read_failure() {
        assert!(InMemoryContentStore::new()
            .read()
            .unwrap_err()
            .is_read_failure());
    }
}
