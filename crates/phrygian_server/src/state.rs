use phrygian_core::{ContentService, JsonFileContentStore, SharedCatalog};
use std::path::PathBuf;
use std::sync::Arc;

/// Process-wide handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService<JsonFileContentStore>>,
    pub catalog: Arc<SharedCatalog>,
}

impl AppState {
    pub fn new(content: ContentService<JsonFileContentStore>, catalog: SharedCatalog) -> Self {
        Self {
            content: Arc::new(content),
            catalog: Arc::new(catalog),
        }
    }

    /// Binds the content document at `content_path` and opens the catalog at
    /// `db_path` on first use.
    pub fn from_paths(content_path: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self::new(
            ContentService::new(JsonFileContentStore::new(content_path)),
            SharedCatalog::lazy(db_path),
        )
    }
}
