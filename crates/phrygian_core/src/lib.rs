//! Core data access for the Phrygian Way site.
//! This crate owns the content document, the gallery and the route catalog.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_console_logging, init_logging, logging_status, LogTarget};
pub use model::route::{Difficulty, Route, RouteId};
pub use model::site_content::{
    Fields, GalleryImage, GalleryImageId, GalleryValidationError, Section, SiteContent,
};
pub use repo::content_repo::{
    ContentStore, InMemoryContentStore, JsonFileContentStore, StoreError, StoreResult,
};
pub use repo::route_repo::{RepoError, RepoResult, RouteRepository, SqliteRouteRepository};
pub use service::content_service::{ContentPatch, ContentService};
pub use service::error::{ErrorKind, MissingEntity, ServiceError, ServiceResult};
pub use service::gallery_service::GalleryService;
pub use service::route_service::{RouteService, SharedCatalog};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
