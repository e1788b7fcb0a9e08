//! Use-case boundary error shared by all services.
//!
//! # Invariants
//! - Every variant maps to exactly one stable `ErrorKind`.
//! - `public_message` never includes file paths or backend error text.

use crate::model::site_content::{GalleryImageId, GalleryValidationError};
use crate::repo::content_repo::StoreError;
use crate::repo::route_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stable, client-visible error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StorageRead,
    StorageWrite,
    NotFound,
    CatalogUnavailable,
    InvalidInput,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StorageRead => "storage_read",
            Self::StorageWrite => "storage_write",
            Self::NotFound => "not_found",
            Self::CatalogUnavailable => "catalog_unavailable",
            Self::InvalidInput => "invalid_input",
        }
    }
}

/// Entity a not-found error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingEntity {
    GalleryImage(GalleryImageId),
    Route(String),
}

#[derive(Debug)]
pub enum ServiceError {
    StorageRead(StoreError),
    StorageWrite(StoreError),
    NotFound(MissingEntity),
    CatalogUnavailable(RepoError),
    InvalidInput(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StorageRead(_) => ErrorKind::StorageRead,
            Self::StorageWrite(_) => ErrorKind::StorageWrite,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::CatalogUnavailable(_) => ErrorKind::CatalogUnavailable,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Short human-readable message safe to show to clients.
    pub fn public_message(&self) -> String {
        match self {
            Self::StorageRead(_) => "Failed to read site content".to_string(),
            Self::StorageWrite(_) => "Failed to save site content".to_string(),
            Self::NotFound(MissingEntity::GalleryImage(_)) => "Image not found".to_string(),
            Self::NotFound(MissingEntity::Route(_)) => "Route not found".to_string(),
            Self::CatalogUnavailable(_) => "Route catalog is unavailable".to_string(),
            Self::InvalidInput(message) => message.clone(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageRead(err) | Self::StorageWrite(err) => write!(f, "{err}"),
            Self::NotFound(MissingEntity::GalleryImage(id)) => {
                write!(f, "gallery image not found: {id}")
            }
            Self::NotFound(MissingEntity::Route(route_id)) => {
                write!(f, "route not found: {route_id}")
            }
            Self::CatalogUnavailable(err) => write!(f, "route catalog unavailable: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageRead(err) | Self::StorageWrite(err) => Some(err),
            Self::CatalogUnavailable(err) => Some(err),
            Self::NotFound(_) | Self::InvalidInput(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        if value.is_read_failure() {
            Self::StorageRead(value)
        } else {
            Self::StorageWrite(value)
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::CatalogUnavailable(value)
    }
}

impl From<GalleryValidationError> for ServiceError {
    fn from(value: GalleryValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}
