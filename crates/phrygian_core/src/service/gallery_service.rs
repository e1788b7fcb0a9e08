//! Gallery collection use-case service.
//!
//! # Responsibility
//! - Provide list/create/update/delete over the document's `gallery` array.
//! - Assign ids to new images.
//!
//! # Invariants
//! - New ids are `max(existing) + 1`, or `1` for an empty gallery; they
//!   never wrap.
//! - `update` targets the first entry with a matching id.
//! - `delete` removes every entry with a matching id and never fails on a
//!   missing id.
//! - All mutations share the owning `ContentService` lock.

use crate::model::site_content::{Fields, GalleryImage, GalleryImageId};
use crate::repo::content_repo::ContentStore;
use crate::service::content_service::ContentService;
use crate::service::error::{MissingEntity, ServiceError, ServiceResult};

/// Gallery operations bound to one content document.
pub struct GalleryService<'svc, S: ContentStore> {
    content: &'svc ContentService<S>,
}

impl<'svc, S: ContentStore> GalleryService<'svc, S> {
    pub fn new(content: &'svc ContentService<S>) -> Self {
        Self { content }
    }

    /// Returns images in stored order.
    pub fn list(&self) -> ServiceResult<Vec<GalleryImage>> {
        Ok(self.content.read()?.gallery)
    }

    /// Appends a new image built from `fields` and returns it with its id.
    ///
    /// A client-supplied `id` is ignored.
    ///
    /// # Errors
    /// - `ServiceError::InvalidInput` when the largest stored id is
    ///   `i64::MAX`; nothing is written.
    pub fn create(&self, fields: Fields) -> ServiceResult<GalleryImage> {
        self.content.modify("gallery_create", |content| {
            let image = GalleryImage::with_id(content.next_gallery_id()?, fields);
            content.gallery.push(image.clone());
            Ok(image)
        })
    }

    /// Shallow-merges `partial` over the first image with `id`.
    ///
    /// `partial.id` may replace the stored id.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` when no image has `id`; nothing is written.
    /// - `ServiceError::InvalidInput` when `partial.id` is not an integer.
    pub fn update(&self, id: GalleryImageId, partial: Fields) -> ServiceResult<GalleryImage> {
        self.content.modify("gallery_update", |content| {
            let image = content
                .gallery
                .iter_mut()
                .find(|image| image.id == id)
                .ok_or(ServiceError::NotFound(MissingEntity::GalleryImage(id)))?;
            image.merge(partial)?;
            Ok(image.clone())
        })
    }

    /// Removes every image with `id` and returns how many were removed.
    pub fn delete(&self, id: GalleryImageId) -> ServiceResult<usize> {
        self.content.modify("gallery_delete", |content| {
            let before = content.gallery.len();
            content.gallery.retain(|image| image.id != id);
            Ok(before - content.gallery.len())
        })
    }
}
