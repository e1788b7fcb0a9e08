//! Site content use-case service.
//!
//! # Responsibility
//! - Expose whole-document read/write and section patch APIs.
//! - Own the single-writer lock for the content document.
//!
//! # Invariants
//! - Every read-modify-write cycle on the document runs under one mutex, so
//!   concurrent writers through the same service cannot lose updates.
//! - A cycle whose closure fails writes nothing.
//! - Section patches are shallow merges.

use crate::model::site_content::{shallow_merge, Fields, Section, SiteContent};
use crate::repo::content_repo::ContentStore;
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::gallery_service::GalleryService;
use log::{error, info};
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// Partial update for the editable sections of the document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentPatch {
    pub hero: Option<Fields>,
    pub intro: Option<Fields>,
}

/// Use-case service over one content document.
pub struct ContentService<S: ContentStore> {
    store: S,
    lock: Mutex<()>,
}

impl<S: ContentStore> ContentService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns gallery operations sharing this document's lock.
    pub fn gallery(&self) -> GalleryService<'_, S> {
        GalleryService::new(self)
    }

    /// Loads the full document.
    pub fn read(&self) -> ServiceResult<SiteContent> {
        let _guard = self.acquire();
        Ok(self.store.read()?)
    }

    /// Replaces the full document.
    pub fn write(&self, content: &SiteContent) -> ServiceResult<()> {
        let _guard = self.acquire();
        Ok(self.store.write(content)?)
    }

    /// Shallow-merges `partial` into one section and returns the new document.
    pub fn patch_section(&self, section: Section, partial: Fields) -> ServiceResult<SiteContent> {
        self.modify(section.as_key(), |content| {
            shallow_merge(content.section_mut(section), partial);
            Ok(content.clone())
        })
    }

    /// Applies every present section of `patch` in a single cycle.
    pub fn patch(&self, patch: ContentPatch) -> ServiceResult<SiteContent> {
        self.modify("content_patch", |content| {
            if let Some(hero) = patch.hero {
                shallow_merge(content.section_mut(Section::Hero), hero);
            }
            if let Some(intro) = patch.intro {
                shallow_merge(content.section_mut(Section::Intro), intro);
            }
            Ok(content.clone())
        })
    }

    /// Runs one locked read-modify-write cycle.
    ///
    /// `op` labels the log events. The document is written only when
    /// `apply` succeeds.
    pub fn modify<T>(
        &self,
        op: &str,
        apply: impl FnOnce(&mut SiteContent) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let started_at = Instant::now();
        let _guard = self.acquire();

        let result = self.store.read().map_err(ServiceError::from).and_then(|mut content| {
            let value = apply(&mut content)?;
            self.store.write(&content)?;
            Ok(value)
        });

        match &result {
            Ok(_) => info!(
                "event=content_modify module=service status=ok op={} duration_ms={}",
                op,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=content_modify module=service status=error op={} duration_ms={} error_code={} error={}",
                op,
                started_at.elapsed().as_millis(),
                err.kind().as_str(),
                err
            ),
        }
        result
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
