//! Route catalog use-case service and shared catalog handle.
//!
//! # Responsibility
//! - Provide list/get entry points over route repositories.
//! - Hold the process-wide catalog connection for request handlers.
//!
//! # Invariants
//! - A missing route is `Ok(None)`; only connectivity or query failures map
//!   to `ServiceError::CatalogUnavailable`.
//! - The shared connection is opened at most once per successful open and is
//!   re-attempted on the next call after a failed open.

use crate::db::{open_catalog, DbError};
use crate::model::route::Route;
use crate::repo::route_repo::{RepoError, RouteRepository, SqliteRouteRepository};
use crate::service::error::{ServiceError, ServiceResult};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;

/// Use-case service wrapper for route catalog reads.
pub struct RouteService<R: RouteRepository> {
    repo: R,
}

impl<R: RouteRepository> RouteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every route ordered by insertion.
    pub fn list_all(&self) -> ServiceResult<Vec<Route>> {
        Ok(self.repo.list_routes()?)
    }

    /// Looks up one route by its public identifier.
    pub fn get_by_id(&self, route_id: &str) -> ServiceResult<Option<Route>> {
        Ok(self.repo.get_route(route_id)?)
    }
}

/// Process-wide catalog connection shared by request handlers.
pub struct SharedCatalog {
    path: Option<PathBuf>,
    conn: Mutex<Option<Connection>>,
}

impl SharedCatalog {
    /// Creates a handle that opens `path` on first use.
    pub fn lazy(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: Mutex::new(None),
        }
    }

    /// Wraps an already opened connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            path: None,
            conn: Mutex::new(Some(conn)),
        }
    }

    /// Runs `f` with a route service over the shared connection.
    pub fn with_routes<T>(
        &self,
        f: impl FnOnce(&RouteService<SqliteRouteRepository<'_>>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut guard = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let conn = match guard.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        let result = f(&RouteService::new(SqliteRouteRepository::new(&conn)));
        *guard = Some(conn);
        result
    }

    fn open(&self) -> ServiceResult<Connection> {
        let path = self.path.as_ref().ok_or_else(|| {
            ServiceError::CatalogUnavailable(RepoError::InvalidData(
                "catalog connection is not configured".to_string(),
            ))
        })?;
        open_catalog(path).map_err(|err: DbError| {
            error!("event=catalog_open module=service status=error error={err}");
            ServiceError::CatalogUnavailable(err.into())
        })
    }
}
