//! Route catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide read-only list/get APIs over the `routes` table.
//! - Keep SQL details inside the catalog persistence boundary.
//!
//! # Invariants
//! - Listing is ordered by `id ASC` (insertion order).
//! - A missing route is `Ok(None)`, never an error.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::route::{Difficulty, Route};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ROUTE_SELECT_SQL: &str = "SELECT
    id,
    route_id,
    name,
    description,
    distance_km,
    duration_days,
    difficulty,
    start_point,
    end_point,
    created_at
FROM routes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted route data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only repository interface for the route catalog.
pub trait RouteRepository {
    fn list_routes(&self) -> RepoResult<Vec<Route>>;
    fn get_route(&self, route_id: &str) -> RepoResult<Option<Route>>;
}

/// SQLite-backed route repository.
pub struct SqliteRouteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRouteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RouteRepository for SqliteRouteRepository<'_> {
    fn list_routes(&self) -> RepoResult<Vec<Route>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROUTE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut routes = Vec::new();

        while let Some(row) = rows.next()? {
            routes.push(parse_route_row(row)?);
        }

        Ok(routes)
    }

    fn get_route(&self, route_id: &str) -> RepoResult<Option<Route>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROUTE_SELECT_SQL} WHERE route_id = ?1;"))?;

        let mut rows = stmt.query(params![route_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_route_row(row)?));
        }

        Ok(None)
    }
}

fn parse_route_row(row: &Row<'_>) -> RepoResult<Route> {
    let difficulty = match row.get::<_, Option<String>>("difficulty")? {
        Some(value) => Some(parse_difficulty(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid difficulty `{value}` in routes.difficulty"))
        })?),
        None => None,
    };

    Ok(Route {
        id: row.get("id")?,
        route_id: row.get("route_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        distance_km: row.get("distance_km")?,
        duration_days: row.get("duration_days")?,
        difficulty,
        start_point: row.get("start_point")?,
        end_point: row.get("end_point")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_difficulty(value: &str) -> Option<Difficulty> {
    match value {
        "easy" => Some(Difficulty::Easy),
        "moderate" => Some(Difficulty::Moderate),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}
