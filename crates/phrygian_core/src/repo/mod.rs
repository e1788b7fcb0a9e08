//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define storage contracts for the content document and route catalog.
//! - Isolate file and SQLite details from service orchestration.
//!
//! # Invariants
//! - Content storage is whole-document: no partial reads or writes.
//! - Catalog repositories are read-only.

pub mod content_repo;
pub mod route_repo;
