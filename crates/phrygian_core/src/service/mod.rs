//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//! - Translate storage failures into the client-facing error taxonomy.

pub mod content_service;
pub mod error;
pub mod gallery_service;
pub mod route_service;
