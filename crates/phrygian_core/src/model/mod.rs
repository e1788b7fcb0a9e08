//! Domain model for site content and the route catalog.
//!
//! # Responsibility
//! - Define the JSON document shape served to the website.
//! - Define the read model of catalog routes.
//!
//! # Invariants
//! - Gallery images are owned by the site document; none exist outside it.
//! - Routes carry a stable public `route_id`.

pub mod route;
pub mod site_content;
