//! Trail route catalog model.
//!
//! # Invariants
//! - `route_id` is the public identifier used by point lookups.
//! - Routes are read-only from the application's perspective.

use serde::{Deserialize, Serialize};

/// Public route identifier, e.g. `section-1`.
pub type RouteId = String;

/// Physical difficulty grade of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

/// One row of the `routes` catalog table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Storage key; insertion order.
    pub id: i64,
    pub route_id: RouteId,
    pub name: String,
    pub description: Option<String>,
    pub distance_km: Option<f64>,
    pub duration_days: Option<i64>,
    pub difficulty: Option<Difficulty>,
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
