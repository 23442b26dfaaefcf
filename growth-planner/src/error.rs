//! Error types raised while loading planner inputs.
//!
//! Aggregation itself is total; only parsing and table validation fail.

use thiserror::Error;

/// Errors raised when cost tables violate load-time invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("{table} denominations are empty")]
    EmptyDenominations { table: &'static str },
    #[error("{table} denomination {key} has zero value")]
    ZeroDenomination { table: &'static str, key: String },
    #[error("eligma batch size must be at least 1")]
    ZeroEligmaBatch,
    #[error("potential tier range invalid (start {start} > end {end})")]
    PotentialTierInverted { start: u32, end: u32 },
}

/// Errors surfaced by the planner when its inputs cannot be used.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("growth plan list is malformed: {0}")]
    MalformedPlans(#[source] serde_json::Error),
    #[error("cost tables are malformed: {0}")]
    MalformedTables(#[source] serde_json::Error),
    #[error("student data is malformed: {0}")]
    MalformedStudents(#[source] serde_json::Error),
    #[error(transparent)]
    InvalidTable(#[from] TableError),
}
