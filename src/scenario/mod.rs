// Fixed demonstration scenarios
// Each scenario bundles a schema, its seed rows, a query catalog and a mutation sequence

pub mod company;
pub mod salon;

use chrono::NaiveDateTime;

use crate::db::connection::DatabaseConnection;
use crate::db::migrations::Schema;
use crate::error::Result;

/// A titled SELECT printed as a table
#[derive(Debug, Clone, Copy)]
pub struct CannedQuery {
    pub title: &'static str,
    pub sql: &'static str,
}

/// Affected-row count of one mutation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub label: &'static str,
    pub affected: usize,
}

pub trait Scenario {
    fn name(&self) -> &'static str;

    fn schema(&self) -> &'static Schema;

    fn seed_sql(&self) -> &'static str;

    /// Expected row count per table right after seeding
    fn seed_counts(&self) -> &'static [(&'static str, i64)];

    /// Queries run between seeding and mutation
    fn queries(&self) -> &'static [CannedQuery];

    /// Apply the fixed mutation sequence; `now` is the run timestamp
    fn mutate(&self, db: &DatabaseConnection, now: NaiveDateTime) -> Result<Vec<MutationOutcome>>;

    /// Queries re-run after the mutations to show the resulting state
    fn verification_queries(&self) -> &'static [CannedQuery];
}
