// End-to-end procedure: connect, reset, seed, query, mutate, verify, close
use chrono::NaiveDateTime;
use std::path::Path;

use crate::db::connection::DatabaseConnection;
use crate::db::migrations::{load_seed, reset_schema};
use crate::db::operations::DbOperations;
use crate::error::{Error, Result};
use crate::report::print_query;
use crate::scenario::{MutationOutcome, Scenario};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Run timestamp handed to the mutation step
    pub now: NaiveDateTime,
    pub separator_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Row count per table right after seeding
    pub seeded: Vec<(&'static str, i64)>,
    pub mutations: Vec<MutationOutcome>,
}

/// Run the whole procedure against the database file at `db_path`
pub fn run_file(scenario: &dyn Scenario, db_path: &Path, options: RunOptions) -> Result<RunReport> {
    let db = DatabaseConnection::open(db_path)?;
    tracing::info!(scenario = scenario.name(), path = %db_path.display(), "database connected");
    println!("1. Database connected.");

    let report = run_on(&db, scenario, options)?;

    db.close()?;
    println!("Done. Connection closed.");
    Ok(report)
}

/// Run every step after connecting, on an already open database
pub fn run_on(db: &DatabaseConnection, scenario: &dyn Scenario, options: RunOptions) -> Result<RunReport> {
    let conn = db.conn();

    println!("   Dropping old tables and creating new ones...");
    reset_schema(conn, scenario.schema())?;

    println!("2. Seeding data...");
    load_seed(conn, scenario.seed_sql())?;
    let seeded = check_seed_counts(db, scenario)?;

    println!("3. Running SELECT queries...");
    for query in scenario.queries() {
        print_query(conn, query.sql, query.title, options.separator_width)?;
    }

    println!("4. Applying updates...");
    let mutations = scenario.mutate(db, options.now)?;
    for outcome in &mutations {
        tracing::info!(label = outcome.label, affected = outcome.affected, "mutation applied");
        println!("   {}: {}", outcome.label, outcome.affected);
    }

    println!("5. Checking results after updates...");
    for query in scenario.verification_queries() {
        print_query(conn, query.sql, query.title, options.separator_width)?;
    }

    Ok(RunReport { seeded, mutations })
}

/// Compare every table against the row count its seed batch should produce
fn check_seed_counts(db: &DatabaseConnection, scenario: &dyn Scenario) -> Result<Vec<(&'static str, i64)>> {
    let mut seeded = Vec::with_capacity(scenario.seed_counts().len());
    for &(table, expected) in scenario.seed_counts() {
        let actual = DbOperations::count_rows(db, table)?;
        if actual != expected {
            return Err(Error::SeedCount {
                table,
                expected,
                actual,
            });
        }
        tracing::debug!(table, rows = actual, "table seeded");
        seeded.push((table, actual));
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::company::Company;
    use crate::scenario::salon::Salon;
    use chrono::NaiveDate;

    fn options() -> RunOptions {
        RunOptions {
            now: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            separator_width: 40,
        }
    }

    #[test]
    fn test_run_company_in_memory() {
        let db = DatabaseConnection::open_in_memory().unwrap();
        let report = run_on(&db, &Company, options()).unwrap();
        assert_eq!(report.mutations.len(), 2);
        assert_eq!(report.seeded, Company.seed_counts().to_vec());
    }

    #[test]
    fn test_seed_count_mismatch_is_reported() {
        let db = DatabaseConnection::open_in_memory().unwrap();
        reset_schema(db.conn(), Salon.schema()).unwrap();
        load_seed(db.conn(), Salon.seed_sql()).unwrap();
        db.conn()
            .execute("DELETE FROM appointments WHERE appointment_id = 7", [])
            .unwrap();

        let err = check_seed_counts(&db, &Salon).unwrap_err();
        assert!(matches!(
            err,
            Error::SeedCount {
                table: "appointments",
                expected: 7,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_run_salon_in_memory() {
        let db = DatabaseConnection::open_in_memory().unwrap();
        let report = run_on(&db, &Salon, options()).unwrap();
        assert_eq!(report.mutations.len(), 4);
    }
}
