use chrono::{NaiveDate, NaiveDateTime};
use tablerun_lib::db::connection::DatabaseConnection;
use tablerun_lib::db::migrations::{load_seed, reset_schema};
use tablerun_lib::db::models::{AppointmentStatus, TicketStatus};
use tablerun_lib::db::operations::{format_date, format_timestamp, DbOperations};
use tablerun_lib::report::ResultSet;
use tablerun_lib::runner::{run_file, RunOptions};
use tablerun_lib::scenario::company::{Company, RAISE_AMOUNT_USD};
use tablerun_lib::scenario::salon::Salon;
use tablerun_lib::scenario::Scenario;
use tempfile::TempDir;

fn run_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn options() -> RunOptions {
    RunOptions {
        now: run_date(),
        separator_width: 40,
    }
}

fn seeded(scenario: &dyn Scenario) -> DatabaseConnection {
    let db = DatabaseConnection::open_in_memory().unwrap();
    reset_schema(db.conn(), scenario.schema()).unwrap();
    load_seed(db.conn(), scenario.seed_sql()).unwrap();
    db
}

// Every row of every scenario table, in rowid order
fn dump(db: &DatabaseConnection, scenario: &dyn Scenario) -> Vec<ResultSet> {
    scenario
        .seed_counts()
        .iter()
        .map(|(table, _)| {
            ResultSet::fetch(db.conn(), &format!("SELECT * FROM {} ORDER BY rowid", table)).unwrap()
        })
        .collect()
}

#[test]
fn test_seed_row_counts() {
    for scenario in [&Company as &dyn Scenario, &Salon] {
        let db = seeded(scenario);
        for (table, expected) in scenario.seed_counts() {
            assert_eq!(
                DbOperations::count_rows(&db, table).unwrap(),
                *expected,
                "{}.{}",
                scenario.name(),
                table
            );
        }
    }
}

#[test]
fn test_seed_references_resolve() {
    for scenario in [&Company as &dyn Scenario, &Salon] {
        let db = seeded(scenario);
        assert!(DbOperations::foreign_key_violations(&db).unwrap().is_empty());
    }
}

#[test]
fn test_raise_applies_to_department_only() {
    let db = seeded(&Company);
    let before = DbOperations::get_employees(&db).unwrap();
    Company.mutate(&db, run_date()).unwrap();
    let after = DbOperations::get_employees(&db).unwrap();

    let rnd_id = 1;
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.emp_id, new.emp_id);
        if old.dept_id == Some(rnd_id) {
            assert_eq!(new.salary_usd - old.salary_usd, RAISE_AMOUNT_USD);
        } else {
            assert_eq!(new.salary_usd, old.salary_usd);
        }
    }
}

#[test]
fn test_ticket_close_targets_project_only() {
    let db = seeded(&Company);
    let before = DbOperations::get_tickets(&db).unwrap();
    Company.mutate(&db, run_date()).unwrap();
    let after = DbOperations::get_tickets(&db).unwrap();

    for (old, new) in before.iter().zip(after.iter()) {
        if old.project_id == Some(1) {
            assert_eq!(new.status, TicketStatus::Closed);
        } else {
            assert_eq!(new.status, old.status);
        }
    }
}

#[test]
fn test_completion_targets_past_bookings_only() {
    let db = seeded(&Salon);
    let cutoff = format_timestamp(run_date());
    let before = DbOperations::get_appointments(&db).unwrap();
    Salon.mutate(&db, run_date()).unwrap();
    let after = DbOperations::get_appointments(&db).unwrap();

    for old in &before {
        let Some(new) = after.iter().find(|a| a.appointment_id == old.appointment_id) else {
            continue;
        };
        if old.status == AppointmentStatus::Booked && old.date_time < cutoff {
            assert_eq!(new.status, AppointmentStatus::Completed);
        } else {
            assert_eq!(new.status, old.status);
        }
    }
}

#[test]
fn test_purge_leaves_later_canceled_rows() {
    let db = seeded(&Salon);
    // Canceled later on the run day itself
    db.conn()
        .execute(
            "INSERT INTO appointments (date_time, status, master_id, client_id, service_id)
             VALUES ('2026-01-01 18:00', 'canceled', 2, 3, 2)",
            [],
        )
        .unwrap();
    let run_day = format_date(run_date().date());
    Salon.mutate(&db, run_date()).unwrap();
    let after = DbOperations::get_appointments(&db).unwrap();

    let canceled: Vec<_> = after
        .iter()
        .filter(|a| a.status == AppointmentStatus::Canceled)
        .collect();
    assert!(canceled.iter().all(|a| &a.date_time[..10] > run_day.as_str()));
    assert_eq!(canceled.len(), 1);
    assert_eq!(canceled[0].date_time, "2030-06-01 14:00");
}

#[test]
fn test_rerun_produces_identical_dataset() {
    let dir = TempDir::new().unwrap();

    for scenario in [&Company as &dyn Scenario, &Salon] {
        let path = dir.path().join(format!("{}.db", scenario.name()));

        run_file(scenario, &path, options()).unwrap();
        let first = dump(&DatabaseConnection::open(&path).unwrap(), scenario);

        run_file(scenario, &path, options()).unwrap();
        let second = dump(&DatabaseConnection::open(&path).unwrap(), scenario);

        assert_eq!(first, second, "{}", scenario.name());
    }
}

#[test]
fn test_run_file_reports_mutation_counts() {
    let dir = TempDir::new().unwrap();
    let report = run_file(&Salon, &dir.path().join("salon.db"), options()).unwrap();
    let labels: Vec<_> = report.mutations.iter().map(|m| (m.label, m.affected)).collect();
    assert_eq!(
        labels,
        vec![
            ("Services repriced", 4),
            ("Appointments completed", 1),
            ("Appointments booked", 1),
            ("Canceled appointments purged", 2),
        ]
    );
}
