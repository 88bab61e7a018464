// Database operations
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, OptionalExtension};

use crate::db::connection::DatabaseConnection;
#[cfg(test)]
use crate::db::models::ProjectStatus;
use crate::db::models::{Appointment, AppointmentStatus, Employee, Service, Ticket, TicketStatus};
use crate::error::{Error, Result};

/// Text layout of every appointment timestamp, lexically ordered
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// One row reported by `PRAGMA foreign_key_check`
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyViolation {
    pub table: String,
    pub rowid: Option<i64>,
    pub parent: String,
}

/// Appointment request resolved by natural keys
#[derive(Debug, Clone)]
pub struct NewBooking<'a> {
    pub date_time: NaiveDateTime,
    pub master_name: &'a str,
    pub client_email: &'a str,
    pub service_name: &'a str,
}

/// Database reads and the fixed mutation statements
pub struct DbOperations;

impl DbOperations {
    /// Count rows of an existing table
    pub fn count_rows(db: &DatabaseConnection, table: &str) -> Result<i64> {
        let conn = db.conn();

        // Identifiers can't be bound, so only accept names the schema knows
        let known: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table],
                |row| row.get(0),
            )
            .optional()?;
        let Some(table) = known else {
            return Err(Error::UnknownTable(table.to_string()));
        };

        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\"")),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Every dangling foreign-key reference in the database
    pub fn foreign_key_violations(db: &DatabaseConnection) -> Result<Vec<ForeignKeyViolation>> {
        let mut stmt = db.conn().prepare("PRAGMA foreign_key_check")?;
        let violations = stmt
            .query_map([], |row| {
                Ok(ForeignKeyViolation {
                    table: row.get(0)?,
                    rowid: row.get(1)?,
                    parent: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(violations)
    }

    // ===== Company =====

    pub fn get_employees(db: &DatabaseConnection) -> Result<Vec<Employee>> {
        let mut stmt = db.conn().prepare(
            "SELECT emp_id, full_name, dept_id, salary_usd FROM employees ORDER BY emp_id",
        )?;
        let employees = stmt
            .query_map([], |row| {
                Ok(Employee {
                    emp_id: row.get(0)?,
                    full_name: row.get(1)?,
                    dept_id: row.get(2)?,
                    salary_usd: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    pub fn get_tickets(db: &DatabaseConnection) -> Result<Vec<Ticket>> {
        let mut stmt = db
            .conn()
            .prepare("SELECT ticket_id, project_id, title, status FROM tickets ORDER BY ticket_id")?;
        let tickets = stmt
            .query_map([], |row| {
                Ok(Ticket {
                    ticket_id: row.get(0)?,
                    project_id: row.get(1)?,
                    title: row.get(2)?,
                    status: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tickets)
    }

    #[cfg(test)]
    pub fn get_project_status(db: &DatabaseConnection, name: &str) -> Result<Option<ProjectStatus>> {
        let status = db
            .conn()
            .query_row(
                "SELECT status FROM projects WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(status)
    }

    /// Add a fixed amount to the salary of everyone in a department
    pub fn raise_department_salary(db: &DatabaseConnection, dept_name: &str, amount: f64) -> Result<usize> {
        let updated = db.conn().execute(
            "UPDATE employees
             SET salary_usd = salary_usd + ?1
             WHERE dept_id = (SELECT dept_id FROM departments WHERE name = ?2)",
            params![amount, dept_name],
        )?;
        Ok(updated)
    }

    /// Move every ticket of a project to `status`
    pub fn set_project_ticket_status(
        db: &DatabaseConnection,
        project_name: &str,
        status: TicketStatus,
    ) -> Result<usize> {
        let updated = db.conn().execute(
            "UPDATE tickets
             SET status = ?1
             WHERE project_id = (SELECT project_id FROM projects WHERE name = ?2)",
            params![status, project_name],
        )?;
        Ok(updated)
    }

    // ===== Salon =====

    pub fn get_services(db: &DatabaseConnection) -> Result<Vec<Service>> {
        let mut stmt = db.conn().prepare(
            "SELECT service_id, name, price, duration_minutes FROM services ORDER BY service_id",
        )?;
        let services = stmt
            .query_map([], |row| {
                Ok(Service {
                    service_id: row.get(0)?,
                    name: row.get(1)?,
                    price: row.get(2)?,
                    duration_minutes: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(services)
    }

    pub fn get_appointments(db: &DatabaseConnection) -> Result<Vec<Appointment>> {
        let mut stmt = db.conn().prepare(
            "SELECT appointment_id, date_time, status, master_id, client_id, service_id
             FROM appointments
             ORDER BY appointment_id",
        )?;
        let appointments = stmt
            .query_map([], |row| {
                Ok(Appointment {
                    appointment_id: row.get(0)?,
                    date_time: row.get(1)?,
                    status: row.get(2)?,
                    master_id: row.get(3)?,
                    client_id: row.get(4)?,
                    service_id: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(appointments)
    }

    /// Scale every service price by `percent`, rounded to cents
    pub fn raise_service_prices(db: &DatabaseConnection, percent: f64) -> Result<usize> {
        let updated = db.conn().execute(
            "UPDATE services SET price = ROUND(price * (100.0 + ?1) / 100.0, 2)",
            params![percent],
        )?;
        Ok(updated)
    }

    /// Mark booked appointments that started before `now` as completed
    pub fn complete_past_appointments(db: &DatabaseConnection, now: NaiveDateTime) -> Result<usize> {
        let updated = db.conn().execute(
            "UPDATE appointments SET status = ?1 WHERE status = ?2 AND date_time < ?3",
            params![
                AppointmentStatus::Completed,
                AppointmentStatus::Booked,
                format_timestamp(now)
            ],
        )?;
        Ok(updated)
    }

    /// Insert a booked appointment, returning its id and the inserted row count
    pub fn book_appointment(db: &DatabaseConnection, booking: &NewBooking<'_>) -> Result<(i64, usize)> {
        let conn = db.conn();
        let inserted = conn.execute(
            "INSERT INTO appointments (date_time, status, master_id, client_id, service_id)
             VALUES (
                 ?1,
                 ?2,
                 (SELECT master_id FROM masters WHERE name = ?3),
                 (SELECT client_id FROM clients WHERE email = ?4),
                 (SELECT service_id FROM services WHERE name = ?5)
             )",
            params![
                format_timestamp(booking.date_time),
                AppointmentStatus::Booked,
                booking.master_name,
                booking.client_email,
                booking.service_name,
            ],
        )?;
        Ok((conn.last_insert_rowid(), inserted))
    }

    /// Delete canceled appointments dated on or before `run_date`, whatever their time of day
    pub fn purge_canceled_appointments(db: &DatabaseConnection, run_date: NaiveDate) -> Result<usize> {
        let deleted = db.conn().execute(
            "DELETE FROM appointments WHERE status = ?1 AND date(date_time) <= date(?2)",
            params![AppointmentStatus::Canceled, format_date(run_date)],
        )?;
        Ok(deleted)
    }
}
