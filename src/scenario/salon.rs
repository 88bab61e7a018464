// Salon booking: masters, clients, services and appointments
use chrono::{Duration, NaiveDateTime};

use super::{CannedQuery, MutationOutcome, Scenario};
use crate::db::connection::DatabaseConnection;
use crate::db::migrations::Schema;
use crate::db::operations::{DbOperations, NewBooking};
use crate::error::Result;

pub const PRICE_RAISE_PERCENT: f64 = 10.0;

/// Booking placed by the mutation sequence, one day after the run timestamp
pub const WALK_IN_MASTER: &str = "Iryna Lysenko";
pub const WALK_IN_CLIENT_EMAIL: &str = "kateryna@mail.com";
pub const WALK_IN_SERVICE: &str = "Facial Treatment";

static SCHEMA: Schema = Schema {
    drop_order: &["appointments", "services", "clients", "masters"],
    create_sql: "
    CREATE TABLE masters (
        master_id      INTEGER PRIMARY KEY,
        name           TEXT NOT NULL,
        specialization TEXT NOT NULL,
        work_hours     TEXT NOT NULL
    );

    CREATE TABLE clients (
        client_id INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL,
        email     TEXT UNIQUE,
        phone     TEXT
    );

    CREATE TABLE services (
        service_id       INTEGER PRIMARY KEY,
        name             TEXT NOT NULL UNIQUE,
        price            REAL NOT NULL CHECK (price > 0),
        duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
        description      TEXT
    );

    CREATE TABLE appointments (
        appointment_id INTEGER PRIMARY KEY,
        date_time      TEXT NOT NULL,
        status         TEXT NOT NULL CHECK (status IN ('booked', 'completed', 'canceled')) DEFAULT 'booked',
        master_id      INTEGER NOT NULL,
        client_id      INTEGER NOT NULL,
        service_id     INTEGER NOT NULL,
        FOREIGN KEY (master_id) REFERENCES masters(master_id),
        FOREIGN KEY (client_id) REFERENCES clients(client_id),
        FOREIGN KEY (service_id) REFERENCES services(service_id)
    );
    ",
};

const SEED_SQL: &str = "
    INSERT INTO masters (name, specialization, work_hours) VALUES
    ('Oksana Melnyk', 'Hair stylist', '09:00-17:00'),
    ('Taras Hnatyuk', 'Nail technician', '10:00-18:00'),
    ('Iryna Lysenko', 'Cosmetologist', '12:00-20:00');

    INSERT INTO clients (full_name, email, phone) VALUES
    ('Olena Shevchenko', 'olena@mail.com', '+380501112233'),
    ('Dmytro Kovalenko', 'dmytro@mail.com', '+380672223344'),
    ('Sofia Bondarenko', 'sofia@mail.com', NULL),
    ('Andriy Tkachenko', 'andriy@mail.com', '+380934445566'),
    ('Kateryna Moroz', 'kateryna@mail.com', '+380995556677');

    INSERT INTO services (name, price, duration_minutes, description) VALUES
    ('Haircut', 25.0, 45, 'Wash, cut and style'),
    ('Manicure', 45.0, 60, 'Classic manicure with gel polish'),
    ('Hair Coloring', 85.0, 120, 'Full color with toner'),
    ('Facial Treatment', 55.0, 75, NULL);

    INSERT INTO appointments (date_time, status, master_id, client_id, service_id) VALUES
    ('2025-03-10 10:00', 'completed', 1, 1, 1),
    ('2025-03-11 12:30', 'canceled', 2, 2, 2),
    ('2025-04-02 15:00', 'booked', 1, 3, 3),
    ('2025-04-05 09:00', 'canceled', 3, 4, 4),
    ('2030-05-20 11:00', 'booked', 2, 1, 2),
    ('2030-06-01 14:00', 'canceled', 3, 2, 4),
    ('2030-06-03 16:30', 'booked', 1, 4, 1);
";

const SEED_COUNTS: &[(&str, i64)] = &[
    ("masters", 3),
    ("clients", 5),
    ("services", 4),
    ("appointments", 7),
];

pub const APPOINTMENT_OVERVIEW: CannedQuery = CannedQuery {
    title: "Appointment overview",
    sql: "
    SELECT a.date_time, m.name AS master, c.full_name AS client, s.name AS service, s.price, a.status
    FROM appointments a
    JOIN masters m ON m.master_id = a.master_id
    JOIN clients c ON c.client_id = a.client_id
    JOIN services s ON s.service_id = a.service_id
    ORDER BY a.date_time;
    ",
};

const QUERIES: &[CannedQuery] = &[
    CannedQuery {
        title: "Masters",
        sql: "SELECT name, specialization, work_hours FROM masters ORDER BY master_id;",
    },
    CannedQuery {
        title: "Service menu",
        sql: "SELECT name, price, duration_minutes, description FROM services ORDER BY price;",
    },
    APPOINTMENT_OVERVIEW,
    CannedQuery {
        title: "Appointments per master",
        sql: "
        SELECT m.name AS master, COUNT(a.appointment_id) AS appointments
        FROM masters m
        LEFT JOIN appointments a ON a.master_id = m.master_id
        GROUP BY m.master_id
        ORDER BY appointments DESC, m.name;
        ",
    },
    CannedQuery {
        title: "Revenue from completed appointments",
        sql: "
        SELECT m.name AS master, COALESCE(SUM(s.price), 0) AS revenue
        FROM masters m
        LEFT JOIN appointments a ON a.master_id = m.master_id AND a.status = 'completed'
        LEFT JOIN services s ON s.service_id = a.service_id
        GROUP BY m.master_id
        ORDER BY m.master_id;
        ",
    },
    CannedQuery {
        title: "Visits per client",
        sql: "
        SELECT c.full_name, COUNT(a.appointment_id) AS visits
        FROM clients c
        LEFT JOIN appointments a ON a.client_id = c.client_id AND a.status <> 'canceled'
        GROUP BY c.client_id
        ORDER BY c.client_id;
        ",
    },
    CannedQuery {
        title: "Clients who never booked",
        sql: "
        SELECT full_name, email
        FROM clients
        WHERE client_id NOT IN (SELECT client_id FROM appointments);
        ",
    },
    CannedQuery {
        title: "Clients without phone",
        sql: "SELECT full_name, email FROM clients WHERE phone IS NULL;",
    },
    CannedQuery {
        title: "Canceled appointments",
        sql: "
        SELECT a.date_time, c.full_name AS client, s.name AS service
        FROM appointments a
        JOIN clients c ON c.client_id = a.client_id
        JOIN services s ON s.service_id = a.service_id
        WHERE a.status = 'canceled'
        ORDER BY a.date_time;
        ",
    },
    CannedQuery {
        title: "Services longer than an hour",
        sql: "SELECT name, duration_minutes FROM services WHERE duration_minutes > 60 ORDER BY duration_minutes DESC;",
    },
    CannedQuery {
        title: "Most requested service",
        sql: "
        SELECT s.name, COUNT(*) AS bookings
        FROM appointments a
        JOIN services s ON s.service_id = a.service_id
        GROUP BY s.service_id
        ORDER BY bookings DESC, s.name
        LIMIT 1;
        ",
    },
    CannedQuery {
        title: "Appointment count per status",
        sql: "SELECT status, COUNT(*) AS appointments FROM appointments GROUP BY status ORDER BY status;",
    },
];

const VERIFICATION_QUERIES: &[CannedQuery] = &[
    CannedQuery {
        title: "Service menu after price raise",
        sql: "SELECT name, price FROM services ORDER BY service_id;",
    },
    CannedQuery {
        title: "Appointments after updates",
        sql: APPOINTMENT_OVERVIEW.sql,
    },
];

pub struct Salon;

impl Scenario for Salon {
    fn name(&self) -> &'static str {
        "salon"
    }

    fn schema(&self) -> &'static Schema {
        &SCHEMA
    }

    fn seed_sql(&self) -> &'static str {
        SEED_SQL
    }

    fn seed_counts(&self) -> &'static [(&'static str, i64)] {
        SEED_COUNTS
    }

    fn queries(&self) -> &'static [CannedQuery] {
        QUERIES
    }

    fn mutate(&self, db: &DatabaseConnection, now: NaiveDateTime) -> Result<Vec<MutationOutcome>> {
        let repriced = DbOperations::raise_service_prices(db, PRICE_RAISE_PERCENT)?;
        let completed = DbOperations::complete_past_appointments(db, now)?;

        let booking = NewBooking {
            date_time: now + Duration::days(1),
            master_name: WALK_IN_MASTER,
            client_email: WALK_IN_CLIENT_EMAIL,
            service_name: WALK_IN_SERVICE,
        };
        let (booked_id, booked) = DbOperations::book_appointment(db, &booking)?;
        tracing::debug!(appointment_id = booked_id, "appointment booked");

        let purged = DbOperations::purge_canceled_appointments(db, now.date())?;

        Ok(vec![
            MutationOutcome {
                label: "Services repriced",
                affected: repriced,
            },
            MutationOutcome {
                label: "Appointments completed",
                affected: completed,
            },
            MutationOutcome {
                label: "Appointments booked",
                affected: booked,
            },
            MutationOutcome {
                label: "Canceled appointments purged",
                affected: purged,
            },
        ])
    }

    fn verification_queries(&self) -> &'static [CannedQuery] {
        VERIFICATION_QUERIES
    }
}
