// Business/company tracker: departments, staff, client projects and tickets
use chrono::NaiveDateTime;

use super::{CannedQuery, MutationOutcome, Scenario};
use crate::db::connection::DatabaseConnection;
use crate::db::migrations::Schema;
use crate::db::models::TicketStatus;
use crate::db::operations::DbOperations;
use crate::error::Result;

pub const RAISED_DEPARTMENT: &str = "R&D";
pub const RAISE_AMOUNT_USD: f64 = 500.0;
pub const CLOSED_PROJECT: &str = "Super App";

static SCHEMA: Schema = Schema {
    drop_order: &[
        "tickets",
        "employee_projects",
        "projects",
        "employees",
        "clients",
        "roles",
        "departments",
    ],
    create_sql: "
    CREATE TABLE departments (
        dept_id INTEGER PRIMARY KEY,
        name    TEXT NOT NULL UNIQUE
    );

    CREATE TABLE roles (
        role_id INTEGER PRIMARY KEY,
        name    TEXT NOT NULL UNIQUE
    );

    CREATE TABLE clients (
        client_id INTEGER PRIMARY KEY,
        name      TEXT NOT NULL,
        country   TEXT
    );

    CREATE TABLE employees (
        emp_id     INTEGER PRIMARY KEY,
        full_name  TEXT NOT NULL,
        email      TEXT UNIQUE,
        hire_date  TEXT NOT NULL,
        dept_id    INTEGER,
        role_id    INTEGER,
        salary_usd REAL NOT NULL CHECK (salary_usd > 0),
        FOREIGN KEY (dept_id) REFERENCES departments(dept_id),
        FOREIGN KEY (role_id) REFERENCES roles(role_id)
    );

    CREATE TABLE projects (
        project_id  INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        client_id   INTEGER,
        start_date  TEXT NOT NULL,
        due_date    TEXT,
        budget_usd  REAL,
        status      TEXT CHECK (status IN ('planned', 'active', 'on-hold', 'done')),
        FOREIGN KEY (client_id) REFERENCES clients(client_id)
    );

    CREATE TABLE employee_projects (
        emp_id      INTEGER,
        project_id  INTEGER,
        assigned_at TEXT NOT NULL,
        PRIMARY KEY (emp_id, project_id),
        FOREIGN KEY (emp_id) REFERENCES employees(emp_id),
        FOREIGN KEY (project_id) REFERENCES projects(project_id)
    );

    CREATE TABLE tickets (
        ticket_id  INTEGER PRIMARY KEY,
        project_id INTEGER,
        title      TEXT NOT NULL,
        created_at TEXT NOT NULL,
        status     TEXT CHECK (status IN ('open', 'in-progress', 'closed')) DEFAULT 'open',
        FOREIGN KEY (project_id) REFERENCES projects(project_id)
    );
    ",
};

const SEED_SQL: &str = "
    INSERT INTO departments (name) VALUES ('R&D'), ('QA'), ('Sales');
    INSERT INTO roles (name) VALUES ('Developer'), ('QA Engineer'), ('Manager');
    INSERT INTO clients (name, country) VALUES ('Acme Corp', 'USA'), ('Sakura', 'Japan');

    INSERT INTO employees (full_name, email, hire_date, dept_id, role_id, salary_usd) VALUES
    ('Ivan Petrenko', 'ivan@itco.com', '2023-01-10', 1, 1, 4000),
    ('Maria Koval', 'maria@itco.com', '2024-05-15', 2, 2, 3500),
    ('Oleg Bondar', 'oleg@itco.com', '2022-08-20', 1, 1, 4200),
    ('Anna Svit', 'anna@itco.com', '2021-11-01', 3, 3, 5000);

    INSERT INTO projects (name, client_id, start_date, due_date, budget_usd, status) VALUES
    ('Super App', 1, '2024-01-01', '2025-12-31', 100000, 'active'),
    ('Legacy System', 1, '2022-01-01', '2023-01-01', 50000, 'done'),
    ('New Website', 2, '2025-02-01', '2025-06-01', 20000, 'planned');

    INSERT INTO employee_projects (emp_id, project_id, assigned_at) VALUES
    (1, 1, '2024-01-05'),
    (2, 1, '2024-02-01'),
    (3, 2, '2022-01-05');

    INSERT INTO tickets (project_id, title, created_at, status) VALUES
    (1, 'Fix login bug', '2025-03-01', 'open'),
    (1, 'Update logo', '2025-03-05', 'in-progress'),
    (2, 'Cleanup database', '2022-10-10', 'closed');
";

const SEED_COUNTS: &[(&str, i64)] = &[
    ("departments", 3),
    ("roles", 3),
    ("clients", 2),
    ("employees", 4),
    ("projects", 3),
    ("employee_projects", 3),
    ("tickets", 3),
];

pub const EMPLOYEE_SALARIES: CannedQuery = CannedQuery {
    title: "Employees and salaries",
    sql: "
    SELECT e.full_name, d.name AS dept, e.salary_usd
    FROM employees e
    JOIN departments d ON e.dept_id = d.dept_id
    ORDER BY e.emp_id;
    ",
};

pub const SUPER_APP_TICKETS: CannedQuery = CannedQuery {
    title: "Super App tickets (expected closed)",
    sql: "
    SELECT t.title, p.name AS project, t.status
    FROM tickets t
    JOIN projects p ON t.project_id = p.project_id
    WHERE p.name = 'Super App'
    ORDER BY t.ticket_id;
    ",
};

const QUERIES: &[CannedQuery] = &[
    EMPLOYEE_SALARIES,
    CannedQuery {
        title: "Active projects",
        sql: "SELECT name, budget_usd, status FROM projects WHERE status = 'active';",
    },
    CannedQuery {
        title: "Employees by seniority",
        sql: "
        SELECT e.full_name, r.name AS role, e.hire_date
        FROM employees e
        JOIN roles r ON e.role_id = r.role_id
        ORDER BY e.hire_date;
        ",
    },
    CannedQuery {
        title: "Headcount and payroll per department",
        sql: "
        SELECT d.name AS dept, COUNT(e.emp_id) AS headcount, COALESCE(SUM(e.salary_usd), 0) AS payroll
        FROM departments d
        LEFT JOIN employees e ON e.dept_id = d.dept_id
        GROUP BY d.dept_id
        ORDER BY d.dept_id;
        ",
    },
    CannedQuery {
        title: "Average salary by role",
        sql: "
        SELECT r.name AS role, ROUND(AVG(e.salary_usd), 2) AS avg_salary
        FROM roles r
        JOIN employees e ON e.role_id = r.role_id
        GROUP BY r.role_id
        ORDER BY avg_salary DESC;
        ",
    },
    CannedQuery {
        title: "Highest paid employee",
        sql: "SELECT full_name, salary_usd FROM employees ORDER BY salary_usd DESC LIMIT 1;",
    },
    CannedQuery {
        title: "Project portfolio per client",
        sql: "
        SELECT c.name AS client, c.country, COUNT(p.project_id) AS projects, SUM(p.budget_usd) AS total_budget
        FROM clients c
        LEFT JOIN projects p ON p.client_id = c.client_id
        GROUP BY c.client_id
        ORDER BY c.client_id;
        ",
    },
    CannedQuery {
        title: "Project assignments",
        sql: "
        SELECT e.full_name, p.name AS project, ep.assigned_at
        FROM employee_projects ep
        JOIN employees e ON e.emp_id = ep.emp_id
        JOIN projects p ON p.project_id = ep.project_id
        ORDER BY ep.assigned_at;
        ",
    },
    CannedQuery {
        title: "Employees without projects",
        sql: "
        SELECT e.full_name, e.email
        FROM employees e
        LEFT JOIN employee_projects ep ON ep.emp_id = e.emp_id
        WHERE ep.emp_id IS NULL;
        ",
    },
    CannedQuery {
        title: "Unassigned projects",
        sql: "
        SELECT p.name, p.status
        FROM projects p
        WHERE NOT EXISTS (SELECT 1 FROM employee_projects ep WHERE ep.project_id = p.project_id);
        ",
    },
    CannedQuery {
        title: "Tickets not yet closed",
        sql: "
        SELECT t.title, p.name AS project, t.created_at, t.status
        FROM tickets t
        JOIN projects p ON p.project_id = t.project_id
        WHERE t.status <> 'closed'
        ORDER BY t.created_at;
        ",
    },
    CannedQuery {
        title: "Ticket count per status",
        sql: "SELECT status, COUNT(*) AS tickets FROM tickets GROUP BY status ORDER BY status;",
    },
    CannedQuery {
        title: "Projects on hold",
        sql: "SELECT name, due_date FROM projects WHERE status = 'on-hold';",
    },
];

const VERIFICATION_QUERIES: &[CannedQuery] = &[
    CannedQuery {
        title: "Updated salaries (R&D +500)",
        sql: EMPLOYEE_SALARIES.sql,
    },
    SUPER_APP_TICKETS,
];

pub struct Company;

impl Scenario for Company {
    fn name(&self) -> &'static str {
        "company"
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

    fn mutate(&self, db: &DatabaseConnection, _now: NaiveDateTime) -> Result<Vec<MutationOutcome>> {
        let raised = DbOperations::raise_department_salary(db, RAISED_DEPARTMENT, RAISE_AMOUNT_USD)?;
        let closed = DbOperations::set_project_ticket_status(db, CLOSED_PROJECT, TicketStatus::Closed)?;

        Ok(vec![
            MutationOutcome {
                label: "Salaries raised",
                affected: raised,
            },
            MutationOutcome {
                label: "Tickets closed",
                affected: closed,
            },
        ])
    }

    fn verification_queries(&self) -> &'static [CannedQuery] {
        VERIFICATION_QUERIES
    }
}
