// Data models
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Declares a status enum stored as its lowercase text label
macro_rules! text_status {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(Error::UnknownStatus(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_status!(ProjectStatus {
    Planned => "planned",
    Active => "active",
    OnHold => "on-hold",
    Done => "done",
});

text_status!(TicketStatus {
    Open => "open",
    InProgress => "in-progress",
    Closed => "closed",
});

text_status!(AppointmentStatus {
    Booked => "booked",
    Completed => "completed",
    Canceled => "canceled",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub emp_id: i64,
    pub full_name: String,
    pub dept_id: Option<i64>,
    pub salary_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: i64,
    pub project_id: Option<i64>,
    pub title: String,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: i64,
    pub name: String,
    pub price: f64,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub date_time: String,
    pub status: AppointmentStatus,
    pub master_id: i64,
    pub client_id: i64,
    pub service_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in TicketStatus::ALL {
            assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), *status);
        }
        assert_eq!(ProjectStatus::OnHold.to_string(), "on-hold");
        assert_eq!(AppointmentStatus::Canceled.as_str(), "canceled");
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("cancelled".parse::<AppointmentStatus>().is_err());
        assert!("Open".parse::<TicketStatus>().is_err());
    }
}
