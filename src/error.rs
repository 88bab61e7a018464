// Crate error type
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to read settings file {path:?}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path:?}: {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create database directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no such table: {0}")]
    UnknownTable(String),

    #[error("table {table} holds {actual} rows after seeding, expected {expected}")]
    SeedCount {
        table: &'static str,
        expected: i64,
        actual: i64,
    },

    #[error("unknown status value: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
