// Database connection management
use rusqlite::Connection;
use std::path::Path;

use crate::error::{Error, Result};

/// A single open database handle with foreign keys enforced.
pub struct DatabaseConnection {
    conn: Connection,
}

impl DatabaseConnection {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;
        enable_foreign_keys(&conn)?;
        tracing::debug!(path = %db_path.display(), "database opened");

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        enable_foreign_keys(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Database(e))?;
        tracing::debug!("database closed");
        Ok(())
    }
}

fn enable_foreign_keys(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    Ok(())
}
