// Schema (re)creation and seeding
use rusqlite::Connection;

use crate::error::Result;

/// Fixed table layout for one scenario
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Table names, children before parents
    pub drop_order: &'static [&'static str],
    /// `CREATE TABLE` statements, parents before children
    pub create_sql: &'static str,
}

impl Schema {
    fn drop_sql(&self) -> String {
        self.drop_order
            .iter()
            .map(|table| format!("DROP TABLE IF EXISTS {};\n", table))
            .collect()
    }
}

/// Drop every table of the schema and create it again from scratch.
///
/// Drops and creates run as one batch, so a rerun against an existing
/// database file ends in the same empty layout.
pub fn reset_schema(conn: &Connection, schema: &Schema) -> Result<()> {
    let mut batch = schema.drop_sql();
    batch.push_str(schema.create_sql);
    conn.execute_batch(&batch)?;

    tracing::info!(tables = schema.drop_order.len(), "schema recreated");
    Ok(())
}

/// Insert the literal seed rows inside one transaction
pub fn load_seed(conn: &Connection, seed_sql: &str) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(seed_sql)?;
    tx.commit()?;

    tracing::info!("seed data loaded");
    Ok(())
}
