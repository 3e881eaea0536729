//! The schema/CRUD exerciser.
//!
//! One [`Exerciser`] owns one connection for a whole run. Every step takes
//! that connection explicitly; each group of writes runs in its own
//! transaction and is committed before the next step starts. The first
//! failing step aborts the run, and the connection is released when the
//! exerciser is dropped.

use hunters_common::{Error, HunterId, Result};
use hunters_db::queries::hunters;
use hunters_db::{connection, schema, Execution, Hunter};
use rusqlite::Connection;

use crate::config::{DbConfig, ExercisePlan, UpdatePlan};

/// Everything a run observed, in step order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Rows removed by the clearing step (0 when clearing is disabled)
    pub cleared: usize,
    /// Rows written by all insert steps
    pub inserted: usize,
    /// Full scan after the inserts
    pub all: Vec<Hunter>,
    /// Filtered select
    pub filtered: Vec<Hunter>,
    /// Ranged select
    pub ranged: Vec<Hunter>,
    /// Affected-row count of the delete
    pub deleted: usize,
    /// Affected-row count of the update
    pub updated: usize,
    /// Full scan after the delete and update
    pub final_rows: Vec<Hunter>,
    pub result_count: usize,
    pub row_count: usize,
    pub last_insert_id: Option<HunterId>,
    /// Cursor position after fetching the final rows
    pub position: usize,
}

pub struct Exerciser {
    conn: Connection,
}

impl Exerciser {
    /// Open the database described by `config`.
    pub fn connect(config: &DbConfig) -> Result<Self> {
        let path = config.database_path();
        tracing::info!(
            user = %config.user,
            database = %config.database,
            "Connecting to {}",
            path.display()
        );
        let conn = connection::open(&path)?;
        Ok(Self::new(conn))
    }

    /// Run against an already open connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| Error::database(format!("Failed to close connection: {}", e)))?;
        tracing::info!("Connection released");
        Ok(())
    }

    /// Run `f` inside a transaction and commit it.
    ///
    /// If `f` fails the transaction is dropped, which rolls it back.
    fn in_transaction<T, F>(&mut self, step: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        let conn: &Connection = &tx;
        let out = f(conn)?;

        tx.commit()
            .map_err(|e| Error::database(format!("Failed to commit {}: {}", step, e)))?;
        tracing::debug!(step, "Committed");
        Ok(out)
    }

    pub fn ensure_schema(&self) -> Result<()> {
        tracing::info!("Ensuring hunters table");
        schema::ensure_hunters_table(&self.conn)
    }

    pub fn clear(&mut self) -> Result<usize> {
        tracing::info!("Clearing hunters table");
        self.in_transaction("clear", schema::clear_hunters_table)
    }

    /// Insert the plan's rows using each binding style in turn.
    ///
    /// Returns the total number of rows written.
    pub fn insert_samples(&mut self, plan: &ExercisePlan) -> Result<usize> {
        let mut executions: Vec<Execution> = Vec::with_capacity(4);

        tracing::info!("Inserting with positional parameters");
        let row = &plan.positional;
        executions.push(self.in_transaction("positional insert", |conn| {
            hunters::insert_positional(conn, &row.name, row.age, &row.unit)
        })?);

        tracing::info!("Inserting with named parameters");
        executions.push(self.in_transaction("named insert", |conn| {
            hunters::insert_named(conn, &plan.named)
        })?);

        tracing::info!("Inserting {} rows with named parameters", plan.bulk_named.len());
        executions.push(self.in_transaction("bulk named insert", |conn| {
            hunters::insert_many_named(conn, &plan.bulk_named)
        })?);

        tracing::info!(
            "Inserting {} rows with positional parameters",
            plan.bulk_positional.len()
        );
        let tuples: Vec<(&str, i32, &str)> = plan
            .bulk_positional
            .iter()
            .map(|h| (h.name.as_str(), h.age, h.unit.as_str()))
            .collect();
        executions.push(self.in_transaction("bulk positional insert", |conn| {
            hunters::insert_many_positional(conn, &tuples)
        })?);

        Ok(executions.iter().map(|e| e.affected_rows).sum())
    }

    pub fn delete(&mut self, id: HunterId) -> Result<usize> {
        tracing::info!(%id, "Deleting hunter");
        if let Some(hunter) = hunters::get_by_id(&self.conn, id)? {
            tracing::debug!(?hunter, "Row before delete");
        }
        let execution = self.in_transaction("delete", |conn| hunters::delete_by_id(conn, id))?;
        if execution.affected_rows == 0 {
            tracing::warn!(%id, "Delete matched no hunter");
        }
        Ok(execution.affected_rows)
    }

    pub fn update(&mut self, update: &UpdatePlan) -> Result<usize> {
        let id = update.id;
        tracing::info!(%id, "Updating hunter");
        let execution = self.in_transaction("update", |conn| {
            hunters::update_by_id(conn, id, &update.values)
        })?;
        if execution.affected_rows == 0 {
            tracing::warn!(%id, "Update matched no hunter");
        } else if let Some(hunter) = hunters::get_by_id(&self.conn, id)? {
            tracing::debug!(?hunter, "Row after update");
        }
        Ok(execution.affected_rows)
    }

    /// Run every step of `plan` in order.
    pub fn run(&mut self, plan: &ExercisePlan) -> Result<RunReport> {
        self.ensure_schema()?;

        let cleared = if plan.clear_table {
            self.clear()?
        } else {
            0
        };

        let inserted = self.insert_samples(plan)?;

        tracing::info!("Selecting all hunters");
        let all = hunters::select_all(&self.conn)?.into_rows();
        tracing::info!(ids = ?row_ids(&all), "Full scan returned {} rows", all.len());

        let filter = plan.filter;
        tracing::info!("Selecting hunters where {} > {}", filter.column, filter.greater_than);
        let filtered =
            hunters::select_where_greater(&self.conn, filter.column, filter.greater_than)?
                .into_rows();
        tracing::info!(
            ids = ?row_ids(&filtered),
            "Filtered select returned {} rows",
            filtered.len()
        );

        let range = plan.range;
        tracing::info!("Selecting hunters with id in {}..={}", range.low, range.high);
        let ranged = hunters::select_id_between(&self.conn, range.low, range.high)?.into_rows();
        tracing::info!(
            ids = ?row_ids(&ranged),
            "Ranged select returned {} rows",
            ranged.len()
        );

        let deleted = self.delete(plan.delete_id)?;
        let updated = self.update(&plan.update)?;

        let mut cursor = hunters::select_all(&self.conn)?;
        let final_rows = cursor.fetch_all().to_vec();

        Ok(RunReport {
            cleared,
            inserted,
            all,
            filtered,
            ranged,
            deleted,
            updated,
            final_rows,
            result_count: cursor.result_count(),
            row_count: cursor.row_count(),
            last_insert_id: cursor.last_insert_id(),
            position: cursor.position(),
        })
    }
}

fn row_ids(rows: &[Hunter]) -> Vec<i64> {
    rows.iter().map(|h| h.id.get()).collect()
}
