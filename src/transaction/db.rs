//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, params, types::Type};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, Patch, Resource,
    database_id::{GoalId, ResidentId, TransactionId},
    goal::get_goal,
    non_blank, not_found_as,
    resident::get_resident,
    transaction::timestamp::{format_timestamp, normalize_timestamp},
};

// ============================================================================
// MODELS
// ============================================================================

/// A record of points awarded to, or deducted from, a resident.
///
/// Transactions are created by [crate::post_transaction], which also adjusts
/// the resident's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The resident the points were posted against.
    pub resident_id: ResidentId,
    /// The goal the points were awarded for, if any.
    pub goal_id: Option<GoalId>,
    /// The points applied to the resident's balance.
    ///
    /// Positive values are awards, negative values are deductions.
    pub points: i64,
    /// When the transaction happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// The staff member who posted the transaction.
    pub staff_name: String,
    /// Free-text note from the staff member.
    pub note: Option<String>,
    /// Set when the points differ from the referenced goal's point value.
    pub override_points: bool,
}

/// A transaction that has been validated but not yet written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub resident_id: ResidentId,
    pub goal_id: Option<GoalId>,
    pub points: i64,
    pub timestamp: OffsetDateTime,
    pub staff_name: String,
    pub note: Option<String>,
    pub override_points: bool,
}

/// The fields to change on a transaction.
///
/// Changing the points or removing a transaction does not adjust the
/// resident's balance, only posting does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default)]
    pub resident_id: Patch<ResidentId>,
    /// Null unlinks the transaction from its goal.
    #[serde(default)]
    pub goal_id: Patch<GoalId>,
    #[serde(default)]
    pub points: Patch<i64>,
    /// An ISO 8601 date-time, see [normalize_timestamp].
    #[serde(default)]
    pub timestamp: Patch<String>,
    #[serde(default)]
    pub staff_name: Patch<String>,
    #[serde(default)]
    pub note: Patch<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            resident_id INTEGER NOT NULL,
            goal_id INTEGER,
            points INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            staff_name TEXT NOT NULL,
            note TEXT,
            override_points INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(resident_id) REFERENCES resident(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(goal_id) REFERENCES goal(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_resident_id ON \"transaction\"(resident_id);
        CREATE INDEX IF NOT EXISTS idx_transaction_goal_id ON \"transaction\"(goal_id);",
    )?;

    Ok(())
}

/// Map a row of `id, resident_id, goal_id, points, timestamp, staff_name,
/// note, override_points` to a [Transaction], starting at column `offset`.
///
/// The stored timestamp is normalized to UTC, rows written without an offset
/// are read as UTC.
pub fn map_transaction_row_with_offset(
    row: &Row,
    offset: usize,
) -> Result<Transaction, rusqlite::Error> {
    let raw_timestamp: String = row.get(offset + 4)?;
    let timestamp = normalize_timestamp(&raw_timestamp).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(offset + 4, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(offset)?,
        resident_id: row.get(offset + 1)?,
        goal_id: row.get(offset + 2)?,
        points: row.get(offset + 3)?,
        timestamp,
        staff_name: row.get(offset + 5)?,
        note: row.get(offset + 6)?,
        override_points: row.get(offset + 7)?,
    })
}

pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    map_transaction_row_with_offset(row, 0)
}

/// Write a transaction row. Does not touch the resident's balance.
///
/// Callers are expected to run this inside the same storage transaction as
/// the balance adjustment.
pub(crate) fn insert_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let timestamp = format_timestamp(transaction.timestamp)?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\"
                (resident_id, goal_id, points, timestamp, staff_name, note, override_points)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, resident_id, goal_id, points, timestamp, staff_name, note, override_points",
        )?
        .query_row(
            params![
                transaction.resident_id,
                transaction.goal_id,
                transaction.points,
                timestamp,
                transaction.staff_name,
                transaction.note,
                transaction.override_points,
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction by its `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no transaction with `id`.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, resident_id, goal_id, points, timestamp, staff_name, note, override_points
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(not_found_as(Resource::Transaction))
}

/// Apply the fields present in `update` to the transaction `id`.
///
/// The override flag is derived again whenever the points or the goal change.
/// The resident's balance is left as is.
///
/// # Errors
/// Returns an [Error::NotFound] if the transaction, or a newly referenced
/// resident or goal, does not exist. Returns a validation error for null
/// required fields, a blank staff name or a malformed timestamp.
pub fn update_transaction(
    id: TransactionId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut transaction = get_transaction(id, connection)?;
    let rederive_override = !update.points.is_missing() || !update.goal_id.is_missing();

    if let Patch::Value(resident_id) = update.resident_id {
        get_resident(resident_id, connection)?;
    }
    update
        .resident_id
        .apply_required(&mut transaction.resident_id, "resident_id")?;

    if let Patch::Value(goal_id) = update.goal_id {
        get_goal(goal_id, connection)?;
    }
    update.goal_id.apply(&mut transaction.goal_id);

    update
        .points
        .apply_required(&mut transaction.points, "points")?;
    update
        .timestamp
        .map(|raw| normalize_timestamp(&raw))
        .transpose()?
        .apply_required(&mut transaction.timestamp, "timestamp")?;
    update
        .staff_name
        .map(|name| non_blank(&name, "staff_name"))
        .transpose()?
        .apply_required(&mut transaction.staff_name, "staff_name")?;
    update.note.apply(&mut transaction.note);

    if rederive_override {
        transaction.override_points = match transaction.goal_id {
            Some(goal_id) => get_goal(goal_id, connection)?.points != transaction.points,
            None => false,
        };
    }

    connection.execute(
        "UPDATE \"transaction\"
         SET resident_id = ?1, goal_id = ?2, points = ?3, timestamp = ?4,
             staff_name = ?5, note = ?6, override_points = ?7
         WHERE id = ?8",
        params![
            transaction.resident_id,
            transaction.goal_id,
            transaction.points,
            format_timestamp(transaction.timestamp)?,
            transaction.staff_name,
            transaction.note,
            transaction.override_points,
            transaction.id,
        ],
    )?;

    Ok(transaction)
}

/// Delete a transaction. The resident's balance is left as is.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no transaction with `id`.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound(Resource::Transaction));
    }

    Ok(())
}

/// Count the transactions posted against a resident.
#[cfg(test)]
pub fn count_transactions(resident_id: ResidentId, connection: &Connection) -> i64 {
    connection
        .query_row(
            "SELECT COUNT(*) FROM \"transaction\" WHERE resident_id = ?1",
            [resident_id],
            |row| row.get(0),
        )
        .expect("could not count transactions")
}
