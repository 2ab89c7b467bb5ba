//! The resident model and the database queries for residents.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::{Error, Patch, Resource, database_id::ResidentId, non_blank, not_found_as};

/// A person whose token balance is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    /// The ID of the resident.
    pub id: ResidentId,
    /// The resident's first name.
    pub first_name: String,
    /// The resident's last name.
    pub last_name: String,
    /// The name shown to staff, e.g. a nickname.
    pub display_name: Option<String>,
    /// The running total of points posted against the resident.
    ///
    /// Only posting a transaction changes this, apart from an explicit edit
    /// through [update_resident].
    pub token_balance: i64,
}

/// The data needed to create a resident.
///
/// New residents always start with a balance of zero.
#[derive(Debug, Clone, Deserialize)]
pub struct NewResident {
    /// The resident's first name.
    pub first_name: String,
    /// The resident's last name.
    pub last_name: String,
    /// The name shown to staff.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// The fields to change on a resident. Fields left as [Patch::Missing] are
/// not touched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResidentUpdate {
    /// A new first name.
    #[serde(default)]
    pub first_name: Patch<String>,
    /// A new last name.
    #[serde(default)]
    pub last_name: Patch<String>,
    /// A new display name, or null to clear it.
    #[serde(default)]
    pub display_name: Patch<String>,
    /// Overwrite the balance directly.
    ///
    /// The transaction history is not reconciled with the new balance.
    #[serde(default)]
    pub token_balance: Patch<i64>,
}

/// Create the resident table if it does not exist.
pub fn create_resident_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS resident (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            display_name TEXT,
            token_balance INTEGER NOT NULL DEFAULT 0
        )",
        (),
    )?;

    Ok(())
}

/// Map a row of `id, first_name, last_name, display_name, token_balance` to a [Resident].
pub fn map_row_to_resident(row: &Row) -> Result<Resident, rusqlite::Error> {
    Ok(Resident {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        display_name: row.get(3)?,
        token_balance: row.get(4)?,
    })
}

/// Create a resident with a zero balance.
///
/// # Errors
/// Returns an [Error::EmptyField] if either name is blank, or an
/// [Error::SqlError] if the insert fails.
pub fn create_resident(resident: NewResident, connection: &Connection) -> Result<Resident, Error> {
    let first_name = non_blank(&resident.first_name, "first_name")?;
    let last_name = non_blank(&resident.last_name, "last_name")?;

    let resident = connection
        .prepare(
            "INSERT INTO resident (first_name, last_name, display_name, token_balance)
             VALUES (?1, ?2, ?3, 0)
             RETURNING id, first_name, last_name, display_name, token_balance",
        )?
        .query_row(
            params![first_name, last_name, resident.display_name],
            map_row_to_resident,
        )?;

    Ok(resident)
}

/// Retrieve a single resident by ID.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no resident with `id`.
pub fn get_resident(id: ResidentId, connection: &Connection) -> Result<Resident, Error> {
    connection
        .prepare(
            "SELECT id, first_name, last_name, display_name, token_balance
             FROM resident WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row_to_resident)
        .map_err(not_found_as(Resource::Resident))
}

/// Retrieve all residents in the order they were created.
pub fn get_all_residents(connection: &Connection) -> Result<Vec<Resident>, Error> {
    connection
        .prepare(
            "SELECT id, first_name, last_name, display_name, token_balance
             FROM resident ORDER BY id ASC",
        )?
        .query_map([], map_row_to_resident)?
        .map(|maybe_resident| maybe_resident.map_err(Error::from))
        .collect()
}

/// Apply the fields present in `update` to the resident `id` and return the result.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no resident with `id`, or a
/// validation error if a name is set to null or a blank string.
pub fn update_resident(
    id: ResidentId,
    update: ResidentUpdate,
    connection: &Connection,
) -> Result<Resident, Error> {
    let mut resident = get_resident(id, connection)?;

    update
        .first_name
        .map(|name| non_blank(&name, "first_name"))
        .transpose()?
        .apply_required(&mut resident.first_name, "first_name")?;
    update
        .last_name
        .map(|name| non_blank(&name, "last_name"))
        .transpose()?
        .apply_required(&mut resident.last_name, "last_name")?;
    update.display_name.apply(&mut resident.display_name);
    update
        .token_balance
        .apply_required(&mut resident.token_balance, "token_balance")?;

    connection.execute(
        "UPDATE resident
         SET first_name = ?1, last_name = ?2, display_name = ?3, token_balance = ?4
         WHERE id = ?5",
        params![
            resident.first_name,
            resident.last_name,
            resident.display_name,
            resident.token_balance,
            resident.id
        ],
    )?;

    Ok(resident)
}

/// Delete a resident along with their private goals and all their transactions.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no resident with `id`.
pub fn delete_resident(id: ResidentId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM resident WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound(Resource::Resident));
    }

    Ok(())
}
