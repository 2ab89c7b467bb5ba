//! Read views of transactions with the resident and goal names filled in.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{
    Error, Resource,
    database_id::{ResidentId, TransactionId},
    not_found_as,
    resident::get_resident,
    transaction::{Transaction, db::map_transaction_row},
};

/// A transaction along with the names staff need to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    /// The transaction itself.
    #[serde(flatten)]
    pub transaction: Transaction,
    /// The display name of the resident, if they have one.
    pub resident_display_name: Option<String>,
    /// The title of the referenced goal, if any.
    pub goal_title: Option<String>,
}

const VIEW_QUERY: &str = "SELECT t.id, t.resident_id, t.goal_id, t.points, t.timestamp,
        t.staff_name, t.note, t.override_points, r.display_name, g.title
    FROM \"transaction\" t
    INNER JOIN resident r ON r.id = t.resident_id
    LEFT JOIN goal g ON g.id = t.goal_id";

fn map_view_row(row: &Row) -> Result<TransactionView, rusqlite::Error> {
    Ok(TransactionView {
        transaction: map_transaction_row(row)?,
        resident_display_name: row.get(8)?,
        goal_title: row.get(9)?,
    })
}

/// Get the view of a single transaction.
///
/// # Errors
/// Returns an [Error::NotFound] if there is no transaction with `id`.
pub fn get_transaction_view(
    id: TransactionId,
    connection: &Connection,
) -> Result<TransactionView, Error> {
    connection
        .prepare(&format!("{VIEW_QUERY} WHERE t.id = :id"))?
        .query_row(&[(":id", &id)], map_view_row)
        .map_err(not_found_as(Resource::Transaction))
}

/// Get every transaction, oldest first.
pub fn get_all_transaction_views(connection: &Connection) -> Result<Vec<TransactionView>, Error> {
    connection
        .prepare(&format!("{VIEW_QUERY} ORDER BY t.id ASC"))?
        .query_map([], map_view_row)?
        .map(|maybe_view| maybe_view.map_err(Error::from))
        .collect()
}

/// Get the transactions posted against a resident, oldest first.
///
/// # Errors
/// Returns an [Error::NotFound] if the resident does not exist.
pub fn get_transaction_views_for_resident(
    resident_id: ResidentId,
    connection: &Connection,
) -> Result<Vec<TransactionView>, Error> {
    let resident = get_resident(resident_id, connection)?;

    connection
        .prepare(
            "SELECT t.id, t.resident_id, t.goal_id, t.points, t.timestamp,
                t.staff_name, t.note, t.override_points, g.title
            FROM \"transaction\" t
            LEFT JOIN goal g ON g.id = t.goal_id
            WHERE t.resident_id = :resident_id
            ORDER BY t.id ASC",
        )?
        .query_map(&[(":resident_id", &resident_id)], |row| {
            Ok(TransactionView {
                transaction: map_transaction_row(row)?,
                resident_display_name: resident.display_name.clone(),
                goal_title: row.get(8)?,
            })
        })?
        .map(|maybe_view| maybe_view.map_err(Error::from))
        .collect()
}
