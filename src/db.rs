//! Database schema setup shared by the residents, goals and transactions.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, goal::create_goal_table, resident::create_resident_table,
    transaction::create_transaction_table,
};

/// Create the tables for the domain models if they do not already exist.
///
/// Foreign keys are switched on for `connection` first, since SQLite leaves
/// them off by default and the cascading deletes rely on them.
///
/// # Errors
/// Returns an error if any of the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Must happen outside of a transaction, SQLite ignores it otherwise.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_resident_table(&transaction)?;
    create_goal_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
