//! Transactions record points awarded to or deducted from residents.

mod create_endpoint;
mod db;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod posting;
mod timestamp;
mod view;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create_endpoint::create_transaction_endpoint;
pub use db::{
    Transaction, TransactionUpdate, create_transaction_table, delete_transaction, get_transaction,
    update_transaction,
};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::update_transaction_endpoint;
pub use list_endpoint::{list_resident_transactions_endpoint, list_transactions_endpoint};
pub use posting::{PostTransaction, effective_points, post_transaction};
pub use timestamp::normalize_timestamp;
pub use view::{
    TransactionView, get_all_transaction_views, get_transaction_view,
    get_transaction_views_for_resident,
};

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[cfg(test)]
fn get_test_transaction_state() -> TransactionState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    crate::db::initialize(&connection).expect("Could not initialize database");

    TransactionState {
        db_connection: Arc::new(Mutex::new(connection)),
    }
}

#[cfg(test)]
fn must_create_test_resident(state: &TransactionState) -> crate::Resident {
    crate::create_resident(
        crate::NewResident {
            first_name: "Alice".to_owned(),
            last_name: "Smith".to_owned(),
            display_name: Some("Ali".to_owned()),
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test resident")
}
