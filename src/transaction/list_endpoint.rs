//! Defines the endpoints for listing transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::ResidentId,
    transaction::{
        TransactionState, TransactionView, get_all_transaction_views,
        get_transaction_views_for_resident,
    },
};

/// A route handler that responds with every transaction.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
) -> Result<Json<Vec<TransactionView>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_transaction_views(&connection).map(Json)
}

/// A route handler that responds with the transactions of one resident, or
/// 404 if the resident does not exist.
pub async fn list_resident_transactions_endpoint(
    State(state): State<TransactionState>,
    Path(resident_id): Path<ResidentId>,
) -> Result<Json<Vec<TransactionView>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transaction_views_for_resident(resident_id, &connection).map(Json)
}
