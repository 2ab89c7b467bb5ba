//! Transaction deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{TransactionState, delete_transaction},
};

/// Handle transaction deletion. The resident's balance is not adjusted.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::debug!("Could not delete transaction {transaction_id}: {error}")
    })?;
    tracing::info!("Deleted transaction {transaction_id}");

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
