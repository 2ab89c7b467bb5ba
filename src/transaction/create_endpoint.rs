//! Defines the endpoint for posting a transaction.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    transaction::{PostTransaction, TransactionState, TransactionView, post_transaction},
};

/// A route handler for posting a transaction, responds with the new
/// transaction once the resident's balance has been adjusted.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    WithRejection(Json(request), _): WithRejection<Json<PostTransaction>, Error>,
) -> Result<(StatusCode, Json<TransactionView>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    post_transaction(request, &connection)
        .inspect_err(|error| tracing::debug!("Could not post transaction: {error}"))
        .map(|view| (StatusCode::CREATED, Json(view)))
}
