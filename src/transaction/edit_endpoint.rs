//! Defines the endpoint for correcting a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{
        TransactionState, TransactionUpdate, TransactionView, get_transaction_view,
        update_transaction,
    },
};

/// A route handler for updating the fields of a transaction present in the
/// request body. The resident's balance is not adjusted.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    WithRejection(Json(update), _): WithRejection<Json<TransactionUpdate>, Error>,
) -> Result<Json<TransactionView>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_transaction(transaction_id, update, &connection).inspect_err(|error| {
        tracing::debug!("Could not update transaction {transaction_id}: {error}")
    })?;
    tracing::info!("Updated transaction {transaction_id}");

    get_transaction_view(transaction_id, &connection).map(Json)
}

#[cfg(test)]
mod update_transaction_endpoint_tests {
    use axum::{
        Json,
        extract::{Path, State},
    };
    use axum_extra::extract::WithRejection;

    use crate::{
        Error, Patch, Resource, get_resident,
        transaction::{
            PostTransaction, TransactionUpdate, get_test_transaction_state,
            must_create_test_resident, post_transaction, update_transaction_endpoint,
        },
    };

    #[tokio::test]
    async fn updates_fields_without_touching_balance() {
        let state = get_test_transaction_state();
        let resident = must_create_test_resident(&state);
        let posted = post_transaction(
            PostTransaction {
                resident_id: resident.id,
                goal_id: None,
                points: Some(3),
                timestamp: None,
                staff_name: "Sam".to_owned(),
                note: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        let update = TransactionUpdate {
            points: Patch::Value(8),
            staff_name: Patch::Value("Jo".to_owned()),
            ..Default::default()
        };

        let Json(view) = update_transaction_endpoint(
            State(state.clone()),
            Path(posted.transaction.id),
            WithRejection(Json(update), Default::default()),
        )
        .await
        .expect("could not update transaction");

        assert_eq!(view.transaction.points, 8);
        assert_eq!(view.transaction.staff_name, "Jo");
        assert_eq!(view.resident_display_name, Some("Ali".to_owned()));
        assert_eq!(
            get_resident(resident.id, &state.db_connection.lock().unwrap())
                .unwrap()
                .token_balance,
            3
        );
    }

    #[tokio::test]
    async fn update_missing_transaction_returns_not_found() {
        let state = get_test_transaction_state();

        let result = update_transaction_endpoint(
            State(state),
            Path(42),
            WithRejection(Json(TransactionUpdate::default()), Default::default()),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound(Resource::Transaction)));
    }
}
