//! Goal listing endpoint.

use axum::{Json, extract::State};

use crate::{
    Error,
    goal::{Goal, GoalState, get_all_goals},
};

/// Respond with every goal, shared and private.
pub async fn list_goals_endpoint(State(state): State<GoalState>) -> Result<Json<Vec<Goal>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_goals(&connection).map(Json)
}
