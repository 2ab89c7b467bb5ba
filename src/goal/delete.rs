//! Goal deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    Error,
    database_id::GoalId,
    goal::{GoalState, delete_goal},
};

/// Handle goal deletion.
pub async fn delete_goal_endpoint(
    Path(goal_id): Path<GoalId>,
    State(state): State<GoalState>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_goal(goal_id, &connection)
        .inspect_err(|error| tracing::debug!("Could not delete goal {goal_id}: {error}"))?;
    tracing::info!("Deleted goal {goal_id}");

    Ok(Json(json!({ "message": "Goal deleted successfully" })))
}
