//! Defines the endpoint for deleting a resident.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, Error, database_id::ResidentId, resident::delete_resident};

/// The state needed to delete a resident.
#[derive(Debug, Clone)]
pub struct DeleteResidentState {
    /// The database connection for managing residents.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteResidentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a resident.
///
/// The resident's private goals and all of their transactions are deleted with them.
pub async fn delete_resident_endpoint(
    State(state): State<DeleteResidentState>,
    Path(resident_id): Path<ResidentId>,
) -> Result<Json<Value>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_resident(resident_id, &connection)?;
    tracing::info!("Deleted resident {resident_id}");

    Ok(Json(json!({
        "message": format!("Resident with ID {resident_id} deleted successfully")
    })))
}
