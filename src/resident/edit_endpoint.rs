//! Defines the endpoint for partially updating a resident.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ResidentId,
    resident::{Resident, ResidentUpdate, update_resident},
};

/// The state needed to edit a resident.
#[derive(Debug, Clone)]
pub struct EditResidentState {
    /// The database connection for managing residents.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditResidentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating the fields of a resident that are present in
/// the request body, responds with the updated resident.
pub async fn edit_resident_endpoint(
    State(state): State<EditResidentState>,
    Path(resident_id): Path<ResidentId>,
    WithRejection(Json(update), _): WithRejection<Json<ResidentUpdate>, Error>,
) -> Result<Json<Resident>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_resident(resident_id, update, &connection)
        .inspect_err(|error| tracing::debug!("Could not update resident {resident_id}: {error}"))
        .map(Json)
}
