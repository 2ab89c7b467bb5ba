//! Defines the endpoints for reading residents.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ResidentId,
    resident::{Resident, get_all_residents, get_resident},
};

/// The state needed to read residents.
#[derive(Debug, Clone)]
pub struct ResidentsState {
    /// The database connection for reading residents.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ResidentsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with every resident.
pub async fn list_residents_endpoint(
    State(state): State<ResidentsState>,
) -> Result<Json<Vec<Resident>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_residents(&connection).map(Json)
}

/// A route handler that responds with a single resident, or 404 if the ID is unknown.
pub async fn get_resident_endpoint(
    State(state): State<ResidentsState>,
    Path(resident_id): Path<ResidentId>,
) -> Result<Json<Resident>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_resident(resident_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Path, State},
    };
    use rusqlite::Connection;

    use crate::{
        Error, Resource,
        db::initialize,
        resident::{NewResident, create_resident, get_resident_endpoint, list_residents_endpoint},
    };

    use super::ResidentsState;

    fn get_test_state() -> ResidentsState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        ResidentsState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn lists_residents() {
        let state = get_test_state();
        let resident = create_resident(
            NewResident {
                first_name: "Alice".to_owned(),
                last_name: "Smith".to_owned(),
                display_name: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let Json(residents) = list_residents_endpoint(State(state)).await.unwrap();

        assert_eq!(residents, vec![resident]);
    }

    #[tokio::test]
    async fn get_unknown_resident_returns_not_found() {
        let state = get_test_state();

        let result = get_resident_endpoint(State(state), Path(999999)).await;

        assert_eq!(result.err(), Some(Error::NotFound(Resource::Resident)));
    }
}
