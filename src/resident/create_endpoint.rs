//! Defines the endpoint for creating a new resident.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    resident::{NewResident, Resident, create_resident},
};

/// The state needed to create a resident.
#[derive(Debug, Clone)]
pub struct CreateResidentState {
    /// The database connection for managing residents.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateResidentState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new resident, responds with the created resident.
pub async fn create_resident_endpoint(
    State(state): State<CreateResidentState>,
    WithRejection(Json(new_resident), _): WithRejection<Json<NewResident>, Error>,
) -> Result<(StatusCode, Json<Resident>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let resident = create_resident(new_resident, &connection)?;
    tracing::info!("Created resident {}", resident.id);

    Ok((StatusCode::CREATED, Json(resident)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use axum_extra::extract::WithRejection;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        resident::{NewResident, create_resident_endpoint, get_resident},
    };

    use super::CreateResidentState;

    fn get_test_state() -> CreateResidentState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        CreateResidentState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_create_resident() {
        let state = get_test_state();
        let new_resident = NewResident {
            first_name: "Alice".to_owned(),
            last_name: "Smith".to_owned(),
            display_name: None,
        };

        let (status, Json(resident)) = create_resident_endpoint(
            State(state.clone()),
            WithRejection(Json(new_resident), Default::default()),
        )
        .await
        .expect("could not create resident");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resident.token_balance, 0);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_resident(resident.id, &connection), Ok(resident));
    }
}
