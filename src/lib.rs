//! Token Tracker keeps a ledger of the behavioural-incentive tokens awarded to
//! the residents of a facility.
//!
//! Staff post transactions against a resident, optionally for one of the
//! goals in the catalog, and the resident's running balance is adjusted in the
//! same storage transaction. This library provides the JSON API for residents,
//! goals and transactions.

#![warn(missing_docs)]

use std::{fmt::Display, net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod cors;
mod database_id;
mod db;
pub mod endpoints;
mod goal;
mod logging;
mod patch;
mod resident;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use cors::{DEFAULT_ALLOWED_ORIGINS, cors_layer};
pub use database_id::{DatabaseId, GoalId, ResidentId, TransactionId};
pub use db::initialize as initialize_db;
pub use goal::{Goal, NewGoal, create_goal};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use patch::Patch;
pub use resident::{NewResident, Resident, create_resident, get_resident};
pub use routing::build_router;
pub use transaction::{
    PostTransaction, Transaction, TransactionView, effective_points, get_transaction,
    normalize_timestamp, post_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The kinds of record that can be looked up by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A [Resident].
    Resident,
    /// A [Goal].
    Goal,
    /// A [Transaction].
    Transaction,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Resident => write!(f, "resident"),
            Resource::Goal => write!(f, "goal"),
            Resource::Transaction => write!(f, "transaction"),
        }
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resident, goal or transaction does not exist.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the record has been created.
    #[error("{0} not found")]
    NotFound(Resource),

    /// No route matches the request path and method.
    #[error("the requested route does not exist")]
    RouteNotFound,

    /// A timestamp string could not be parsed as an ISO 8601 date-time.
    #[error("timestamp \"{0}\" must be ISO 8601, e.g. 2025-10-14T15:37:41Z")]
    InvalidTimestamp(String),

    /// A transaction was posted without a goal and without points, so there
    /// is no way to know how many points to apply.
    #[error("points must be given when no goal is referenced")]
    MissingPoints,

    /// Applying the points would take the resident's balance past the range
    /// of a 64-bit integer.
    #[error("token balance would overflow")]
    BalanceOverflow,

    /// A required text field was empty or only whitespace.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A partial update tried to set a non-nullable field to null.
    #[error("{0} cannot be null")]
    NullField(&'static str),

    /// The request body was not valid JSON for the endpoint, e.g. the points
    /// were not an integer.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// An unhandled/unexpected SQL error.
    ///
    /// The inner error should only be logged on the server, clients get a
    /// generic internal server error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequestBody(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) | Error::RouteNotFound => StatusCode::NOT_FOUND,
            Error::InvalidTimestamp(_)
            | Error::MissingPoints
            | Error::BalanceOverflow
            | Error::EmptyField(_)
            | Error::NullField(_)
            | Error::InvalidRequestBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            // Storage details are not intended to be shown to the client.
            Error::SqlError(error) => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Map a query that returned no rows to [Error::NotFound] for `resource`.
pub(crate) fn not_found_as(resource: Resource) -> impl Fn(rusqlite::Error) -> Error {
    move |error| match error {
        rusqlite::Error::QueryReturnedNoRows => Error::NotFound(resource),
        error => error.into(),
    }
}

/// Trim `text` and reject it if nothing is left.
///
/// # Errors
/// Returns [Error::EmptyField] with `field_name` if `text` is empty or only whitespace.
pub(crate) fn non_blank(text: &str, field_name: &'static str) -> Result<String, Error> {
    let text = text.trim();

    if text.is_empty() {
        Err(Error::EmptyField(field_name))
    } else {
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, Resource};

    async fn body_json(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        (
            status,
            serde_json::from_slice(&bytes).expect("response body was not JSON"),
        )
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let (status, body) = body_json(Error::NotFound(Resource::Goal)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "goal not found");
    }

    #[tokio::test]
    async fn validation_errors_are_unprocessable() {
        let (status, _) = body_json(Error::InvalidTimestamp("yesterday".to_owned())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = body_json(Error::MissingPoints).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = body_json(Error::BalanceOverflow).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "token balance would overflow");
    }

    #[tokio::test]
    async fn sql_errors_hide_details() {
        let (status, body) =
            body_json(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("InvalidQuery"));
    }
}
