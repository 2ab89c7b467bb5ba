//! Application router configuration for the JSON API.

use axum::{
    Json, Router,
    routing::{get, put},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error, endpoints,
    goal::{create_goal_endpoint, delete_goal_endpoint, list_goals_endpoint, update_goal_endpoint},
    resident::{
        create_resident_endpoint, delete_resident_endpoint, edit_resident_endpoint,
        get_resident_endpoint, list_residents_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint,
        list_resident_transactions_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_status))
        .route(
            endpoints::RESIDENTS,
            get(list_residents_endpoint).post(create_resident_endpoint),
        )
        .route(
            endpoints::RESIDENT,
            get(get_resident_endpoint)
                .put(edit_resident_endpoint)
                .delete(delete_resident_endpoint),
        )
        .route(
            endpoints::GOALS,
            get(list_goals_endpoint).post(create_goal_endpoint),
        )
        .route(
            endpoints::GOAL,
            put(update_goal_endpoint).delete(delete_goal_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::RESIDENT_TRANSACTIONS,
            get(list_resident_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Lets clients check that the server is up.
async fn get_status() -> Json<Value> {
    Json(json!({ "message": "Token Tracker API is running" }))
}

async fn get_404_not_found() -> Error {
    Error::RouteNotFound
}
