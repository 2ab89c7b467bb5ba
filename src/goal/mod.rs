//! The catalog of goals that transactions can reference.

mod create;
mod db;
mod delete;
mod edit;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_goal_endpoint;
pub use db::{
    Goal, GoalUpdate, NewGoal, create_goal, create_goal_table, delete_goal, get_all_goals,
    get_goal, update_goal,
};
pub use delete::delete_goal_endpoint;
pub use edit::update_goal_endpoint;
pub use list::list_goals_endpoint;

/// The state needed by the goal endpoints.
#[derive(Debug, Clone)]
pub struct GoalState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[cfg(test)]
fn get_test_goal_state() -> GoalState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    crate::db::initialize(&connection).expect("Could not initialize database");

    GoalState {
        db_connection: Arc::new(Mutex::new(connection)),
    }
}
