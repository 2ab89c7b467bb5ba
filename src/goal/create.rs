//! Goal creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    goal::{Goal, GoalState, NewGoal, create_goal},
};

/// Handle goal creation. Responds with the new goal.
pub async fn create_goal_endpoint(
    State(state): State<GoalState>,
    WithRejection(Json(new_goal), _): WithRejection<Json<NewGoal>, Error>,
) -> Result<(StatusCode, Json<Goal>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let goal = create_goal(new_goal, &connection)?;
    tracing::info!("Created goal {} \"{}\"", goal.id, goal.title);

    Ok((StatusCode::CREATED, Json(goal)))
}

#[cfg(test)]
mod create_goal_endpoint_tests {
    use axum::{Json, extract::State, http::StatusCode};
    use axum_extra::extract::WithRejection;

    use crate::{
        Error, Resource,
        goal::{NewGoal, create_goal_endpoint, get_goal, get_test_goal_state},
    };

    #[tokio::test]
    async fn create_goal_endpoint_succeeds() {
        let state = get_test_goal_state();
        let new_goal = NewGoal {
            title: "Chores".to_owned(),
            description: Some("Tidy the common room".to_owned()),
            points: 5,
            active: true,
            resident_id: None,
        };

        let (status, Json(goal)) = create_goal_endpoint(
            State(state.clone()),
            WithRejection(Json(new_goal), Default::default()),
        )
        .await
        .expect("Could not create goal");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(goal.points, 5);
        assert_eq!(get_goal(goal.id, &state.db_connection.lock().unwrap()), Ok(goal));
    }

    #[tokio::test]
    async fn create_goal_endpoint_with_unknown_resident_returns_not_found() {
        let state = get_test_goal_state();
        let new_goal = NewGoal {
            title: "Homework".to_owned(),
            description: None,
            points: 3,
            active: true,
            resident_id: Some(999999),
        };

        let result =
            create_goal_endpoint(State(state), WithRejection(Json(new_goal), Default::default()))
                .await;

        assert_eq!(result.err(), Some(Error::NotFound(Resource::Resident)));
    }
}
