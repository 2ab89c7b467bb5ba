//! Goal editing endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{
    Error,
    database_id::GoalId,
    goal::{Goal, GoalState, GoalUpdate, update_goal},
};

/// Handle a partial goal update. Responds with the updated goal.
pub async fn update_goal_endpoint(
    State(state): State<GoalState>,
    Path(goal_id): Path<GoalId>,
    WithRejection(Json(update), _): WithRejection<Json<GoalUpdate>, Error>,
) -> Result<Json<Goal>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_goal(goal_id, update, &connection).map(Json)
}

#[cfg(test)]
mod edit_goal_endpoint_tests {
    use axum::{
        Json,
        extract::{Path, State},
    };
    use axum_extra::extract::WithRejection;

    use crate::{
        Error, Patch, Resource,
        goal::{GoalUpdate, NewGoal, create_goal, get_test_goal_state, update_goal_endpoint},
    };

    #[tokio::test]
    async fn update_goal_endpoint_succeeds() {
        let state = get_test_goal_state();
        let goal = create_goal(
            NewGoal {
                title: "Chores".to_owned(),
                description: None,
                points: 5,
                active: true,
                resident_id: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test goal");
        let update = GoalUpdate {
            title: Patch::Value("Kitchen chores".to_owned()),
            ..Default::default()
        };

        let Json(updated) = update_goal_endpoint(
            State(state),
            Path(goal.id),
            WithRejection(Json(update), Default::default()),
        )
        .await
        .expect("Could not update goal");

        assert_eq!(updated.title, "Kitchen chores");
        assert_eq!(updated.points, 5);
    }

    #[tokio::test]
    async fn update_goal_endpoint_with_invalid_id_returns_not_found() {
        let state = get_test_goal_state();

        let result = update_goal_endpoint(
            State(state),
            Path(999999),
            WithRejection(Json(GoalUpdate::default()), Default::default()),
        )
        .await;

        assert_eq!(result.err(), Some(Error::NotFound(Resource::Goal)));
    }
}
