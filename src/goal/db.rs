//! The goal model and the database operations for goals.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Patch, Resource,
    database_id::{GoalId, ResidentId},
    non_blank, not_found_as,
    resident::get_resident,
};

/// A point-valued template for something a resident can achieve, e.g. "Chores".
///
/// A goal with no resident is shared and can be used for any resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: GoalId,
    /// A short name for the goal.
    pub title: String,
    /// More detail on what the goal involves.
    pub description: Option<String>,
    /// The points awarded by default when a transaction references the goal.
    pub points: i64,
    /// Whether the goal is currently in use.
    pub active: bool,
    /// The resident the goal belongs to, or `None` for a shared goal.
    pub resident_id: Option<ResidentId>,
}

fn default_points() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

/// The data needed to create a goal.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    /// A short name for the goal.
    pub title: String,
    /// More detail on what the goal involves.
    #[serde(default)]
    pub description: Option<String>,
    /// The template point value, defaults to 1.
    #[serde(default = "default_points")]
    pub points: i64,
    /// Defaults to true.
    #[serde(default = "default_active")]
    pub active: bool,
    /// The owning resident, leave out for a shared goal.
    #[serde(default)]
    pub resident_id: Option<ResidentId>,
}

/// The fields to change on a goal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalUpdate {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub points: Patch<i64>,
    #[serde(default)]
    pub active: Patch<bool>,
    /// Null turns the goal into a shared goal.
    #[serde(default)]
    pub resident_id: Patch<ResidentId>,
}

/// Create a goal and return it with its generated ID.
///
/// # Errors
/// Returns an [Error::EmptyField] if the title is blank, or an
/// [Error::NotFound] if `resident_id` does not refer to a resident.
pub fn create_goal(goal: NewGoal, connection: &Connection) -> Result<Goal, Error> {
    let title = non_blank(&goal.title, "title")?;

    if let Some(resident_id) = goal.resident_id {
        get_resident(resident_id, connection)?;
    }

    let goal = connection
        .prepare(
            "INSERT INTO goal (title, description, points, active, resident_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, description, points, active, resident_id",
        )?
        .query_row(
            params![
                title,
                goal.description,
                goal.points,
                goal.active,
                goal.resident_id
            ],
            map_row,
        )?;

    Ok(goal)
}

/// Retrieve a single goal by ID.
pub fn get_goal(goal_id: GoalId, connection: &Connection) -> Result<Goal, Error> {
    connection
        .prepare(
            "SELECT id, title, description, points, active, resident_id FROM goal WHERE id = :id;",
        )?
        .query_row(&[(":id", &goal_id)], map_row)
        .map_err(not_found_as(Resource::Goal))
}

/// Retrieve all goals, shared and private, in the order they were created.
pub fn get_all_goals(connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare("SELECT id, title, description, points, active, resident_id FROM goal ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Apply the fields present in `update` to a goal. Returns an error if goal doesn't exist.
pub fn update_goal(
    goal_id: GoalId,
    update: GoalUpdate,
    connection: &Connection,
) -> Result<Goal, Error> {
    let mut goal = get_goal(goal_id, connection)?;

    update
        .title
        .map(|title| non_blank(&title, "title"))
        .transpose()?
        .apply_required(&mut goal.title, "title")?;
    update.description.apply(&mut goal.description);
    update.points.apply_required(&mut goal.points, "points")?;
    update.active.apply_required(&mut goal.active, "active")?;
    if let Patch::Value(resident_id) = update.resident_id {
        get_resident(resident_id, connection)?;
    }
    update.resident_id.apply(&mut goal.resident_id);

    connection.execute(
        "UPDATE goal
         SET title = ?1, description = ?2, points = ?3, active = ?4, resident_id = ?5
         WHERE id = ?6",
        params![
            goal.title,
            goal.description,
            goal.points,
            goal.active,
            goal.resident_id,
            goal.id
        ],
    )?;

    Ok(goal)
}

/// Delete a goal by ID. Returns an error if the goal doesn't exist.
///
/// Transactions that referenced the goal keep their points but lose the link to the goal.
pub fn delete_goal(goal_id: GoalId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM goal WHERE id = ?1", [goal_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound(Resource::Goal));
    }

    Ok(())
}

/// Initialize the goal table.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS goal (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            points INTEGER NOT NULL DEFAULT 1,
            active INTEGER NOT NULL DEFAULT 1,
            resident_id INTEGER,
            FOREIGN KEY(resident_id) REFERENCES resident(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_goal_resident_id ON goal(resident_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        points: row.get(3)?,
        active: row.get(4)?,
        resident_id: row.get(5)?,
    })
}

#[cfg(test)]
mod goal_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error, Patch, Resource,
        db::initialize,
        resident::{NewResident, Resident, create_resident, delete_resident},
    };

    use super::{
        GoalUpdate, NewGoal, create_goal, delete_goal, get_all_goals, get_goal, update_goal,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn new_goal(title: &str, points: i64, resident_id: Option<i64>) -> NewGoal {
        NewGoal {
            title: title.to_owned(),
            description: None,
            points,
            active: true,
            resident_id,
        }
    }

    #[track_caller]
    fn must_create_resident(connection: &Connection) -> Resident {
        create_resident(
            NewResident {
                first_name: "Alice".to_owned(),
                last_name: "Smith".to_owned(),
                display_name: None,
            },
            connection,
        )
        .expect("Could not create test resident")
    }

    #[test]
    fn defaults_apply_when_fields_are_omitted() {
        let goal: NewGoal = serde_json::from_str(r#"{"title": "Chores"}"#).unwrap();

        assert_eq!(goal.points, 1);
        assert!(goal.active);
        assert_eq!(goal.resident_id, None);
        assert_eq!(goal.description, None);
    }

    #[test]
    fn create_goal_succeeds() {
        let connection = get_test_db_connection();

        let goal = create_goal(new_goal("Chores", 5, None), &connection)
            .expect("Could not create goal");

        assert!(goal.id > 0);
        assert_eq!(goal.title, "Chores");
        assert_eq!(goal.points, 5);
        assert_eq!(get_goal(goal.id, &connection), Ok(goal));
    }

    #[test]
    fn create_goal_for_unknown_resident_returns_not_found() {
        let connection = get_test_db_connection();

        let result = create_goal(new_goal("Chores", 5, Some(999999)), &connection);

        assert_eq!(result, Err(Error::NotFound(Resource::Resident)));
    }

    #[test]
    fn create_goal_rejects_blank_title() {
        let connection = get_test_db_connection();

        let result = create_goal(new_goal("", 5, None), &connection);

        assert_eq!(result, Err(Error::EmptyField("title")));
    }

    #[test]
    fn get_goal_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = get_goal(123, &connection);

        assert_eq!(result, Err(Error::NotFound(Resource::Goal)));
    }

    #[test]
    fn get_all_goals_includes_shared_and_private() {
        let connection = get_test_db_connection();
        let resident = must_create_resident(&connection);
        let shared = create_goal(new_goal("Chores", 5, None), &connection).unwrap();
        let private = create_goal(new_goal("Homework", 3, Some(resident.id)), &connection).unwrap();

        let goals = get_all_goals(&connection).expect("Could not get all goals");

        assert_eq!(goals, vec![shared, private]);
    }

    #[test]
    fn update_goal_only_changes_supplied_fields() {
        let connection = get_test_db_connection();
        let goal = create_goal(new_goal("Chores", 5, None), &connection).unwrap();

        let updated = update_goal(
            goal.id,
            GoalUpdate {
                points: Patch::Value(8),
                active: Patch::Value(false),
                ..Default::default()
            },
            &connection,
        )
        .expect("Could not update goal");

        assert_eq!(updated.title, "Chores");
        assert_eq!(updated.points, 8);
        assert!(!updated.active);
        assert_eq!(get_goal(goal.id, &connection), Ok(updated));
    }

    #[test]
    fn update_goal_can_make_private_goal_shared() {
        let connection = get_test_db_connection();
        let resident = must_create_resident(&connection);
        let goal = create_goal(new_goal("Homework", 3, Some(resident.id)), &connection).unwrap();

        let updated = update_goal(
            goal.id,
            GoalUpdate {
                resident_id: Patch::Null,
                ..Default::default()
            },
            &connection,
        )
        .unwrap();

        assert_eq!(updated.resident_id, None);
    }

    #[test]
    fn update_goal_rejects_null_points() {
        let connection = get_test_db_connection();
        let goal = create_goal(new_goal("Chores", 5, None), &connection).unwrap();

        let result = update_goal(
            goal.id,
            GoalUpdate {
                points: Patch::Null,
                ..Default::default()
            },
            &connection,
        );

        assert_eq!(result, Err(Error::NullField("points")));
    }

    #[test]
    fn update_goal_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = update_goal(999999, GoalUpdate::default(), &connection);

        assert_eq!(result, Err(Error::NotFound(Resource::Goal)));
    }

    #[test]
    fn delete_goal_succeeds() {
        let connection = get_test_db_connection();
        let goal = create_goal(new_goal("Chores", 5, None), &connection).unwrap();

        let result = delete_goal(goal.id, &connection);

        assert!(result.is_ok());
        assert_eq!(
            get_goal(goal.id, &connection),
            Err(Error::NotFound(Resource::Goal))
        );
    }

    #[test]
    fn delete_goal_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = delete_goal(999999, &connection);

        assert_eq!(result, Err(Error::NotFound(Resource::Goal)));
    }

    #[test]
    fn deleting_resident_keeps_shared_goals() {
        let connection = get_test_db_connection();
        let resident = must_create_resident(&connection);
        let shared = create_goal(new_goal("Chores", 5, None), &connection).unwrap();
        let private = create_goal(new_goal("Homework", 3, Some(resident.id)), &connection).unwrap();

        delete_resident(resident.id, &connection).unwrap();

        assert_eq!(get_goal(shared.id, &connection), Ok(shared));
        assert_eq!(
            get_goal(private.id, &connection),
            Err(Error::NotFound(Resource::Goal))
        );
    }
}
