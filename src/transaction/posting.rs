//! Posting transactions against a resident's balance.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{GoalId, ResidentId},
    goal::{Goal, get_goal},
    non_blank,
    resident::get_resident,
    transaction::{
        TransactionView,
        db::{NewTransaction, insert_transaction},
        timestamp::normalize_timestamp,
        view::get_transaction_view,
    },
};

/// A request to award or deduct points for a resident.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostTransaction {
    /// The resident to post against.
    pub resident_id: ResidentId,
    /// The goal the points are for.
    #[serde(default)]
    pub goal_id: Option<GoalId>,
    /// The points to apply.
    ///
    /// Defaults to the goal's points when a goal is given, required otherwise.
    #[serde(default)]
    pub points: Option<i64>,
    /// An ISO 8601 date-time, defaults to now.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// The staff member posting the transaction.
    pub staff_name: String,
    /// A free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// Work out the points to apply and whether they override the goal's points.
///
/// Explicit points always win, the goal only provides a default.
///
/// # Errors
/// Returns [Error::MissingPoints] if there is neither a goal nor explicit points.
pub fn effective_points(goal: Option<&Goal>, points: Option<i64>) -> Result<(i64, bool), Error> {
    match (goal, points) {
        (Some(goal), Some(points)) => Ok((points, points != goal.points)),
        (Some(goal), None) => Ok((goal.points, false)),
        (None, Some(points)) => Ok((points, false)),
        (None, None) => Err(Error::MissingPoints),
    }
}

/// Record a transaction and add its points to the resident's balance.
///
/// The row insert and the balance update share one storage transaction, so
/// either both are written or neither is. Nothing is written if the resident
/// or goal does not exist or the request is invalid.
///
/// Returns the new transaction with the resident's display name and the goal's title.
///
/// # Errors
/// - [Error::NotFound] if the resident or goal does not exist.
/// - [Error::InvalidTimestamp], [Error::EmptyField] or [Error::MissingPoints]
///   for an invalid request.
/// - [Error::BalanceOverflow] if the new balance does not fit in an `i64`.
/// - [Error::SqlError] if a write fails, after rolling back.
pub fn post_transaction(
    request: PostTransaction,
    connection: &Connection,
) -> Result<TransactionView, Error> {
    let staff_name = non_blank(&request.staff_name, "staff_name")?;
    let timestamp = match request.timestamp.as_deref() {
        Some(raw) => normalize_timestamp(raw)?,
        None => OffsetDateTime::now_utc(),
    };

    // Immediate so that the balance read-modify-write cannot interleave with
    // another writer on the same database file.
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let resident = get_resident(request.resident_id, &sql_transaction)?;
    let goal = request
        .goal_id
        .map(|goal_id| get_goal(goal_id, &sql_transaction))
        .transpose()?;
    let (points, override_points) = effective_points(goal.as_ref(), request.points)?;
    let new_balance = resident
        .token_balance
        .checked_add(points)
        .ok_or(Error::BalanceOverflow)?;

    let transaction = insert_transaction(
        &NewTransaction {
            resident_id: request.resident_id,
            goal_id: request.goal_id,
            points,
            timestamp,
            staff_name,
            note: request.note,
            override_points,
        },
        &sql_transaction,
    )?;

    sql_transaction.execute(
        "UPDATE resident SET token_balance = ?1 WHERE id = ?2",
        (new_balance, request.resident_id),
    )?;

    let view = get_transaction_view(transaction.id, &sql_transaction)?;

    sql_transaction.commit()?;

    tracing::info!(
        "Posted transaction {} of {} points for resident {}",
        transaction.id,
        points,
        request.resident_id
    );

    Ok(view)
}
