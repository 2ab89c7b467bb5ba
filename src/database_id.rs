//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// Database identifier for a resident.
pub type ResidentId = DatabaseId;
/// Database identifier for a goal.
pub type GoalId = DatabaseId;
/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;
