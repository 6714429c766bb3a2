//! Concrete PostgreSQL repositories, one per aggregate.

pub mod category;
pub mod chat;
pub mod feedback;
pub mod opportunity;
pub mod portfolio;
pub mod refresh_token;
pub mod user;

use sqlx::error::DatabaseError;

/// Whether a database error is a violation of the named unique constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => violates(db_err.as_ref(), constraint),
        _ => false,
    }
}

fn violates(db_err: &dyn DatabaseError, constraint: &str) -> bool {
    db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
}

/// Whether a database error is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
