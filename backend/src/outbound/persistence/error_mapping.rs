//! Shared Diesel and pool error mapping for repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{LedgerPersistenceError, UserPersistenceError};

use super::models::InvalidRow;
use super::pool::PoolError;

/// Constructors shared by every port error this adapter produces.
pub(crate) trait RepositoryError: Sized {
    fn connection(message: String) -> Self;
    fn query(message: String) -> Self;
    fn unique_violation(message: String) -> Self;
}

macro_rules! impl_repository_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl RepositoryError for $error {
                fn connection(message: String) -> Self {
                    <$error>::connection(message)
                }

                fn query(message: String) -> Self {
                    <$error>::query(message)
                }

                fn unique_violation(message: String) -> Self {
                    <$error>::unique_violation(message)
                }
            }
        )*
    };
}

impl_repository_error!(UserPersistenceError, LedgerPersistenceError);

pub(crate) fn map_pool_error<E: RepositoryError>(error: PoolError) -> E {
    match error {
        PoolError::Checkout(message) | PoolError::Build(message) => E::connection(message),
    }
}

/// A stored row no longer validates; report it as a failed query.
pub(crate) fn map_invalid_row<E: RepositoryError>(error: InvalidRow) -> E {
    E::query(error.to_string())
}

/// Map Diesel failures onto the port error.
///
/// Unique-constraint violations keep the constraint name so callers can tell
/// which key clashed; other database messages stay in the debug log.
pub(crate) fn map_diesel_error<E: RepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            E::unique_violation(info.constraint_name().unwrap_or("unique key").to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection("database connection error".to_owned())
        }
        DieselError::NotFound => E::query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query("database query error".to_owned()),
        _ => E::query("database error".to_owned()),
    }
}
