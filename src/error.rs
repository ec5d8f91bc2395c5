use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Typed failure taxonomy for the persistence layer.
///
/// Callers match on the variant rather than inspecting message text. No
/// operation signals failure through a sentinel value; an empty list from
/// [`crate::db::LessonRepository::all`] is the only legitimate empty result.
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// Credential or configuration values were missing or unreadable.
    /// Fatal to provisioning, never retried.
    #[error("failed to load database configuration: {0}")]
    Configuration(#[from] figment::Error),

    /// A connection could not be opened. Fatal to the enclosing call.
    #[error("failed to open database connection: {0}")]
    Connection(#[source] SqlxError),

    /// The caller violated an operation precondition; raised before any
    /// I/O is attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A statement executed but failed, or affected an unexpected number
    /// of rows. Carries the operation name for context.
    #[error("{operation}: {message}")]
    Persistence {
        operation: &'static str,
        message: &'static str,
        #[source]
        source: Option<SqlxError>,
    },

    /// A lookup by id matched no row.
    #[error("lesson with id = {id} not found")]
    NotFound { id: i64 },
}

impl StoreError {
    /// A statement reached the store but the driver reported a failure.
    pub(crate) fn statement(operation: &'static str, source: SqlxError) -> Self {
        Self::Persistence {
            operation,
            message: "statement execution failed",
            source: Some(source),
        }
    }

    /// A statement executed cleanly but affected an unexpected row count.
    pub(crate) fn row_count(operation: &'static str, message: &'static str) -> Self {
        Self::Persistence {
            operation,
            message,
            source: None,
        }
    }
}
