use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::debug;

use crate::db::models::Lesson;
use crate::db::source::ConnectionSource;
use crate::error::StoreError;

/// CRUD access to the `lesson` table.
///
/// Every call is self-contained: one pooled connection, one parameterized
/// statement, one mapping pass, released on every exit path. There is no
/// cross-call transaction and no shared mutable state, so concurrency is
/// whatever the pool allows.
pub struct LessonRepository {
    source: ConnectionSource,
}

impl LessonRepository {
    pub fn new(source: ConnectionSource) -> Self {
        Self { source }
    }

    /// Insert a new lesson and return it with the store-assigned id.
    ///
    /// The store has the exclusive right to assign identifiers: a lesson
    /// that already carries one is rejected before any I/O. If the store
    /// reports a successful insert but yields no generated key, the id is
    /// left unset rather than failing.
    pub async fn insert(&self, mut lesson: Lesson) -> Result<Lesson, StoreError> {
        if lesson.id.is_some() {
            return Err(StoreError::InvalidArgument(
                "id must not be set during the insert operation",
            ));
        }

        let result = sqlx::query("INSERT INTO lesson (name, homework_id) VALUES (?, ?)")
            .bind(&lesson.name)
            .bind(lesson.homework_id.as_deref())
            .execute(self.source.pool())
            .await
            .map_err(|e| StoreError::statement("insert lesson", e))?;

        if result.rows_affected() < 1 {
            return Err(StoreError::row_count("insert lesson", "no rows were inserted"));
        }

        let id = result.last_insert_rowid();
        if id != 0 {
            lesson.id = Some(id);
        }
        debug!(id = ?lesson.id, name = %lesson.name, "lesson inserted");
        Ok(lesson)
    }

    /// Delete a lesson by id.
    ///
    /// Deletes are targeted at an existing row: zero rows removed is a
    /// [`StoreError::Persistence`] failure, never a benign `false`.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM lesson WHERE id = ?")
            .bind(id)
            .execute(self.source.pool())
            .await
            .map_err(|e| StoreError::statement("delete lesson", e))?;

        if result.rows_affected() < 1 {
            return Err(StoreError::row_count("delete lesson", "no rows were deleted"));
        }
        debug!(id, "lesson deleted");
        Ok(true)
    }

    /// Fetch one lesson by id; absence is always [`StoreError::NotFound`],
    /// never a silent default.
    pub async fn find_by_id(&self, id: i64) -> Result<Lesson, StoreError> {
        let row = sqlx::query("SELECT id, name, homework_id FROM lesson WHERE id = ?")
            .bind(id)
            .fetch_optional(self.source.pool())
            .await
            .map_err(|e| StoreError::statement("find lesson by id", e))?
            .ok_or(StoreError::NotFound { id })?;

        Self::row_to_lesson(row)
    }

    /// Fetch every lesson, in whatever order the store returns them.
    /// An empty table yields an empty vec, not a failure.
    pub async fn all(&self) -> Result<Vec<Lesson>, StoreError> {
        let rows = sqlx::query("SELECT id, name, homework_id FROM lesson")
            .fetch_all(self.source.pool())
            .await
            .map_err(|e| StoreError::statement("list lessons", e))?;

        rows.into_iter().map(Self::row_to_lesson).collect()
    }

    /// Shared row mapping for every read path. Nulls pass through as
    /// `None`; no defaulting beyond what the store returns.
    fn row_to_lesson(row: SqliteRow) -> Result<Lesson, StoreError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::statement("map lesson row", e))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| StoreError::statement("map lesson row", e))?;
        let homework_id: Option<String> = row
            .try_get("homework_id")
            .map_err(|e| StoreError::statement("map lesson row", e))?;

        Ok(Lesson {
            id: Some(id),
            name,
            homework_id,
        })
    }
}
