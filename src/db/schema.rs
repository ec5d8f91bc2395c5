//! SQL DDL for provisioning the lesson store.
//! SQLite-first design; standard parameterized SQL everywhere else.

/// Idempotent schema with:
/// - `lesson.id` INTEGER PRIMARY KEY AUTOINCREMENT (store-assigned)
/// - `lesson.name` required text
/// - `lesson.homework_id` nullable text reference into `homework`
/// - `homework` kept minimal; this layer only references it, never writes it
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS homework (
    id TEXT PRIMARY KEY,
    title TEXT NULL
);

CREATE TABLE IF NOT EXISTS lesson (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    homework_id TEXT NULL
);
"#;

/// Tables the connection diagnostic looks for on open.
pub const EXPECTED_TABLES: [&str; 2] = ["homework", "lesson"];
