//! Database module: connection provisioning and the lesson repository.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `source.rs`: pooled connection source built from resolved credentials
//! - `lessons.rs`: CRUD repository over the `lesson` table

pub mod lessons;
pub mod models;
pub mod schema;
pub mod source;

pub use lessons::LessonRepository;
pub use models::Lesson;
pub use schema::SQLITE_INIT;
pub use source::{ConnectionSource, SqlitePool};
