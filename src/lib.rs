pub mod config;
pub mod db;
pub mod error;

pub use config::DbCredentials;
pub use db::{ConnectionSource, Lesson, LessonRepository};
pub use error::StoreError;
