use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use lessondb::{ConnectionSource, DbCredentials, Lesson, LessonRepository, StoreError};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Unique temp-file database per test so tests stay independent under a
/// parallel runner.
fn temp_database(tag: &str) -> (PathBuf, DbCredentials) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!(
        "lessondb-{tag}-{}-{nanos}.sqlite",
        std::process::id()
    ));

    let creds = DbCredentials::from_url(format!("sqlite:{}", path.display()));
    (path, creds)
}

async fn repository(tag: &str) -> (PathBuf, LessonRepository) {
    init_tracing();
    let (path, creds) = temp_database(tag);
    let source = ConnectionSource::init(&creds).expect("failed to build connection source");
    source.init_schema().await.expect("failed to provision schema");
    (path, LessonRepository::new(source))
}

#[tokio::test]
async fn insert_assigns_identifier_and_round_trips() {
    let (path, repo) = repository("insert-roundtrip").await;

    let inserted = repo
        .insert(Lesson::new("Algebra", Some("hw-1".to_string())))
        .await
        .expect("insert failed");

    let id = inserted.id.expect("store did not assign an id");
    assert_eq!(inserted.name, "Algebra");
    assert_eq!(inserted.homework_id.as_deref(), Some("hw-1"));

    let found = repo.find_by_id(id).await.expect("find failed");
    assert_eq!(found, inserted);

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn insert_rejects_preset_id_without_touching_the_store() {
    let (path, repo) = repository("insert-preset-id").await;

    let mut lesson = Lesson::new("Algebra", None);
    lesson.id = Some(7);

    let err = repo.insert(lesson).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument(_)));

    // no I/O happened: the table is still empty
    let all = repo.all().await.expect("list failed");
    assert!(all.is_empty());

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn delete_of_missing_id_fails() {
    let (path, repo) = repository("delete-missing").await;

    let err = repo.delete(424242).await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn delete_succeeds_once_then_fails() {
    let (path, repo) = repository("delete-twice").await;

    let inserted = repo
        .insert(Lesson::new("Geometry", None))
        .await
        .expect("insert failed");
    let id = inserted.id.expect("store did not assign an id");

    assert!(repo.delete(id).await.expect("first delete failed"));

    let err = repo.delete(id).await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn find_of_missing_id_fails_with_not_found() {
    let (path, repo) = repository("find-missing").await;

    let err = repo.find_by_id(9999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 9999 }));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn listing_an_empty_table_returns_an_empty_vec() {
    let (path, repo) = repository("list-empty").await;

    let all = repo.all().await.expect("list failed");
    assert!(all.is_empty());

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn full_lifecycle_round_trip() {
    let (path, repo) = repository("lifecycle").await;

    let inserted = repo
        .insert(Lesson::new("Algebra", Some("hw-1".to_string())))
        .await
        .expect("insert failed");
    let id = inserted.id.expect("store did not assign an id");

    let found = repo.find_by_id(id).await.expect("find failed");
    assert_eq!(found, inserted);

    assert!(repo.delete(id).await.expect("delete failed"));

    let err = repo.find_by_id(id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn listing_returns_every_inserted_lesson() {
    let (path, repo) = repository("list-three").await;

    for name in ["A", "B", "C"] {
        repo.insert(Lesson::new(name, None))
            .await
            .expect("insert failed");
    }

    let all = repo.all().await.expect("list failed");
    assert_eq!(all.len(), 3);

    // result-set order is unspecified; compare as a set of names
    let mut names: Vec<&str> = all.iter().map(|l| l.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["A", "B", "C"]);
    assert!(all.iter().all(|l| l.id.is_some()));

    let _ = fs::remove_file(&path);
}

#[tokio::test]
async fn connect_runs_the_table_diagnostic_and_yields_a_connection() {
    init_tracing();
    let (path, creds) = temp_database("connect-diagnostic");
    let source = ConnectionSource::init(&creds).expect("failed to build connection source");

    // tables absent: diagnostic must not block progress
    let conn = source.connect().await.expect("connect failed");
    drop(conn);

    source.init_schema().await.expect("failed to provision schema");

    // tables present: still just a diagnostic, connection usable
    let conn = source.connect().await.expect("connect failed after schema init");
    drop(conn);

    source.close().await;
    let _ = fs::remove_file(&path);
}
