use serde::{Deserialize, Serialize};

/// One lesson record.
///
/// `id` is `None` until the store assigns one during insert; every lesson
/// returned by a read path carries `Some(id)`. `homework_id` is a nullable
/// text reference to an associated homework row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Option<i64>,
    pub name: String,
    pub homework_id: Option<String>,
}

impl Lesson {
    /// A lesson that has not been persisted yet.
    pub fn new(name: impl Into<String>, homework_id: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            homework_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lesson_has_no_id() {
        let lesson = Lesson::new("Algebra", Some("hw-1".to_string()));
        assert_eq!(lesson.id, None);
        assert_eq!(lesson.name, "Algebra");
        assert_eq!(lesson.homework_id.as_deref(), Some("hw-1"));
    }
}
