/// ID types for Drip Planner entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random ID
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Batch (cohort) identifier
    BatchId
);

string_id!(
    /// Timeline item identifier
    TimelineItemId
);

string_id!(
    /// Recording (lesson video) identifier, owned by the course catalog
    RecordingId
);

string_id!(
    /// Course identifier
    CourseId
);

string_id!(
    /// Assignment identifier
    AssignmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let id1 = TimelineItemId::generate();
        let id2 = TimelineItemId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn course_id_from_string() {
        let id = CourseId::new("course-123");
        assert_eq!(id.as_str(), "course-123");
    }

    #[test]
    fn batch_id_display() {
        let id = BatchId::from("batch-456");
        assert_eq!(format!("{}", id), "batch-456");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = RecordingId::new("rec-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rec-1\"");
    }
}
