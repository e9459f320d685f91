use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned student identity. Opaque to the UI; numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(u64);

impl StudentId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A persisted student record. `id` is only `None` for a record that has
/// not been through the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub major: String,
}

impl Student {
    /// Attach an identity to a new record.
    pub fn with_id(id: StudentId, new_student: NewStudent) -> Self {
        Self {
            id: Some(id),
            first_name: new_student.first_name,
            last_name: new_student.last_name,
            email: new_student.email,
            age: new_student.age,
            major: new_student.major,
        }
    }
}

/// Data for creating a student. `Default` is the blank row the table adds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: u32,
    pub major: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_wire_format_is_snake_case_with_numeric_id() {
        let raw = r#"{"id":1,"first_name":"John","last_name":"Doe","email":"john.doe@example.com","age":21,"major":"Computer Science"}"#;
        let student: Student = serde_json::from_str(raw).unwrap();
        assert_eq!(student.id, Some(StudentId::new(1)));
        assert_eq!(student.first_name, "John");
        assert_eq!(student.age, 21);
        assert_eq!(serde_json::to_string(&student).unwrap(), raw);
    }

    #[test]
    fn missing_id_deserializes_as_unpersisted() {
        let raw = r#"{"first_name":"","last_name":"","email":"","age":0,"major":""}"#;
        let student: Student = serde_json::from_str(raw).unwrap();
        assert_eq!(student.id, None);
        assert!(!serde_json::to_string(&student).unwrap().contains("\"id\""));
    }

    #[test]
    fn blank_new_student_has_empty_text_and_zero_age() {
        let blank = NewStudent::default();
        assert_eq!(
            serde_json::to_value(&blank).unwrap(),
            serde_json::json!({
                "first_name": "",
                "last_name": "",
                "email": "",
                "age": 0,
                "major": ""
            })
        );
    }

    #[test]
    fn student_id_parses_from_text() {
        assert_eq!(" 42 ".parse::<StudentId>().unwrap(), StudentId::new(42));
        assert!("abc".parse::<StudentId>().is_err());
        assert_eq!(StudentId::new(7).to_string(), "7");
    }
}
