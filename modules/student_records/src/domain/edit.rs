use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::contract::model::{Student, StudentId};

/// Editable student fields; identity is never editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Age,
    Major,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Age,
        Field::Major,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Age => "age",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field '{0}' (expected first_name, last_name, email, age or major)")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("age must be a non-negative whole number, got '{0}'")]
    InvalidAge(String),
}

/// In-progress edits of one row, held as form text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    first_name: String,
    last_name: String,
    email: String,
    age: String,
    major: String,
}

impl Draft {
    /// Capture the committed values of a row.
    pub fn capture(student: &Student) -> Self {
        Self {
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
            major: student.major.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Age => &self.age,
            Field::Major => &self.major,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Age => &mut self.age,
            Field::Major => &mut self.major,
        };
        *slot = value;
    }

    /// The full record this draft would commit as.
    pub fn to_student(&self, id: StudentId) -> Result<Student, DraftError> {
        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| DraftError::InvalidAge(self.age.clone()))?;

        Ok(Student {
            id: Some(id),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            age,
            major: self.major.clone(),
        })
    }
}

/// The single editing slot of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { id: StudentId, draft: Draft },
}

impl EditState {
    pub fn editing_id(&self) -> Option<StudentId> {
        match self {
            Self::Viewing => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    pub fn is_editing(&self, id: StudentId) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Viewing => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }
}
