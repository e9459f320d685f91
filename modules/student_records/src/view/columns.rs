use crate::contract::model::Student;
use crate::domain::edit::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Table columns in display order; `Options` holds the row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    FirstName,
    LastName,
    Email,
    Age,
    Major,
    Options,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::FirstName,
        Column::LastName,
        Column::Email,
        Column::Age,
        Column::Major,
        Column::Options,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "E-mail",
            Self::Age => "Age",
            Self::Major => "Major",
            Self::Options => "",
        }
    }

    pub const fn align(self) -> Align {
        match self {
            Self::Id | Self::FirstName => Align::Left,
            _ => Align::Right,
        }
    }

    /// The draft field an editing row shows in this column, if any.
    pub const fn field(self) -> Option<Field> {
        match self {
            Self::FirstName => Some(Field::FirstName),
            Self::LastName => Some(Field::LastName),
            Self::Email => Some(Field::Email),
            Self::Age => Some(Field::Age),
            Self::Major => Some(Field::Major),
            Self::Id | Self::Options => None,
        }
    }

    /// Committed value of this column for a row.
    pub fn value(self, student: &Student) -> String {
        match self {
            Self::Id => student.id.map(|id| id.to_string()).unwrap_or_default(),
            Self::FirstName => student.first_name.clone(),
            Self::LastName => student.last_name.clone(),
            Self::Email => student.email.clone(),
            Self::Age => student.age.to_string(),
            Self::Major => student.major.clone(),
            Self::Options => String::new(),
        }
    }
}
