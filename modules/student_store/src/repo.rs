use parking_lot::RwLock;
use student_records::model::{NewStudent, Student, StudentId};

use crate::config::StudentStoreConfig;

/// Student records kept in insertion order behind a lock.
#[derive(Default)]
pub struct StudentRepo {
    rows: RwLock<Vec<Student>>,
}

impl StudentRepo {
    pub fn new(rows: Vec<Student>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn from_config(cfg: &StudentStoreConfig) -> Self {
        if cfg.seed {
            Self::new(vec![sample_student()])
        } else {
            Self::default()
        }
    }

    pub fn list(&self) -> Vec<Student> {
        self.rows.read().clone()
    }

    /// Store a new record under `max id + 1` (1 for an empty store).
    pub fn insert(&self, new_student: NewStudent) -> Student {
        let mut rows = self.rows.write();
        let next = rows
            .iter()
            .filter_map(|s| s.id)
            .map(StudentId::get)
            .max()
            .unwrap_or(0)
            + 1;
        let student = Student::with_id(StudentId::new(next), new_student);
        rows.push(student.clone());
        student
    }

    /// Replace the fields of `id`; `None` when no such record exists.
    pub fn update(&self, id: StudentId, fields: NewStudent) -> Option<Student> {
        let mut rows = self.rows.write();
        let slot = rows.iter_mut().find(|s| s.id == Some(id))?;
        *slot = Student::with_id(id, fields);
        Some(slot.clone())
    }

    /// Returns whether a record was removed.
    pub fn delete(&self, id: StudentId) -> bool {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|s| s.id != Some(id));
        rows.len() != before
    }
}

fn sample_student() -> Student {
    Student {
        id: Some(StudentId::new(1)),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        age: 21,
        major: "Computer Science".to_string(),
    }
}
