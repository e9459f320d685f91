#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;

use student_records::client::StudentStoreApi;
use student_records::error::{StoreError, StoreOperation};
use student_records::model::{NewStudent, Student, StudentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(NewStudent),
    Update(StudentId, Student),
    Delete(StudentId),
}

/// In-memory record store that assigns `max id + 1`, logs every call and
/// can be told to reject chosen operations.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Student>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<Vec<StoreOperation>>,
}

impl FakeStore {
    pub fn with_students(n: u64) -> Self {
        let store = Self::default();
        *store.rows.lock() = (1..=n).map(student).collect();
        store
    }

    pub fn fail(&self, op: StoreOperation) {
        self.failing.lock().push(op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn stored(&self) -> Vec<Student> {
        self.rows.lock().clone()
    }

    fn check(&self, op: StoreOperation) -> Result<(), StoreError> {
        if self.failing.lock().contains(&op) {
            Err(StoreError::remote(op, "simulated failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StudentStoreApi for FakeStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.calls.lock().push(Call::List);
        self.check(StoreOperation::List)?;
        Ok(self.rows.lock().clone())
    }

    async fn create_student(&self, new_student: NewStudent) -> Result<Student, StoreError> {
        self.calls.lock().push(Call::Create(new_student.clone()));
        self.check(StoreOperation::Create)?;
        let mut rows = self.rows.lock();
        let next = rows.iter().filter_map(|s| s.id).map(StudentId::get).max().unwrap_or(0) + 1;
        let created = Student::with_id(StudentId::new(next), new_student);
        rows.push(created.clone());
        Ok(created)
    }

    async fn update_student(&self, id: StudentId, student: Student) -> Result<(), StoreError> {
        self.calls.lock().push(Call::Update(id, student.clone()));
        self.check(StoreOperation::Update)?;
        let mut rows = self.rows.lock();
        if let Some(slot) = rows.iter_mut().find(|s| s.id == Some(id)) {
            *slot = student;
        }
        Ok(())
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), StoreError> {
        self.calls.lock().push(Call::Delete(id));
        self.check(StoreOperation::Delete)?;
        self.rows.lock().retain(|s| s.id != Some(id));
        Ok(())
    }
}

pub fn student(n: u64) -> Student {
    Student {
        id: Some(StudentId::new(n)),
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("student{n}@example.com"),
        age: 18 + (n % 10) as u32,
        major: "Computer Science".to_string(),
    }
}

pub fn id(n: u64) -> StudentId {
    StudentId::new(n)
}
