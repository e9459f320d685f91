use async_trait::async_trait;

use crate::contract::{
    error::StoreError,
    model::{NewStudent, Student, StudentId},
};

/// Record store operations the table controller depends on.
///
/// Implemented over HTTP by [`crate::infra::HttpStudentStore`]; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait StudentStoreApi: Send + Sync {
    /// Fetch the full record set.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;

    /// Persist a new record; the returned record carries its identity.
    async fn create_student(&self, new_student: NewStudent) -> Result<Student, StoreError>;

    /// Replace the stored fields of `id` with `student`.
    async fn update_student(&self, id: StudentId, student: Student) -> Result<(), StoreError>;

    /// Remove the record `id`.
    async fn delete_student(&self, id: StudentId) -> Result<(), StoreError>;
}
