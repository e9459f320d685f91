use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    response::Json,
    Extension,
};
use serde::Serialize;
use student_records::model::{NewStudent, Student, StudentId};
use tracing::info;

use crate::error::AppError;
use crate::repo::StudentRepo;

// Extractors are taken as `Result` so rejections leave through `AppError`
// with a JSON body.
type JsonBody = Result<Json<NewStudent>, JsonRejection>;
type IdPath = Result<Path<StudentId>, PathRejection>;

#[derive(Debug, Serialize)]
pub struct DeletedDto {
    pub message: &'static str,
}

pub async fn list_students(Extension(repo): Extension<Arc<StudentRepo>>) -> Json<Vec<Student>> {
    let students = repo.list();
    info!(count = students.len(), "listing students");
    Json(students)
}

pub async fn create_student(
    Extension(repo): Extension<Arc<StudentRepo>>,
    body: JsonBody,
) -> Result<Json<Student>, AppError> {
    let Json(req) = body?;
    let student = repo.insert(req);
    if let Some(id) = student.id {
        info!(student_id = %id, "created student");
    }
    Ok(Json(student))
}

/// Replace every field of a record. An `id` in the body is ignored in favour
/// of the path.
pub async fn update_student(
    Extension(repo): Extension<Arc<StudentRepo>>,
    path: IdPath,
    body: JsonBody,
) -> Result<Json<Student>, AppError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let student = repo.update(id, req).ok_or(AppError::NotFound(id))?;
    info!(student_id = %id, "updated student");
    Ok(Json(student))
}

pub async fn delete_student(
    Extension(repo): Extension<Arc<StudentRepo>>,
    path: IdPath,
) -> Result<Json<DeletedDto>, AppError> {
    let Path(id) = path?;
    if !repo.delete(id) {
        return Err(AppError::NotFound(id));
    }
    info!(student_id = %id, "deleted student");
    Ok(Json(DeletedDto {
        message: "Student Deleted Successfully",
    }))
}
