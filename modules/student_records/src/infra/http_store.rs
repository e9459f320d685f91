use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::StudentRecordsConfig;
use crate::contract::{
    client::StudentStoreApi,
    error::{StoreError, StoreOperation},
    model::{NewStudent, Student, StudentId},
};
use crate::infra::TracedClient;

const COLLECTION: &str = "students";

/// Record store client speaking REST/JSON:
/// `GET|POST {base}/students`, `PUT|DELETE {base}/students/{id}`.
pub struct HttpStudentStore {
    client: TracedClient,
    base: Url,
}

impl HttpStudentStore {
    pub fn new(client: TracedClient, base: Url) -> Self {
        Self { client, base }
    }

    pub fn from_config(cfg: &StudentRecordsConfig) -> Result<Self, url::ParseError> {
        Ok(Self::new(TracedClient::default(), Url::parse(&cfg.base_url)?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, operation: StoreOperation, id: Option<StudentId>) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::remote(operation, "invalid store base URL"))?;
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        operation: StoreOperation,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let req = req
            .build()
            .map_err(|e| StoreError::remote(operation, e.to_string()))?;

        let response = self
            .client
            .execute(req)
            .await
            .map_err(|e| StoreError::remote(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::remote(operation, format!("HTTP {status}")));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        operation: StoreOperation,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::remote(operation, format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl StudentStoreApi for HttpStudentStore {
    #[instrument(name = "student_records.http.list", skip_all, fields(base = %self.base))]
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let op = StoreOperation::List;
        let url = self.url(op, None)?;
        let response = self.send(op, self.client.request(Method::GET, url)).await?;
        let students: Vec<Student> = Self::decode(op, response).await?;
        debug!(count = students.len(), "listed students");
        Ok(students)
    }

    #[instrument(name = "student_records.http.create", skip_all, fields(base = %self.base))]
    async fn create_student(&self, new_student: NewStudent) -> Result<Student, StoreError> {
        let op = StoreOperation::Create;
        let url = self.url(op, None)?;
        let response = self
            .send(op, self.client.request(Method::POST, url).json(&new_student))
            .await?;
        let created: Student = Self::decode(op, response).await?;
        if created.id.is_none() {
            return Err(StoreError::remote(op, "created record carries no identity"));
        }
        Ok(created)
    }

    #[instrument(name = "student_records.http.update", skip_all, fields(student_id = %id))]
    async fn update_student(&self, id: StudentId, student: Student) -> Result<(), StoreError> {
        let op = StoreOperation::Update;
        let url = self.url(op, Some(id))?;
        // The body is an ack or an echo; the caller commits its own draft.
        self.send(op, self.client.request(Method::PUT, url).json(&student))
            .await?;
        Ok(())
    }

    #[instrument(name = "student_records.http.delete", skip_all, fields(student_id = %id))]
    async fn delete_student(&self, id: StudentId) -> Result<(), StoreError> {
        let op = StoreOperation::Delete;
        let url = self.url(op, Some(id))?;
        self.send(op, self.client.request(Method::DELETE, url))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpStudentStore {
        HttpStudentStore::new(TracedClient::default(), Url::parse(base).unwrap())
    }

    #[test]
    fn collection_and_item_urls() {
        let s = store("http://127.0.0.1:8000");
        assert_eq!(
            s.url(StoreOperation::List, None).unwrap().as_str(),
            "http://127.0.0.1:8000/students"
        );
        assert_eq!(
            s.url(StoreOperation::Delete, Some(StudentId::new(3)))
                .unwrap()
                .as_str(),
            "http://127.0.0.1:8000/students/3"
        );
    }

    #[test]
    fn base_with_path_prefix_and_trailing_slash() {
        let s = store("http://host/api/");
        assert_eq!(
            s.url(StoreOperation::Update, Some(StudentId::new(12)))
                .unwrap()
                .as_str(),
            "http://host/api/students/12"
        );
    }

    #[test]
    fn cannot_be_a_base_url_is_a_remote_failure() {
        let s = store("mailto:admin@example.com");
        let err = s.url(StoreOperation::List, None).unwrap_err();
        assert_eq!(err.operation(), StoreOperation::List);
    }
}
