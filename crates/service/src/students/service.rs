use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::students::domain::{StudentPayload, StudentRecord};
use crate::students::repository::StudentRepository;

/// Application service encapsulating the student directory rules:
/// presence checks, not-found reporting and mapping rows to records.
pub struct StudentService<R: StudentRepository> {
    repo: Arc<R>,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: StudentPayload) -> Result<StudentRecord, ServiceError> {
        let fields = payload.into_new_student().map_err(|e| {
            warn!("create rejected: missing fields");
            e
        })?;
        let created = self.repo.insert(fields).await?;
        info!(id = created.id, "student created");
        Ok(created.into())
    }

    pub async fn list(&self) -> Result<Vec<StudentRecord>, ServiceError> {
        let rows = self.repo.list().await?;
        Ok(rows.into_iter().map(StudentRecord::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<StudentRecord, ServiceError> {
        self.repo
            .get(id)
            .await?
            .map(StudentRecord::from)
            .ok_or_else(|| ServiceError::not_found("Student"))
    }

    /// Replace all four fields. An unknown id is reported before any payload problem.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: StudentPayload) -> Result<StudentRecord, ServiceError> {
        let fields = match payload.into_replacement() {
            Ok(f) => f,
            Err(e) => {
                if self.repo.get(id).await?.is_none() {
                    return Err(ServiceError::not_found("Student"));
                }
                warn!(id, "update rejected: missing fields");
                return Err(e);
            }
        };
        let updated = self
            .repo
            .replace(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student"))?;
        info!(id, "student updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<StudentRecord, ServiceError> {
        let removed = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Student"))?;
        info!(id, "student deleted");
        Ok(removed.into())
    }
}
