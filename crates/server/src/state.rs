use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::students::{SeaOrmStudentRepository, StudentDirectory};

/// Shared handler state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentDirectory>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = SeaOrmStudentRepository::new(db);
        Self { students: Arc::new(StudentDirectory::new(Arc::new(repo))) }
    }
}
