#![cfg(test)]
use std::sync::Arc;

use configs::DatabaseConfig;
use models::db::connect_and_prepare;
use sea_orm::DatabaseConnection;

use crate::students::{SeaOrmStudentRepository, StudentDirectory};

/// Fresh private in-memory database with the schema in place.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_and_prepare(&DatabaseConfig::in_memory()).await?;
    Ok(db)
}

pub async fn get_service() -> Result<StudentDirectory, anyhow::Error> {
    let repo = SeaOrmStudentRepository::new(get_db().await?);
    Ok(StudentDirectory::new(Arc::new(repo)))
}
