use async_trait::async_trait;
use models::student;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};

use crate::errors::ServiceError;
use crate::students::domain::StudentFields;

/// Persistence seam for students. Each call is one unit of work.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn insert(&self, fields: StudentFields) -> Result<student::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<student::Model>, ServiceError>;
    /// Overwrite all writable columns. `None` when no row has this id.
    async fn replace(&self, id: i32, fields: StudentFields) -> Result<Option<student::Model>, ServiceError>;
    /// Remove the row and hand back what it held. `None` when no row has this id.
    async fn delete(&self, id: i32) -> Result<Option<student::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        let rows = student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, fields: StudentFields) -> Result<student::Model, ServiceError> {
        let am = student::ActiveModel {
            student_name: Set(fields.student_name),
            age: Set(fields.age),
            sex: Set(fields.sex),
            course: Set(fields.course),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn replace(&self, id: i32, fields: StudentFields) -> Result<Option<student::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let found = match student::Entity::find_by_id(id).one(&txn).await? {
            Some(m) => m,
            None => return Ok(None),
        };
        let mut am: student::ActiveModel = found.into();
        am.student_name = Set(fields.student_name);
        am.age = Set(fields.age);
        am.sex = Set(fields.sex);
        am.course = Set(fields.course);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let found = match student::Entity::find_by_id(id).one(&txn).await? {
            Some(m) => m,
            None => return Ok(None),
        };
        found.clone().delete(&txn).await?;
        txn.commit().await?;
        Ok(Some(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn fields(name: &str, age: i32) -> StudentFields {
        StudentFields {
            student_name: name.into(),
            age,
            sex: "M".into(),
            course: "History".into(),
        }
    }

    #[tokio::test]
    async fn repository_crud_roundtrip() -> Result<(), anyhow::Error> {
        let repo = SeaOrmStudentRepository::new(get_db().await?);

        let a = repo.insert(fields("Alan", 30)).await?;
        let b = repo.insert(fields("Barbara", 25)).await?;
        let listed = repo.list().await?;
        assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a.id, b.id]);

        let replaced = repo.replace(a.id, fields("Alan T", 31)).await?.unwrap();
        assert_eq!(replaced.id, a.id);
        assert_eq!(replaced.student_name, "Alan T");

        let removed = repo.delete(b.id).await?.unwrap();
        assert_eq!(removed, b);
        assert!(repo.get(b.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_rows_yield_none() -> Result<(), anyhow::Error> {
        let repo = SeaOrmStudentRepository::new(get_db().await?);
        assert!(repo.get(42).await?.is_none());
        assert!(repo.replace(42, fields("Nobody", 1)).await?.is_none());
        assert!(repo.delete(42).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn failed_replace_rolls_back() -> Result<(), anyhow::Error> {
        let repo = SeaOrmStudentRepository::new(get_db().await?);
        let a = repo.insert(fields("Alan", 30)).await?;
        repo.insert(fields("Barbara", 25)).await?;

        let err = repo.replace(a.id, fields("Barbara", 99)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let still = repo.get(a.id).await?.unwrap();
        assert_eq!(still, a);
        Ok(())
    }
}
