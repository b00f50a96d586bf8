use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

/// A student row. `student_name` carries a UNIQUE constraint; `sex` is stored
/// as given and never checked against a fixed set of values.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(200))")]
    pub student_name: String,
    pub age: i32,
    #[sea_orm(column_type = "String(StringLen::N(1))")]
    pub sex: String,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub course: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
