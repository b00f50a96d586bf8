//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates request validation from data access.
//! - Reuses the entity definition in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod students;
#[cfg(test)]
pub mod test_support;
