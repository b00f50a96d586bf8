//! Student directory: wire types, persistence seam and the service that ties them together.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{StudentFields, StudentPayload, StudentRecord, MISSING_FIELDS};
pub use repository::{SeaOrmStudentRepository, StudentRepository};
pub use service::StudentService;

/// Service wired to the SeaORM repository, as used by the HTTP server.
pub type StudentDirectory = StudentService<SeaOrmStudentRepository>;
