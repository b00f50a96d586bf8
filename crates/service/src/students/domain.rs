use models::student;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

pub const MISSING_FIELDS: &str = "Missing required fields";

/// Student as exposed over HTTP. Field order is the response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i32,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub age: i32,
    pub sex: String,
    pub course: String,
}

impl From<student::Model> for StudentRecord {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            student_name: m.student_name,
            age: m.age,
            sex: m.sex,
            course: m.course,
        }
    }
}

/// Request body for create and update. Every key is optional on the wire;
/// which ones are actually required is decided by the operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPayload {
    #[serde(rename = "studentName")]
    pub student_name: Option<String>,
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub course: Option<String>,
}

/// The four writable columns, all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub student_name: String,
    pub age: i32,
    pub sex: String,
    pub course: String,
}

impl StudentPayload {
    /// Create: every key must be present and non-null.
    pub fn into_new_student(self) -> Result<StudentFields, ServiceError> {
        match (self.student_name, self.age, self.sex, self.course) {
            (Some(student_name), Some(age), Some(sex), Some(course)) => {
                Ok(StudentFields { student_name, age, sex, course })
            }
            _ => Err(missing_fields()),
        }
    }

    /// Update: full replacement. An empty name or an age of zero counts as missing.
    pub fn into_replacement(self) -> Result<StudentFields, ServiceError> {
        let student_name = self.student_name.filter(|n| !n.is_empty());
        let age = self.age.filter(|a| *a != 0);
        match (student_name, age, self.sex, self.course) {
            (Some(student_name), Some(age), Some(sex), Some(course)) => {
                Ok(StudentFields { student_name, age, sex, course })
            }
            _ => Err(missing_fields()),
        }
    }
}

fn missing_fields() -> ServiceError {
    ServiceError::Validation(MISSING_FIELDS.into())
}
