use crate::{
    dtos::{
        course::CourseRecord,
        enrollment::EnrollmentRecord,
        input::{Numeric, parse_date, provided, provided_number},
    },
    error::ApiError,
};
use chrono::NaiveDate;
use database::{
    entities::student,
    services::student::{NewStudent, StudentChanges, StudentWithEnrollments},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_id: i32,
    pub name: String,
    pub dob: NaiveDate,
    pub department: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
}

/// One of a student's enrollments with the course it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentEnrollment {
    #[serde(flatten)]
    pub enrollment: EnrollmentRecord,
    pub course: CourseRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub student: StudentRecord,
    pub enrollments: Vec<StudentEnrollment>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub name: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub dob: Option<String>,
    pub department: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub student_id: Option<Numeric>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub department: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<student::Model> for StudentRecord {
    fn from(model: student::Model) -> Self {
        Self {
            student_id: model.student_id,
            name: model.name,
            dob: model.dob,
            department: model.department,
            gender: model.gender,
            phone: model.phone,
            email: model.email,
        }
    }
}

impl From<StudentWithEnrollments> for StudentResponse {
    fn from((student, enrollments): StudentWithEnrollments) -> Self {
        Self {
            student: student.into(),
            enrollments: enrollments
                .into_iter()
                .map(|(enrollment, course)| StudentEnrollment {
                    enrollment: enrollment.into(),
                    course: course.into(),
                })
                .collect(),
        }
    }
}

impl TryFrom<CreateStudentRequest> for NewStudent {
    type Error = ApiError;

    fn try_from(request: CreateStudentRequest) -> Result<Self, Self::Error> {
        let (Some(name), Some(dob), Some(department), Some(gender), Some(phone), Some(email)) = (
            provided(request.name),
            provided(request.dob),
            provided(request.department),
            provided(request.gender),
            provided(request.phone),
            provided(request.email),
        ) else {
            return Err(ApiError::Validation("All fields are required".to_string()));
        };

        Ok(Self {
            name,
            dob: parse_date(&dob, "date of birth")?,
            department,
            gender,
            phone,
            email,
        })
    }
}

impl UpdateStudentRequest {
    /// Splits the body into the target id and the columns to overwrite
    pub fn into_changes(self) -> Result<(Option<i32>, StudentChanges), ApiError> {
        let student_id = provided_number(self.student_id)
            .map(|id| id.to_i32("studentId"))
            .transpose()?;

        let changes = StudentChanges {
            name: provided(self.name),
            dob: provided(self.dob)
                .map(|dob| parse_date(&dob, "date of birth"))
                .transpose()?,
            department: provided(self.department),
            gender: provided(self.gender),
            phone: provided(self.phone),
            email: provided(self.email),
        };

        Ok((student_id, changes))
    }
}

#[cfg(test)]
mod test {
    use super::{CreateStudentRequest, UpdateStudentRequest};
    use database::services::student::NewStudent;

    #[test]
    fn test_create_requires_every_field() {
        let request: CreateStudentRequest = serde_json::from_str(
            r#"{"name":"A","dob":"2000-01-01","department":"CS","gender":"F","phone":"","email":"a@x.edu"}"#,
        )
        .unwrap();

        let err = NewStudent::try_from(request).unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[test]
    fn test_create_rejects_bad_date() {
        let request: CreateStudentRequest = serde_json::from_str(
            r#"{"name":"A","dob":"yesterday","department":"CS","gender":"F","phone":"1","email":"a@x.edu"}"#,
        )
        .unwrap();

        let err = NewStudent::try_from(request).unwrap_err();
        assert_eq!(err.to_string(), "Invalid date of birth");
    }

    #[test]
    fn test_update_ignores_empty_strings() {
        let request: UpdateStudentRequest =
            serde_json::from_str(r#"{"studentId":"3","name":"","phone":"555"}"#).unwrap();

        let (id, changes) = request.into_changes().unwrap();
        assert_eq!(id, Some(3));
        assert_eq!(changes.name, None);
        assert_eq!(changes.phone.as_deref(), Some("555"));
        assert!(changes.dob.is_none());
    }
}
