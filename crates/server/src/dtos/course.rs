use crate::{
    dtos::{
        enrollment::EnrollmentRecord,
        faculty::FacultyRecord,
        input::{Numeric, optional_i32, provided, provided_number},
        student::StudentRecord,
        teaching::TeachingRecord,
    },
    error::ApiError,
};
use database::{
    entities::course,
    services::course::{CourseChanges, CourseDetail, CourseSummary, NewCourse},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_id: i32,
    pub course_name: String,
    pub department: String,
    pub credit: i32,
}

/// An enrollment of the course; the student is only joined on the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseEnrollment {
    #[serde(flatten)]
    pub enrollment: EnrollmentRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentRecord>,
}

/// A teaching assignment of the course; the faculty member is only joined on the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseTeaching {
    #[serde(flatten)]
    pub teaching: TeachingRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<FacultyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    #[serde(flatten)]
    pub course: CourseRecord,
    pub enrollments: Vec<CourseEnrollment>,
    pub teachings: Vec<CourseTeaching>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub credit: Option<Numeric>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub course_id: Option<Numeric>,
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub credit: Option<Numeric>,
}

impl From<course::Model> for CourseRecord {
    fn from(model: course::Model) -> Self {
        Self {
            course_id: model.course_id,
            course_name: model.course_name,
            department: model.department,
            credit: model.credit,
        }
    }
}

impl From<CourseSummary> for CourseResponse {
    fn from((course, enrollments, teachings): CourseSummary) -> Self {
        Self {
            course: course.into(),
            enrollments: enrollments
                .into_iter()
                .map(|enrollment| CourseEnrollment {
                    enrollment: enrollment.into(),
                    student: None,
                })
                .collect(),
            teachings: teachings
                .into_iter()
                .map(|teaching| CourseTeaching {
                    teaching: teaching.into(),
                    faculty: None,
                })
                .collect(),
        }
    }
}

impl From<CourseDetail> for CourseResponse {
    fn from((course, enrollments, teachings): CourseDetail) -> Self {
        Self {
            course: course.into(),
            enrollments: enrollments
                .into_iter()
                .map(|(enrollment, student)| CourseEnrollment {
                    enrollment: enrollment.into(),
                    student: Some(student.into()),
                })
                .collect(),
            teachings: teachings
                .into_iter()
                .map(|(teaching, faculty)| CourseTeaching {
                    teaching: teaching.into(),
                    faculty: Some(faculty.into()),
                })
                .collect(),
        }
    }
}

impl TryFrom<CreateCourseRequest> for NewCourse {
    type Error = ApiError;

    fn try_from(request: CreateCourseRequest) -> Result<Self, Self::Error> {
        let (Some(course_name), Some(department), Some(credit)) = (
            provided(request.course_name),
            provided(request.department),
            provided_number(request.credit),
        ) else {
            return Err(ApiError::Validation("All fields are required".to_string()));
        };

        Ok(Self {
            course_name,
            department,
            credit: credit.to_i32("credit")?,
        })
    }
}

impl UpdateCourseRequest {
    pub fn into_changes(self) -> Result<(Option<i32>, CourseChanges), ApiError> {
        let course_id = optional_i32(self.course_id, "courseId")?;

        let changes = CourseChanges {
            course_name: provided(self.course_name),
            department: provided(self.department),
            credit: optional_i32(self.credit, "credit")?,
        };

        Ok((course_id, changes))
    }
}

#[cfg(test)]
mod test {
    use super::{CreateCourseRequest, UpdateCourseRequest};
    use database::services::course::NewCourse;

    #[test]
    fn test_credit_string_is_coerced() {
        let request: CreateCourseRequest = serde_json::from_str(
            r#"{"courseName":"Operating Systems","department":"CS","credit":"4"}"#,
        )
        .unwrap();

        let course = NewCourse::try_from(request).unwrap();
        assert_eq!(course.credit, 4);
    }

    #[test]
    fn test_zero_credit_counts_as_provided() {
        let request: CreateCourseRequest =
            serde_json::from_str(r#"{"courseName":"Seminar","department":"CS","credit":0}"#)
                .unwrap();
        assert_eq!(NewCourse::try_from(request).unwrap().credit, 0);

        let request: UpdateCourseRequest =
            serde_json::from_str(r#"{"courseId":1,"credit":0}"#).unwrap();
        let (_, changes) = request.into_changes().unwrap();
        assert_eq!(changes.credit, Some(0));
    }

    #[test]
    fn test_missing_credit_is_rejected() {
        let request: CreateCourseRequest =
            serde_json::from_str(r#"{"courseName":"Seminar","department":"CS"}"#).unwrap();

        let err = NewCourse::try_from(request).unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");
    }
}
