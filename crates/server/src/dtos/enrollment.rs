use crate::{
    dtos::{
        course::CourseRecord,
        input::{Numeric, double_option, optional_i32},
        student::StudentRecord,
    },
    error::ApiError,
};
use database::{
    entities::enrollment,
    services::enrollment::{EnrollmentChanges, EnrollmentDetail, NewEnrollment},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub enrollment_id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    #[serde(flatten)]
    pub enrollment: EnrollmentRecord,
    pub student: StudentRecord,
    pub course: CourseRecord,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub student_id: Option<Numeric>,
    pub course_id: Option<Numeric>,
    pub grade: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    pub enrollment_id: Option<Numeric>,
    pub student_id: Option<Numeric>,
    pub course_id: Option<Numeric>,
    /// Absent or `""` keeps the grade, `null` clears it
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub grade: Option<Option<String>>,
}

impl From<enrollment::Model> for EnrollmentRecord {
    fn from(model: enrollment::Model) -> Self {
        Self {
            enrollment_id: model.enrollment_id,
            student_id: model.student_id,
            course_id: model.course_id,
            grade: model.grade,
        }
    }
}

impl From<EnrollmentDetail> for EnrollmentResponse {
    fn from((enrollment, student, course): EnrollmentDetail) -> Self {
        Self {
            enrollment: enrollment.into(),
            student: student.into(),
            course: course.into(),
        }
    }
}

impl TryFrom<CreateEnrollmentRequest> for NewEnrollment {
    type Error = ApiError;

    fn try_from(request: CreateEnrollmentRequest) -> Result<Self, Self::Error> {
        let (Some(student_id), Some(course_id)) = (
            optional_i32(request.student_id, "studentId")?,
            optional_i32(request.course_id, "courseId")?,
        ) else {
            return Err(ApiError::Validation(
                "Student ID and Course ID are required".to_string(),
            ));
        };

        Ok(Self {
            student_id,
            course_id,
            grade: request.grade.filter(|grade| !grade.is_empty()),
        })
    }
}

impl UpdateEnrollmentRequest {
    pub fn into_changes(self) -> Result<(Option<i32>, EnrollmentChanges), ApiError> {
        let enrollment_id = optional_i32(self.enrollment_id, "enrollmentId")?;

        let grade = match self.grade {
            Some(Some(grade)) if grade.is_empty() => None,
            other => other,
        };

        let changes = EnrollmentChanges {
            student_id: optional_i32(self.student_id, "studentId")?,
            course_id: optional_i32(self.course_id, "courseId")?,
            grade,
        };

        Ok((enrollment_id, changes))
    }
}

#[cfg(test)]
mod test {
    use super::{CreateEnrollmentRequest, UpdateEnrollmentRequest};
    use database::services::enrollment::NewEnrollment;

    #[test]
    fn test_create_requires_both_ids() {
        let request: CreateEnrollmentRequest =
            serde_json::from_str(r#"{"studentId":1,"grade":"A"}"#).unwrap();

        let err = NewEnrollment::try_from(request).unwrap_err();
        assert_eq!(err.to_string(), "Student ID and Course ID are required");
    }

    #[test]
    fn test_create_with_form_strings() {
        let request: CreateEnrollmentRequest =
            serde_json::from_str(r#"{"studentId":"2","courseId":"5","grade":""}"#).unwrap();

        let enrollment = NewEnrollment::try_from(request).unwrap();
        assert_eq!(enrollment.student_id, 2);
        assert_eq!(enrollment.course_id, 5);
        assert_eq!(enrollment.grade, None);
    }

    #[test]
    fn test_update_grade_states() {
        let keep: UpdateEnrollmentRequest =
            serde_json::from_str(r#"{"enrollmentId":1,"grade":""}"#).unwrap();
        assert_eq!(keep.into_changes().unwrap().1.grade, None);

        let clear: UpdateEnrollmentRequest =
            serde_json::from_str(r#"{"enrollmentId":1,"grade":null}"#).unwrap();
        assert_eq!(clear.into_changes().unwrap().1.grade, Some(None));

        let set: UpdateEnrollmentRequest =
            serde_json::from_str(r#"{"enrollmentId":1,"grade":"B+"}"#).unwrap();
        assert_eq!(
            set.into_changes().unwrap().1.grade,
            Some(Some("B+".to_string()))
        );
    }
}
