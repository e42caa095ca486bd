use crate::{
    dtos::{
        course::CourseRecord,
        faculty::FacultyRecord,
        input::{Numeric, optional_i32, provided},
    },
    error::ApiError,
};
use database::{
    entities::teaching,
    services::teaching::{NewTeaching, TeachingChanges, TeachingDetail},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeachingRecord {
    pub teaching_id: i32,
    pub faculty_id: i32,
    pub course_id: i32,
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeachingResponse {
    #[serde(flatten)]
    pub teaching: TeachingRecord,
    pub faculty: FacultyRecord,
    pub course: CourseRecord,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeachingRequest {
    pub faculty_id: Option<Numeric>,
    pub course_id: Option<Numeric>,
    pub semester: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeachingRequest {
    pub teaching_id: Option<Numeric>,
    pub faculty_id: Option<Numeric>,
    pub course_id: Option<Numeric>,
    pub semester: Option<String>,
}

impl From<teaching::Model> for TeachingRecord {
    fn from(model: teaching::Model) -> Self {
        Self {
            teaching_id: model.teaching_id,
            faculty_id: model.faculty_id,
            course_id: model.course_id,
            semester: model.semester,
        }
    }
}

impl From<TeachingDetail> for TeachingResponse {
    fn from((teaching, faculty, course): TeachingDetail) -> Self {
        Self {
            teaching: teaching.into(),
            faculty: faculty.into(),
            course: course.into(),
        }
    }
}

impl TryFrom<CreateTeachingRequest> for NewTeaching {
    type Error = ApiError;

    fn try_from(request: CreateTeachingRequest) -> Result<Self, Self::Error> {
        let (Some(faculty_id), Some(course_id), Some(semester)) = (
            optional_i32(request.faculty_id, "facultyId")?,
            optional_i32(request.course_id, "courseId")?,
            provided(request.semester),
        ) else {
            return Err(ApiError::Validation(
                "Faculty ID, Course ID, and Semester are required".to_string(),
            ));
        };

        Ok(Self {
            faculty_id,
            course_id,
            semester,
        })
    }
}

impl UpdateTeachingRequest {
    pub fn into_changes(self) -> Result<(Option<i32>, TeachingChanges), ApiError> {
        let teaching_id = optional_i32(self.teaching_id, "teachingId")?;

        let changes = TeachingChanges {
            faculty_id: optional_i32(self.faculty_id, "facultyId")?,
            course_id: optional_i32(self.course_id, "courseId")?,
            semester: provided(self.semester),
        };

        Ok((teaching_id, changes))
    }
}
