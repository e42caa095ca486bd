use crate::{
    dtos::{
        course::CourseRecord,
        input::{Numeric, provided, provided_number},
        teaching::TeachingRecord,
    },
    error::ApiError,
};
use database::{
    entities::faculty,
    services::faculty::{FacultyChanges, FacultyWithTeachings, NewFaculty},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyRecord {
    pub faculty_id: i32,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacultyTeaching {
    #[serde(flatten)]
    pub teaching: TeachingRecord,
    pub course: CourseRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacultyResponse {
    #[serde(flatten)]
    pub faculty: FacultyRecord,
    pub teachings: Vec<FacultyTeaching>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFacultyRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyRequest {
    pub faculty_id: Option<Numeric>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<faculty::Model> for FacultyRecord {
    fn from(model: faculty::Model) -> Self {
        Self {
            faculty_id: model.faculty_id,
            name: model.name,
            department: model.department,
            designation: model.designation,
            phone: model.phone,
            email: model.email,
        }
    }
}

impl From<FacultyWithTeachings> for FacultyResponse {
    fn from((faculty, teachings): FacultyWithTeachings) -> Self {
        Self {
            faculty: faculty.into(),
            teachings: teachings
                .into_iter()
                .map(|(teaching, course)| FacultyTeaching {
                    teaching: teaching.into(),
                    course: course.into(),
                })
                .collect(),
        }
    }
}

impl TryFrom<CreateFacultyRequest> for NewFaculty {
    type Error = ApiError;

    fn try_from(request: CreateFacultyRequest) -> Result<Self, Self::Error> {
        let (Some(name), Some(department), Some(designation), Some(phone), Some(email)) = (
            provided(request.name),
            provided(request.department),
            provided(request.designation),
            provided(request.phone),
            provided(request.email),
        ) else {
            return Err(ApiError::Validation("All fields are required".to_string()));
        };

        Ok(Self {
            name,
            department,
            designation,
            phone,
            email,
        })
    }
}

impl UpdateFacultyRequest {
    pub fn into_changes(self) -> Result<(Option<i32>, FacultyChanges), ApiError> {
        let faculty_id = provided_number(self.faculty_id)
            .map(|id| id.to_i32("facultyId"))
            .transpose()?;

        let changes = FacultyChanges {
            name: provided(self.name),
            department: provided(self.department),
            designation: provided(self.designation),
            phone: provided(self.phone),
            email: provided(self.email),
        };

        Ok((faculty_id, changes))
    }
}
