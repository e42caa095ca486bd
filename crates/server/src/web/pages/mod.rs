pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod student;
pub mod teaching;

pub use course::CoursesPage;
pub use enrollment::EnrollmentPage;
pub use faculty::FacultyPage;
pub use student::StudentsPage;
pub use teaching::TeachingPage;

use crate::{
    dtos::{course::CourseResponse, faculty::FacultyResponse, student::StudentResponse},
    web::{
        api::{ApiFailure, ResourceApi, fetch_list},
        table::Column,
    },
};
use serde::de::DeserializeOwned;

/// Input control used for a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Number,
    /// A `<select>` over the records of another page
    Select(Reference),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Request body key, e.g. `courseName`
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            placeholder: None,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: None,
        }
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

/// A list another page's form picks foreign keys from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reference {
    Students,
    Faculty,
    Courses,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl Reference {
    pub async fn fetch(self, api: &dyn ResourceApi) -> Result<Vec<SelectOption>, ApiFailure> {
        let options = match self {
            Self::Students => fetch_list::<StudentResponse>(api, StudentsPage::ENDPOINT)
                .await?
                .into_iter()
                .map(|s| SelectOption {
                    value: s.student.student_id.to_string(),
                    label: s.student.name,
                })
                .collect(),
            Self::Faculty => fetch_list::<FacultyResponse>(api, FacultyPage::ENDPOINT)
                .await?
                .into_iter()
                .map(|f| SelectOption {
                    value: f.faculty.faculty_id.to_string(),
                    label: f.faculty.name,
                })
                .collect(),
            Self::Courses => fetch_list::<CourseResponse>(api, CoursesPage::ENDPOINT)
                .await?
                .into_iter()
                .map(|c| SelectOption {
                    value: c.course.course_id.to_string(),
                    label: c.course.course_name,
                })
                .collect(),
        };

        Ok(options)
    }
}

/// Everything that differs between the five entity pages
pub trait Page: Send + Sync + 'static {
    type Record: DeserializeOwned + Clone + Send + Sync;

    /// Route of the HTML page
    const PATH: &'static str;
    /// Route of the JSON resource, relative to the API router
    const ENDPOINT: &'static str;
    const TITLE: &'static str;
    /// Singular name used in notifications, e.g. "Student"
    const NOUN: &'static str;
    /// Singular name used in modal titles
    const LABEL: &'static str = Self::NOUN;
    /// Plural used in "Failed to fetch ..."
    const PLURAL: &'static str;
    /// Primary key field sent with updates
    const ID_FIELD: &'static str;
    const REFERENCES: &'static [Reference] = &[];

    fn id(record: &Self::Record) -> i32;

    fn columns<'a>() -> Vec<Column<'a, Self::Record>>;

    fn fields() -> &'static [FormField];

    /// Form values for editing `record`, keyed by field name
    fn form_values(record: &Self::Record) -> Vec<(&'static str, String)>;

    fn confirm_prompt(record: &Self::Record) -> String;
}
