use crate::{
    dtos::teaching::TeachingResponse,
    web::{
        pages::{FieldKind, FormField, Page, Reference},
        table::Column,
    },
};

pub struct TeachingPage;

const FIELDS: &[FormField] = &[
    FormField::required("facultyId", "Faculty", FieldKind::Select(Reference::Faculty)),
    FormField::required("courseId", "Course", FieldKind::Select(Reference::Courses)),
    FormField::required("semester", "Semester", FieldKind::Text)
        .placeholder("Fall 2024, Spring 2025, etc."),
];

impl Page for TeachingPage {
    type Record = TeachingResponse;

    const PATH: &'static str = "/teaching";
    const ENDPOINT: &'static str = "/teaching";
    const TITLE: &'static str = "Teaching Assignments";
    const NOUN: &'static str = "Teaching assignment";
    const LABEL: &'static str = "Teaching Assignment";
    const PLURAL: &'static str = "teaching assignments";
    const ID_FIELD: &'static str = "teachingId";
    const REFERENCES: &'static [Reference] = &[Reference::Faculty, Reference::Courses];

    fn id(record: &TeachingResponse) -> i32 {
        record.teaching.teaching_id
    }

    fn columns<'a>() -> Vec<Column<'a, TeachingResponse>> {
        vec![
            Column::new("ID", |t: &TeachingResponse| Some(t.teaching.teaching_id.to_string())),
            Column::new("Faculty", |t: &TeachingResponse| Some(t.faculty.name.clone())),
            Column::new("Course", |t: &TeachingResponse| Some(t.course.course_name.clone())),
            Column::new("Semester", |t: &TeachingResponse| Some(t.teaching.semester.clone())),
        ]
    }

    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn form_values(record: &TeachingResponse) -> Vec<(&'static str, String)> {
        let t = &record.teaching;
        vec![
            ("facultyId", t.faculty_id.to_string()),
            ("courseId", t.course_id.to_string()),
            ("semester", t.semester.clone()),
        ]
    }

    fn confirm_prompt(_: &TeachingResponse) -> String {
        "Are you sure you want to delete this teaching assignment?".to_string()
    }
}
