use crate::{
    dtos::course::CourseResponse,
    web::{
        pages::{FieldKind, FormField, Page},
        table::Column,
    },
};

pub struct CoursesPage;

const FIELDS: &[FormField] = &[
    FormField::required("courseName", "Course Name", FieldKind::Text),
    FormField::required("department", "Department", FieldKind::Text),
    FormField::required("credit", "Credits", FieldKind::Number),
];

impl Page for CoursesPage {
    type Record = CourseResponse;

    const PATH: &'static str = "/courses";
    const ENDPOINT: &'static str = "/courses";
    const TITLE: &'static str = "Courses";
    const NOUN: &'static str = "Course";
    const PLURAL: &'static str = "courses";
    const ID_FIELD: &'static str = "courseId";

    fn id(record: &CourseResponse) -> i32 {
        record.course.course_id
    }

    fn columns<'a>() -> Vec<Column<'a, CourseResponse>> {
        vec![
            Column::new("ID", |c: &CourseResponse| Some(c.course.course_id.to_string())),
            Column::new("Course Name", |c: &CourseResponse| Some(c.course.course_name.clone())),
            Column::new("Department", |c: &CourseResponse| Some(c.course.department.clone())),
            Column::new("Credits", |c: &CourseResponse| Some(c.course.credit.to_string())),
        ]
    }

    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn form_values(record: &CourseResponse) -> Vec<(&'static str, String)> {
        let c = &record.course;
        vec![
            ("courseName", c.course_name.clone()),
            ("department", c.department.clone()),
            ("credit", c.credit.to_string()),
        ]
    }

    fn confirm_prompt(record: &CourseResponse) -> String {
        format!("Are you sure you want to delete {}?", record.course.course_name)
    }
}
