use crate::{
    dtos::enrollment::EnrollmentResponse,
    web::{
        pages::{FieldKind, FormField, Page, Reference},
        table::Column,
    },
};

pub struct EnrollmentPage;

const FIELDS: &[FormField] = &[
    FormField::required("studentId", "Student", FieldKind::Select(Reference::Students)),
    FormField::required("courseId", "Course", FieldKind::Select(Reference::Courses)),
    FormField::optional("grade", "Grade (Optional)", FieldKind::Text)
        .placeholder("A+, A, B+, etc."),
];

impl Page for EnrollmentPage {
    type Record = EnrollmentResponse;

    const PATH: &'static str = "/enrollment";
    const ENDPOINT: &'static str = "/enrollment";
    const TITLE: &'static str = "Enrollments";
    const NOUN: &'static str = "Enrollment";
    const PLURAL: &'static str = "enrollments";
    const ID_FIELD: &'static str = "enrollmentId";
    const REFERENCES: &'static [Reference] = &[Reference::Students, Reference::Courses];

    fn id(record: &EnrollmentResponse) -> i32 {
        record.enrollment.enrollment_id
    }

    fn columns<'a>() -> Vec<Column<'a, EnrollmentResponse>> {
        vec![
            Column::new("ID", |e: &EnrollmentResponse| {
                Some(e.enrollment.enrollment_id.to_string())
            }),
            Column::new("Student", |e: &EnrollmentResponse| Some(e.student.name.clone())),
            Column::new("Course", |e: &EnrollmentResponse| Some(e.course.course_name.clone())),
            Column::new("Grade", |e: &EnrollmentResponse| {
                Some(
                    e.enrollment
                        .grade
                        .clone()
                        .unwrap_or_else(|| "Not Graded".to_string()),
                )
            }),
        ]
    }

    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn form_values(record: &EnrollmentResponse) -> Vec<(&'static str, String)> {
        let e = &record.enrollment;
        vec![
            ("studentId", e.student_id.to_string()),
            ("courseId", e.course_id.to_string()),
            ("grade", e.grade.clone().unwrap_or_default()),
        ]
    }

    fn confirm_prompt(_: &EnrollmentResponse) -> String {
        "Are you sure you want to delete this enrollment?".to_string()
    }
}
