use crate::{
    dtos::student::StudentResponse,
    web::{
        pages::{FieldKind, FormField, Page},
        table::Column,
    },
};

pub struct StudentsPage;

const FIELDS: &[FormField] = &[
    FormField::required("name", "Name", FieldKind::Text),
    FormField::required("dob", "Date of Birth", FieldKind::Date),
    FormField::required("department", "Department", FieldKind::Text),
    FormField::required("gender", "Gender", FieldKind::Text).placeholder("Male/Female/Other"),
    FormField::required("phone", "Phone", FieldKind::Tel),
    FormField::required("email", "Email", FieldKind::Email),
];

impl Page for StudentsPage {
    type Record = StudentResponse;

    const PATH: &'static str = "/students";
    const ENDPOINT: &'static str = "/students";
    const TITLE: &'static str = "Students";
    const NOUN: &'static str = "Student";
    const PLURAL: &'static str = "students";
    const ID_FIELD: &'static str = "studentId";

    fn id(record: &StudentResponse) -> i32 {
        record.student.student_id
    }

    fn columns<'a>() -> Vec<Column<'a, StudentResponse>> {
        vec![
            Column::new("ID", |s: &StudentResponse| Some(s.student.student_id.to_string())),
            Column::new("Name", |s: &StudentResponse| Some(s.student.name.clone())),
            Column::new("Date of Birth", |s: &StudentResponse| {
                Some(s.student.dob.format("%-m/%-d/%Y").to_string())
            }),
            Column::new("Department", |s: &StudentResponse| Some(s.student.department.clone())),
            Column::new("Gender", |s: &StudentResponse| Some(s.student.gender.clone())),
            Column::new("Phone", |s: &StudentResponse| Some(s.student.phone.clone())),
            Column::new("Email", |s: &StudentResponse| Some(s.student.email.clone())),
        ]
    }

    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn form_values(record: &StudentResponse) -> Vec<(&'static str, String)> {
        let s = &record.student;
        vec![
            ("name", s.name.clone()),
            ("dob", s.dob.format("%Y-%m-%d").to_string()),
            ("department", s.department.clone()),
            ("gender", s.gender.clone()),
            ("phone", s.phone.clone()),
            ("email", s.email.clone()),
        ]
    }

    fn confirm_prompt(record: &StudentResponse) -> String {
        format!("Are you sure you want to delete {}?", record.student.name)
    }
}
