use crate::{
    dtos::faculty::FacultyResponse,
    web::{
        pages::{FieldKind, FormField, Page},
        table::Column,
    },
};

pub struct FacultyPage;

const FIELDS: &[FormField] = &[
    FormField::required("name", "Name", FieldKind::Text),
    FormField::required("department", "Department", FieldKind::Text),
    FormField::required("designation", "Designation", FieldKind::Text)
        .placeholder("Professor, Associate Professor, etc."),
    FormField::required("phone", "Phone", FieldKind::Tel),
    FormField::required("email", "Email", FieldKind::Email),
];

impl Page for FacultyPage {
    type Record = FacultyResponse;

    const PATH: &'static str = "/faculty";
    const ENDPOINT: &'static str = "/faculty";
    const TITLE: &'static str = "Faculty";
    const NOUN: &'static str = "Faculty";
    const PLURAL: &'static str = "faculty";
    const ID_FIELD: &'static str = "facultyId";

    fn id(record: &FacultyResponse) -> i32 {
        record.faculty.faculty_id
    }

    fn columns<'a>() -> Vec<Column<'a, FacultyResponse>> {
        vec![
            Column::new("ID", |f: &FacultyResponse| Some(f.faculty.faculty_id.to_string())),
            Column::new("Name", |f: &FacultyResponse| Some(f.faculty.name.clone())),
            Column::new("Department", |f: &FacultyResponse| Some(f.faculty.department.clone())),
            Column::new("Designation", |f: &FacultyResponse| Some(f.faculty.designation.clone())),
            Column::new("Phone", |f: &FacultyResponse| Some(f.faculty.phone.clone())),
            Column::new("Email", |f: &FacultyResponse| Some(f.faculty.email.clone())),
        ]
    }

    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn form_values(record: &FacultyResponse) -> Vec<(&'static str, String)> {
        let f = &record.faculty;
        vec![
            ("name", f.name.clone()),
            ("department", f.department.clone()),
            ("designation", f.designation.clone()),
            ("phone", f.phone.clone()),
            ("email", f.email.clone()),
        ]
    }

    fn confirm_prompt(record: &FacultyResponse) -> String {
        format!("Are you sure you want to delete {}?", record.faculty.name)
    }
}
