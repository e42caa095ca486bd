pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod health;
pub mod student;
pub mod teaching;

use crate::{error::ApiError, state::AppState};
use axum::{Router, routing::get};
use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` selector shared by GET and DELETE
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Primary key of the record
    pub id: Option<String>,
}

impl IdQuery {
    /// A blank id counts as absent; anything else must be an integer
    pub fn id(&self) -> Result<Option<i32>, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::Validation(format!("Invalid ID: {raw}"))),
        }
    }
}

/// JSON resource routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/students",
            get(student::get_students)
                .post(student::create_student)
                .put(student::update_student)
                .delete(student::delete_student),
        )
        .route(
            "/faculty",
            get(faculty::get_faculty)
                .post(faculty::create_faculty)
                .put(faculty::update_faculty)
                .delete(faculty::delete_faculty),
        )
        .route(
            "/courses",
            get(course::get_courses)
                .post(course::create_course)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route(
            "/enrollment",
            get(enrollment::get_enrollments)
                .post(enrollment::create_enrollment)
                .put(enrollment::update_enrollment)
                .delete(enrollment::delete_enrollment),
        )
        .route(
            "/teaching",
            get(teaching::get_teachings)
                .post(teaching::create_teaching)
                .put(teaching::update_teaching)
                .delete(teaching::delete_teaching),
        )
}

#[cfg(test)]
mod test {
    use super::IdQuery;

    fn query(id: Option<&str>) -> IdQuery {
        IdQuery {
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_id_query_parsing() {
        assert_eq!(query(None).id().unwrap(), None);
        assert_eq!(query(Some("")).id().unwrap(), None);
        assert_eq!(query(Some(" 42 ")).id().unwrap(), Some(42));

        let err = query(Some("abc")).id().unwrap_err();
        assert_eq!(err.to_string(), "Invalid ID: abc");
    }
}
