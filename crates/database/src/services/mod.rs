pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod student;
pub mod teaching;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entities::{course, faculty, student};
    use crate::services::{
        course::{CourseService, NewCourse},
        faculty::{FacultyService, NewFaculty},
        student::{NewStudent, StudentService},
    };
    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};

    /// Fresh in-memory database with the full schema applied
    pub async fn setup() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        db
    }

    pub async fn insert_student(db: &DatabaseConnection, email: &str) -> student::Model {
        StudentService::create(
            db,
            NewStudent {
                name: "Rahul Sharma".to_string(),
                dob: NaiveDate::from_ymd_opt(2002, 5, 15).unwrap(),
                department: "Computer Science".to_string(),
                gender: "Male".to_string(),
                phone: "9876543210".to_string(),
                email: email.to_string(),
            },
        )
        .await
        .expect("failed to insert student")
    }

    pub async fn insert_faculty(db: &DatabaseConnection, email: &str) -> faculty::Model {
        FacultyService::create(
            db,
            NewFaculty {
                name: "Dr. Anita Deshmukh".to_string(),
                department: "Computer Science".to_string(),
                designation: "Professor".to_string(),
                phone: "9988776655".to_string(),
                email: email.to_string(),
            },
        )
        .await
        .expect("failed to insert faculty")
    }

    pub async fn insert_course(db: &DatabaseConnection, name: &str) -> course::Model {
        CourseService::create(
            db,
            NewCourse {
                course_name: name.to_string(),
                department: "Computer Science".to_string(),
                credit: 4,
            },
        )
        .await
        .expect("failed to insert course")
    }
}
