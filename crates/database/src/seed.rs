use crate::{
    entities::{course, faculty, student},
    error::StoreError,
    services::{
        course::{CourseService, NewCourse},
        enrollment::{EnrollmentService, NewEnrollment},
        faculty::{FacultyService, NewFaculty},
        student::{NewStudent, StudentService},
        teaching::{NewTeaching, TeachingService},
    },
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Row counts written by [`seed`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub faculty: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub teachings: usize,
}

const STUDENTS: [(&str, (i32, u32, u32), &str, &str, &str, &str); 5] = [
    (
        "Rahul Sharma",
        (2002, 5, 15),
        "Computer Science",
        "Male",
        "9876543210",
        "rahul.sharma@university.edu",
    ),
    (
        "Priya Patel",
        (2003, 8, 22),
        "Computer Science",
        "Female",
        "9876543211",
        "priya.patel@university.edu",
    ),
    (
        "Amit Kumar",
        (2002, 11, 30),
        "Electronics",
        "Male",
        "9876543212",
        "amit.kumar@university.edu",
    ),
    (
        "Sneha Reddy",
        (2003, 3, 18),
        "Mechanical",
        "Female",
        "9876543213",
        "sneha.reddy@university.edu",
    ),
    ("Vikram Singh", (2002, 9, 25), "Civil", "Male", "9876543214", "vikram.singh@university.edu"),
];

const FACULTY: [(&str, &str, &str, &str, &str); 3] = [
    (
        "Dr. Anita Deshmukh",
        "Computer Science",
        "Professor",
        "9988776655",
        "anita.deshmukh@university.edu",
    ),
    (
        "Dr. Rajesh Verma",
        "Electronics",
        "Associate Professor",
        "9988776656",
        "rajesh.verma@university.edu",
    ),
    (
        "Dr. Sunita Iyer",
        "Computer Science",
        "Assistant Professor",
        "9988776657",
        "sunita.iyer@university.edu",
    ),
];

const COURSES: [(&str, &str, i32); 5] = [
    ("Data Structures and Algorithms", "Computer Science", 4),
    ("Database Management Systems", "Computer Science", 3),
    ("Digital Electronics", "Electronics", 3),
    ("Web Development", "Computer Science", 3),
    ("Operating Systems", "Computer Science", 4),
];

/// (student index, course index, grade)
const ENROLLMENTS: [(usize, usize, Option<&str>); 7] = [
    (0, 0, Some("A")),
    (0, 1, Some("A+")),
    (1, 0, Some("B+")),
    (1, 3, Some("A")),
    (2, 2, Some("B")),
    (3, 1, None),
    (4, 4, Some("A-")),
];

/// (faculty index, course index, semester)
const TEACHINGS: [(usize, usize, &str); 5] = [
    (0, 0, "Fall 2024"),
    (0, 1, "Fall 2024"),
    (1, 2, "Fall 2024"),
    (2, 3, "Spring 2025"),
    (0, 4, "Spring 2025"),
];

/// Populates an empty database with a small sample college
pub async fn seed(db: &DatabaseConnection) -> Result<SeedSummary, StoreError> {
    log::info!("Starting database seeding");

    let mut students: Vec<student::Model> = Vec::with_capacity(STUDENTS.len());
    for (name, (year, month, day), department, gender, phone, email) in STUDENTS {
        let dob = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| StoreError::Db(sea_orm::DbErr::Custom(format!("bad dob for {name}"))))?;

        students.push(
            StudentService::create(
                db,
                NewStudent {
                    name: name.to_string(),
                    dob,
                    department: department.to_string(),
                    gender: gender.to_string(),
                    phone: phone.to_string(),
                    email: email.to_string(),
                },
            )
            .await?,
        );
    }
    log::info!("Created {} students", students.len());

    let mut members: Vec<faculty::Model> = Vec::with_capacity(FACULTY.len());
    for (name, department, designation, phone, email) in FACULTY {
        members.push(
            FacultyService::create(
                db,
                NewFaculty {
                    name: name.to_string(),
                    department: department.to_string(),
                    designation: designation.to_string(),
                    phone: phone.to_string(),
                    email: email.to_string(),
                },
            )
            .await?,
        );
    }
    log::info!("Created {} faculty members", members.len());

    let mut courses: Vec<course::Model> = Vec::with_capacity(COURSES.len());
    for (course_name, department, credit) in COURSES {
        courses.push(
            CourseService::create(
                db,
                NewCourse {
                    course_name: course_name.to_string(),
                    department: department.to_string(),
                    credit,
                },
            )
            .await?,
        );
    }
    log::info!("Created {} courses", courses.len());

    for (student_idx, course_idx, grade) in ENROLLMENTS {
        EnrollmentService::create(
            db,
            NewEnrollment {
                student_id: students[student_idx].student_id,
                course_id: courses[course_idx].course_id,
                grade: grade.map(str::to_string),
            },
        )
        .await?;
    }
    log::info!("Created {} enrollments", ENROLLMENTS.len());

    for (faculty_idx, course_idx, semester) in TEACHINGS {
        TeachingService::create(
            db,
            NewTeaching {
                faculty_id: members[faculty_idx].faculty_id,
                course_id: courses[course_idx].course_id,
                semester: semester.to_string(),
            },
        )
        .await?;
    }
    log::info!("Created {} teaching assignments", TEACHINGS.len());

    Ok(SeedSummary {
        students: students.len(),
        faculty: members.len(),
        courses: courses.len(),
        enrollments: ENROLLMENTS.len(),
        teachings: TEACHINGS.len(),
    })
}

#[cfg(test)]
mod test {
    use super::{SeedSummary, seed};
    use crate::error::StoreError;
    use crate::services::{
        enrollment::EnrollmentService, student::StudentService, test_support::setup,
    };

    #[tokio::test]
    async fn test_seed_populates_every_table() {
        let db = setup().await;

        let summary = seed(&db).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                students: 5,
                faculty: 3,
                courses: 5,
                enrollments: 7,
                teachings: 5,
            }
        );

        let ungraded: Vec<_> = EnrollmentService::list(&db)
            .await
            .unwrap()
            .into_iter()
            .filter(|(e, _, _)| e.grade.is_none())
            .collect();
        assert_eq!(ungraded.len(), 1);
        assert_eq!(ungraded[0].1.name, "Sneha Reddy");
    }

    #[tokio::test]
    async fn test_seeding_twice_hits_unique_emails() {
        let db = setup().await;
        seed(&db).await.unwrap();

        let err = seed(&db).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(StudentService::list(&db).await.unwrap().len(), 5);
    }
}
