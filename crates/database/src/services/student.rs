use crate::{
    entities::{course, enrollment, student},
    error::StoreError,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// A student together with each of their enrollments and the enrolled course
pub type StudentWithEnrollments = (student::Model, Vec<(enrollment::Model, course::Model)>);

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub dob: NaiveDate,
    pub department: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
}

/// Fields to overwrite on an existing student; `None` leaves the column as is
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub department: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dob.is_none()
            && self.department.is_none()
            && self.gender.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

pub struct StudentService;

impl StudentService {
    /// All students, newest first, with their enrollments
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<StudentWithEnrollments>, StoreError> {
        let students = student::Entity::find()
            .order_by_desc(student::Column::StudentId)
            .all(db)
            .await?;

        Self::with_enrollments(db, students).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<StudentWithEnrollments>, StoreError> {
        let student = match student::Entity::find_by_id(student_id).one(db).await? {
            Some(student) => student,
            None => return Ok(None),
        };

        let mut results = Self::with_enrollments(db, vec![student]).await?;
        Ok(results.pop())
    }

    pub async fn create(
        db: &DatabaseConnection,
        new_student: NewStudent,
    ) -> Result<student::Model, StoreError> {
        let model = student::ActiveModel {
            student_id: NotSet,
            name: Set(new_student.name),
            dob: Set(new_student.dob),
            department: Set(new_student.department),
            gender: Set(new_student.gender),
            phone: Set(new_student.phone),
            email: Set(new_student.email),
        }
        .insert(db)
        .await?;

        log::debug!("Created student {}", model.student_id);
        Ok(model)
    }

    pub async fn update(
        db: &DatabaseConnection,
        student_id: i32,
        changes: StudentChanges,
    ) -> Result<student::Model, StoreError> {
        let existing = student::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound)?;

        if changes.is_empty() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(dob) = changes.dob {
            active.dob = Set(dob);
        }
        if let Some(department) = changes.department {
            active.department = Set(department);
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(gender);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, student_id: i32) -> Result<(), StoreError> {
        let result = student::Entity::delete_by_id(student_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        log::debug!("Deleted student {student_id}");
        Ok(())
    }

    /// Batch fetch enrollments (with courses) for the given students, preserving their order
    async fn with_enrollments(
        db: &DatabaseConnection,
        students: Vec<student::Model>,
    ) -> Result<Vec<StudentWithEnrollments>, StoreError> {
        if students.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<i32> = students.iter().map(|s| s.student_id).collect();

        let enrollments = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.is_in(student_ids))
            .order_by_asc(enrollment::Column::EnrollmentId)
            .find_also_related(course::Entity)
            .all(db)
            .await?;

        let mut enrollments_by_student: HashMap<i32, Vec<(enrollment::Model, course::Model)>> =
            HashMap::new();
        for (enrollment, course) in enrollments {
            if let Some(course) = course {
                enrollments_by_student
                    .entry(enrollment.student_id)
                    .or_default()
                    .push((enrollment, course));
            }
        }

        Ok(students
            .into_iter()
            .map(|student| {
                let enrollments = enrollments_by_student
                    .remove(&student.student_id)
                    .unwrap_or_default();
                (student, enrollments)
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::{StudentChanges, StudentService};
    use crate::error::StoreError;
    use crate::services::enrollment::{EnrollmentService, NewEnrollment};
    use crate::services::test_support::{insert_course, insert_student, setup};

    #[tokio::test]
    async fn test_create_then_find_round_trips() {
        let db = setup().await;
        let created = insert_student(&db, "rahul@university.edu").await;

        let (found, enrollments) = StudentService::find_by_id(&db, created.student_id)
            .await
            .unwrap()
            .expect("student should exist");

        assert_eq!(found, created);
        assert!(enrollments.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = setup().await;
        insert_student(&db, "dup@university.edu").await;

        let second = super::NewStudent {
            name: "Priya Patel".to_string(),
            dob: chrono::NaiveDate::from_ymd_opt(2003, 8, 22).unwrap(),
            department: "Computer Science".to_string(),
            gender: "Female".to_string(),
            phone: "9876543211".to_string(),
            email: "dup@university.edu".to_string(),
        };
        let err = StudentService::create(&db, second).await.unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(StudentService::list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_with_enrollments() {
        let db = setup().await;
        let first = insert_student(&db, "a@university.edu").await;
        let second = insert_student(&db, "b@university.edu").await;
        let course = insert_course(&db, "Operating Systems").await;
        EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id: first.student_id,
                course_id: course.course_id,
                grade: Some("A".to_string()),
            },
        )
        .await
        .unwrap();

        let students = StudentService::list(&db).await.unwrap();

        let ids: Vec<i32> = students.iter().map(|(s, _)| s.student_id).collect();
        assert_eq!(ids, vec![second.student_id, first.student_id]);
        assert!(students[0].1.is_empty());
        assert_eq!(students[1].1.len(), 1);
        assert_eq!(students[1].1[0].1.course_name, "Operating Systems");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = setup().await;
        let created = insert_student(&db, "c@university.edu").await;

        let updated = StudentService::update(
            &db,
            created.student_id,
            StudentChanges {
                department: Some("Mechanical".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.department, "Mechanical");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.dob, created.dob);
        assert_eq!(updated.email, created.email);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_row_is_not_found() {
        let db = setup().await;

        let update = StudentService::update(&db, 42, StudentChanges::default()).await;
        assert!(matches!(update, Err(StoreError::NotFound)));

        let delete = StudentService::delete(&db, 42).await;
        assert!(matches!(delete, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_with_enrollments_is_blocked() {
        let db = setup().await;
        let student = insert_student(&db, "d@university.edu").await;
        let course = insert_course(&db, "Web Development").await;
        EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id: student.student_id,
                course_id: course.course_id,
                grade: None,
            },
        )
        .await
        .unwrap();

        let err = StudentService::delete(&db, student.student_id)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(
            StudentService::find_by_id(&db, student.student_id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
