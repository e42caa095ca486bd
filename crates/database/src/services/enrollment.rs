use crate::{
    entities::{course, enrollment, student},
    error::StoreError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// An enrollment joined with its student and course
pub type EnrollmentDetail = (enrollment::Model, student::Model, course::Model);

#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
}

/// `grade: Some(None)` clears the grade, `None` leaves it untouched
#[derive(Debug, Clone, Default)]
pub struct EnrollmentChanges {
    pub student_id: Option<i32>,
    pub course_id: Option<i32>,
    pub grade: Option<Option<String>>,
}

impl EnrollmentChanges {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.course_id.is_none() && self.grade.is_none()
    }
}

pub struct EnrollmentService;

impl EnrollmentService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<EnrollmentDetail>, StoreError> {
        let enrollments = enrollment::Entity::find()
            .order_by_desc(enrollment::Column::EnrollmentId)
            .all(db)
            .await?;

        Self::with_relations(db, enrollments).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        enrollment_id: i32,
    ) -> Result<Option<EnrollmentDetail>, StoreError> {
        let enrollment = match enrollment::Entity::find_by_id(enrollment_id).one(db).await? {
            Some(enrollment) => enrollment,
            None => return Ok(None),
        };

        let mut results = Self::with_relations(db, vec![enrollment]).await?;
        Ok(results.pop())
    }

    pub async fn create(
        db: &DatabaseConnection,
        new_enrollment: NewEnrollment,
    ) -> Result<EnrollmentDetail, StoreError> {
        let model = enrollment::ActiveModel {
            enrollment_id: NotSet,
            student_id: Set(new_enrollment.student_id),
            course_id: Set(new_enrollment.course_id),
            grade: Set(new_enrollment.grade),
        }
        .insert(db)
        .await?;

        log::debug!(
            "Enrolled student {} in course {}",
            model.student_id,
            model.course_id
        );
        Self::detail(db, model).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        enrollment_id: i32,
        changes: EnrollmentChanges,
    ) -> Result<EnrollmentDetail, StoreError> {
        let existing = enrollment::Entity::find_by_id(enrollment_id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound)?;

        if changes.is_empty() {
            return Self::detail(db, existing).await;
        }

        let mut active = existing.into_active_model();
        if let Some(student_id) = changes.student_id {
            active.student_id = Set(student_id);
        }
        if let Some(course_id) = changes.course_id {
            active.course_id = Set(course_id);
        }
        if let Some(grade) = changes.grade {
            active.grade = Set(grade);
        }

        let updated = active.update(db).await?;
        Self::detail(db, updated).await
    }

    pub async fn delete(db: &DatabaseConnection, enrollment_id: i32) -> Result<(), StoreError> {
        let result = enrollment::Entity::delete_by_id(enrollment_id)
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        log::debug!("Deleted enrollment {enrollment_id}");
        Ok(())
    }

    async fn detail(
        db: &DatabaseConnection,
        enrollment: enrollment::Model,
    ) -> Result<EnrollmentDetail, StoreError> {
        Self::with_relations(db, vec![enrollment])
            .await?
            .pop()
            .ok_or(StoreError::NotFound)
    }

    /// Batch fetch the students and courses referenced by `enrollments`
    async fn with_relations(
        db: &DatabaseConnection,
        enrollments: Vec<enrollment::Model>,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        if enrollments.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<i32> = enrollments.iter().map(|e| e.student_id).collect();
        let course_ids: Vec<i32> = enrollments.iter().map(|e| e.course_id).collect();

        let students: HashMap<i32, student::Model> = student::Entity::find()
            .filter(student::Column::StudentId.is_in(student_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.student_id, s))
            .collect();

        let courses: HashMap<i32, course::Model> = course::Entity::find()
            .filter(course::Column::CourseId.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.course_id, c))
            .collect();

        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.get(&enrollment.student_id)?.clone();
                let course = courses.get(&enrollment.course_id)?.clone();
                Some((enrollment, student, course))
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::{EnrollmentChanges, EnrollmentService, NewEnrollment};
    use crate::error::StoreError;
    use crate::services::test_support::{insert_course, insert_student, setup};

    #[tokio::test]
    async fn test_create_returns_joined_relations() {
        let db = setup().await;
        let student = insert_student(&db, "e1@university.edu").await;
        let course = insert_course(&db, "Operating Systems").await;

        let (enrollment, joined_student, joined_course) = EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id: student.student_id,
                course_id: course.course_id,
                grade: Some("A-".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(enrollment.grade.as_deref(), Some("A-"));
        assert_eq!(joined_student, student);
        assert_eq!(joined_course, course);
    }

    #[tokio::test]
    async fn test_duplicate_pair_is_unique_violation() {
        let db = setup().await;
        let student = insert_student(&db, "e2@university.edu").await;
        let course = insert_course(&db, "Operating Systems").await;
        let new_enrollment = NewEnrollment {
            student_id: student.student_id,
            course_id: course.course_id,
            grade: None,
        };

        EnrollmentService::create(&db, new_enrollment.clone())
            .await
            .unwrap();
        let err = EnrollmentService::create(&db, new_enrollment)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(EnrollmentService::list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_student_is_foreign_key_violation() {
        let db = setup().await;
        let course = insert_course(&db, "Operating Systems").await;

        let err = EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id: 404,
                course_id: course.course_id,
                grade: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(EnrollmentService::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_can_be_cleared_or_kept() {
        let db = setup().await;
        let student = insert_student(&db, "e3@university.edu").await;
        let course = insert_course(&db, "Operating Systems").await;
        let (created, _, _) = EnrollmentService::create(
            &db,
            NewEnrollment {
                student_id: student.student_id,
                course_id: course.course_id,
                grade: Some("B".to_string()),
            },
        )
        .await
        .unwrap();

        let (kept, _, _) =
            EnrollmentService::update(&db, created.enrollment_id, EnrollmentChanges::default())
                .await
                .unwrap();
        assert_eq!(kept.grade.as_deref(), Some("B"));

        let (cleared, _, _) = EnrollmentService::update(
            &db,
            created.enrollment_id,
            EnrollmentChanges {
                grade: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.grade, None);
    }
}
