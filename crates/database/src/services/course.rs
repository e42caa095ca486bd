use crate::{
    entities::{course, enrollment, faculty, student, teaching},
    error::StoreError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// A course with its bare enrollment and teaching rows (list view)
pub type CourseSummary = (course::Model, Vec<enrollment::Model>, Vec<teaching::Model>);

/// A course with enrolled students and assigned faculty (detail view)
pub type CourseDetail = (
    course::Model,
    Vec<(enrollment::Model, student::Model)>,
    Vec<(teaching::Model, faculty::Model)>,
);

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub course_name: String,
    pub department: String,
    pub credit: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub course_name: Option<String>,
    pub department: Option<String>,
    pub credit: Option<i32>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.course_name.is_none() && self.department.is_none() && self.credit.is_none()
    }
}

pub struct CourseService;

impl CourseService {
    /// All courses, newest first, each with its enrollment and teaching rows
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<CourseSummary>, StoreError> {
        let courses = course::Entity::find()
            .order_by_desc(course::Column::CourseId)
            .all(db)
            .await?;

        if courses.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<i32> = courses.iter().map(|c| c.course_id).collect();

        // Batch fetch both child tables for all courses
        let enrollments = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.is_in(course_ids.clone()))
            .order_by_asc(enrollment::Column::EnrollmentId)
            .all(db)
            .await?;
        let teachings = teaching::Entity::find()
            .filter(teaching::Column::CourseId.is_in(course_ids))
            .order_by_asc(teaching::Column::TeachingId)
            .all(db)
            .await?;

        let mut enrollments_by_course: HashMap<i32, Vec<enrollment::Model>> = HashMap::new();
        for enrollment in enrollments {
            enrollments_by_course
                .entry(enrollment.course_id)
                .or_default()
                .push(enrollment);
        }

        let mut teachings_by_course: HashMap<i32, Vec<teaching::Model>> = HashMap::new();
        for teaching in teachings {
            teachings_by_course
                .entry(teaching.course_id)
                .or_default()
                .push(teaching);
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let enrollments = enrollments_by_course
                    .remove(&course.course_id)
                    .unwrap_or_default();
                let teachings = teachings_by_course
                    .remove(&course.course_id)
                    .unwrap_or_default();
                (course, enrollments, teachings)
            })
            .collect())
    }

    /// A single course with its students and faculty
    pub async fn find_by_id(
        db: &DatabaseConnection,
        course_id: i32,
    ) -> Result<Option<CourseDetail>, StoreError> {
        let course = match course::Entity::find_by_id(course_id).one(db).await? {
            Some(course) => course,
            None => return Ok(None),
        };

        let enrollments = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(enrollment::Column::EnrollmentId)
            .find_also_related(student::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(enrollment, student)| student.map(|s| (enrollment, s)))
            .collect();

        let teachings = teaching::Entity::find()
            .filter(teaching::Column::CourseId.eq(course_id))
            .order_by_asc(teaching::Column::TeachingId)
            .find_also_related(faculty::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(teaching, member)| member.map(|f| (teaching, f)))
            .collect();

        Ok(Some((course, enrollments, teachings)))
    }

    pub async fn create(
        db: &DatabaseConnection,
        new_course: NewCourse,
    ) -> Result<course::Model, StoreError> {
        let model = course::ActiveModel {
            course_id: NotSet,
            course_name: Set(new_course.course_name),
            department: Set(new_course.department),
            credit: Set(new_course.credit),
        }
        .insert(db)
        .await?;

        log::debug!("Created course {}", model.course_id);
        Ok(model)
    }

    pub async fn update(
        db: &DatabaseConnection,
        course_id: i32,
        changes: CourseChanges,
    ) -> Result<course::Model, StoreError> {
        let existing = course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound)?;

        if changes.is_empty() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        if let Some(course_name) = changes.course_name {
            active.course_name = Set(course_name);
        }
        if let Some(department) = changes.department {
            active.department = Set(department);
        }
        if let Some(credit) = changes.credit {
            active.credit = Set(credit);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, course_id: i32) -> Result<(), StoreError> {
        let result = course::Entity::delete_by_id(course_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        log::debug!("Deleted course {course_id}");
        Ok(())
    }
}
