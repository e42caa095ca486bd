use crate::{
    entities::{course, faculty, teaching},
    error::StoreError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// A teaching assignment joined with its faculty member and course
pub type TeachingDetail = (teaching::Model, faculty::Model, course::Model);

#[derive(Debug, Clone)]
pub struct NewTeaching {
    pub faculty_id: i32,
    pub course_id: i32,
    pub semester: String,
}

#[derive(Debug, Clone, Default)]
pub struct TeachingChanges {
    pub faculty_id: Option<i32>,
    pub course_id: Option<i32>,
    pub semester: Option<String>,
}

impl TeachingChanges {
    pub fn is_empty(&self) -> bool {
        self.faculty_id.is_none() && self.course_id.is_none() && self.semester.is_none()
    }
}

pub struct TeachingService;

impl TeachingService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<TeachingDetail>, StoreError> {
        let teachings = teaching::Entity::find()
            .order_by_desc(teaching::Column::TeachingId)
            .all(db)
            .await?;

        Self::with_relations(db, teachings).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        teaching_id: i32,
    ) -> Result<Option<TeachingDetail>, StoreError> {
        let teaching = match teaching::Entity::find_by_id(teaching_id).one(db).await? {
            Some(teaching) => teaching,
            None => return Ok(None),
        };

        let mut results = Self::with_relations(db, vec![teaching]).await?;
        Ok(results.pop())
    }

    pub async fn create(
        db: &DatabaseConnection,
        new_teaching: NewTeaching,
    ) -> Result<TeachingDetail, StoreError> {
        let model = teaching::ActiveModel {
            teaching_id: NotSet,
            faculty_id: Set(new_teaching.faculty_id),
            course_id: Set(new_teaching.course_id),
            semester: Set(new_teaching.semester),
        }
        .insert(db)
        .await?;

        log::debug!(
            "Assigned faculty {} to course {} for {}",
            model.faculty_id,
            model.course_id,
            model.semester
        );
        Self::detail(db, model).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        teaching_id: i32,
        changes: TeachingChanges,
    ) -> Result<TeachingDetail, StoreError> {
        let existing = teaching::Entity::find_by_id(teaching_id)
            .one(db)
            .await?
            .ok_or(StoreError::NotFound)?;

        if changes.is_empty() {
            return Self::detail(db, existing).await;
        }

        let mut active = existing.into_active_model();
        if let Some(faculty_id) = changes.faculty_id {
            active.faculty_id = Set(faculty_id);
        }
        if let Some(course_id) = changes.course_id {
            active.course_id = Set(course_id);
        }
        if let Some(semester) = changes.semester {
            active.semester = Set(semester);
        }

        let updated = active.update(db).await?;
        Self::detail(db, updated).await
    }

    pub async fn delete(db: &DatabaseConnection, teaching_id: i32) -> Result<(), StoreError> {
        let result = teaching::Entity::delete_by_id(teaching_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        log::debug!("Deleted teaching assignment {teaching_id}");
        Ok(())
    }

    async fn detail(
        db: &DatabaseConnection,
        teaching: teaching::Model,
    ) -> Result<TeachingDetail, StoreError> {
        Self::with_relations(db, vec![teaching])
            .await?
            .pop()
            .ok_or(StoreError::NotFound)
    }

    async fn with_relations(
        db: &DatabaseConnection,
        teachings: Vec<teaching::Model>,
    ) -> Result<Vec<TeachingDetail>, StoreError> {
        if teachings.is_empty() {
            return Ok(vec![]);
        }

        let faculty_ids: Vec<i32> = teachings.iter().map(|t| t.faculty_id).collect();
        let course_ids: Vec<i32> = teachings.iter().map(|t| t.course_id).collect();

        let members: HashMap<i32, faculty::Model> = faculty::Entity::find()
            .filter(faculty::Column::FacultyId.is_in(faculty_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|f| (f.faculty_id, f))
            .collect();

        let courses: HashMap<i32, course::Model> = course::Entity::find()
            .filter(course::Column::CourseId.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.course_id, c))
            .collect();

        Ok(teachings
            .into_iter()
            .filter_map(|teaching| {
                let member = members.get(&teaching.faculty_id)?.clone();
                let course = courses.get(&teaching.course_id)?.clone();
                Some((teaching, member, course))
            })
            .collect())
    }
}
