use crate::{
    entities::{course, faculty, teaching},
    error::StoreError,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

/// A faculty member with each teaching assignment and its course
pub type FacultyWithTeachings = (faculty::Model, Vec<(teaching::Model, course::Model)>);

#[derive(Debug, Clone)]
pub struct NewFaculty {
    pub name: String,
    pub department: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct FacultyChanges {
    pub name: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl FacultyChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.designation.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

pub struct FacultyService;

impl FacultyService {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<FacultyWithTeachings>, StoreError> {
        let members = faculty::Entity::find()
            .order_by_desc(faculty::Column::FacultyId)
            .all(db)
            .await?;

        Self::with_teachings(db, members).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        faculty_id: i32,
    ) -> Result<Option<FacultyWithTeachings>, StoreError> {
        let member = match faculty::Entity::find_by_id(faculty_id).one(db).await? {
            Some(member) => member,
            None => return Ok(None),
        };

        let mut results = Self::with_teachings(db, vec![member]).await?;
        Ok(results.pop())
    }

    pub async fn create(
        db: &DatabaseConnection,
        new_faculty: NewFaculty,
    ) -> Result<faculty::Model, StoreError> {
        let model = faculty::ActiveModel {
            faculty_id: NotSet,
            name: Set(new_faculty.name),
            department: Set(new_faculty.department),
            designation: Set(new_faculty.designation),
            phone: Set(new_faculty.phone),
            email: Set(new_faculty.email),
        }
        .insert(db)
        .await?;

        log::debug!("Created faculty member {}", model.faculty_id);
        Ok(model)
    }

    pub async fn update(
        db: &DatabaseConnection,
        faculty_id: i32,
        changes: FacultyChanges,
    ) -> Result<faculty::Model, StoreError> {
        let existing = faculty::Entity::find_by_id(faculty_id)
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
        if let Some(department) = changes.department {
            active.department = Set(department);
        }
        if let Some(designation) = changes.designation {
            active.designation = Set(designation);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }

        Ok(active.update(db).await?)
    }

    pub async fn delete(db: &DatabaseConnection, faculty_id: i32) -> Result<(), StoreError> {
        let result = faculty::Entity::delete_by_id(faculty_id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        log::debug!("Deleted faculty member {faculty_id}");
        Ok(())
    }

    async fn with_teachings(
        db: &DatabaseConnection,
        members: Vec<faculty::Model>,
    ) -> Result<Vec<FacultyWithTeachings>, StoreError> {
        if members.is_empty() {
            return Ok(vec![]);
        }

        let faculty_ids: Vec<i32> = members.iter().map(|f| f.faculty_id).collect();

        let teachings = teaching::Entity::find()
            .filter(teaching::Column::FacultyId.is_in(faculty_ids))
            .order_by_asc(teaching::Column::TeachingId)
            .find_also_related(course::Entity)
            .all(db)
            .await?;

        let mut teachings_by_faculty: HashMap<i32, Vec<(teaching::Model, course::Model)>> =
            HashMap::new();
        for (teaching, course) in teachings {
            if let Some(course) = course {
                teachings_by_faculty
                    .entry(teaching.faculty_id)
                    .or_default()
                    .push((teaching, course));
            }
        }

        Ok(members
            .into_iter()
            .map(|member| {
                let teachings = teachings_by_faculty
                    .remove(&member.faculty_id)
                    .unwrap_or_default();
                (member, teachings)
            })
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::{FacultyChanges, FacultyService};
    use crate::error::StoreError;
    use crate::services::teaching::{NewTeaching, TeachingService};
    use crate::services::test_support::{insert_course, insert_faculty, setup};

    #[tokio::test]
    async fn test_find_includes_teachings_with_course() {
        let db = setup().await;
        let member = insert_faculty(&db, "anita@university.edu").await;
        let course = insert_course(&db, "Database Management Systems").await;
        TeachingService::create(
            &db,
            NewTeaching {
                faculty_id: member.faculty_id,
                course_id: course.course_id,
                semester: "Fall 2024".to_string(),
            },
        )
        .await
        .unwrap();

        let (found, teachings) = FacultyService::find_by_id(&db, member.faculty_id)
            .await
            .unwrap()
            .expect("faculty should exist");

        assert_eq!(found, member);
        assert_eq!(teachings.len(), 1);
        assert_eq!(teachings[0].0.semester, "Fall 2024");
        assert_eq!(teachings[0].1, course);
    }

    #[tokio::test]
    async fn test_delete_with_teachings_is_blocked() {
        let db = setup().await;
        let member = insert_faculty(&db, "busy@university.edu").await;
        let course = insert_course(&db, "Computer Networks").await;
        TeachingService::create(
            &db,
            NewTeaching {
                faculty_id: member.faculty_id,
                course_id: course.course_id,
                semester: "Spring 2025".to_string(),
            },
        )
        .await
        .unwrap();

        let err = FacultyService::delete(&db, member.faculty_id)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(
            FacultyService::find_by_id(&db, member.faculty_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_email_to_existing_is_unique_violation() {
        let db = setup().await;
        insert_faculty(&db, "taken@university.edu").await;
        let other = insert_faculty(&db, "free@university.edu").await;

        let err = FacultyService::update(
            &db,
            other.faculty_id,
            FacultyChanges {
                email: Some("taken@university.edu".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_empty_changes_return_existing_row() {
        let db = setup().await;
        let member = insert_faculty(&db, "same@university.edu").await;

        let updated = FacultyService::update(&db, member.faculty_id, FacultyChanges::default())
            .await
            .unwrap();

        assert_eq!(updated, member);
    }
}
