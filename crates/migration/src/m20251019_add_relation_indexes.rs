use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Lookups by student/faculty are served by the leading column of the unique indexes;
        // course-side joins need their own
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teachings_course_id")
                    .table(Teachings::Table)
                    .col(Teachings::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_teachings_course_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_course_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Enrollments {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Teachings {
    Table,
    CourseId,
}
