use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Dob).date().not_null())
                    .col(ColumnDef::new(Students::Department).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().not_null())
                    .col(ColumnDef::new(Students::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create faculty table
        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Faculty::FacultyId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Faculty::Name).string().not_null())
                    .col(ColumnDef::new(Faculty::Department).string().not_null())
                    .col(ColumnDef::new(Faculty::Designation).string().not_null())
                    .col(ColumnDef::new(Faculty::Phone).string().not_null())
                    .col(
                        ColumnDef::new(Faculty::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::CourseName).string().not_null())
                    .col(ColumnDef::new(Courses::Department).string().not_null())
                    .col(ColumnDef::new(Courses::Credit).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create enrollments table; deleting a student or course with enrollments is refused
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::Grade).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teachings table
        manager
            .create_table(
                Table::create()
                    .table(Teachings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachings::TeachingId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachings::FacultyId).integer().not_null())
                    .col(ColumnDef::new(Teachings::CourseId).integer().not_null())
                    .col(ColumnDef::new(Teachings::Semester).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teachings-faculty_id")
                            .from(Teachings::Table, Teachings::FacultyId)
                            .to(Faculty::Table, Faculty::FacultyId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teachings-course_id")
                            .from(Teachings::Table, Teachings::CourseId)
                            .to(Courses::Table, Courses::CourseId)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // A student enrolls in a course at most once
        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_student_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A faculty member teaches a course at most once per semester
        manager
            .create_index(
                Index::create()
                    .name("uq_teachings_faculty_course_semester")
                    .table(Teachings::Table)
                    .col(Teachings::FacultyId)
                    .col(Teachings::CourseId)
                    .col(Teachings::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order (respecting foreign key constraints)
        manager
            .drop_table(Table::drop().table(Teachings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    StudentId,
    Name,
    Dob,
    Department,
    Gender,
    Phone,
    Email,
}

#[derive(DeriveIden)]
pub enum Faculty {
    Table,
    FacultyId,
    Name,
    Department,
    Designation,
    Phone,
    Email,
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    CourseId,
    CourseName,
    Department,
    Credit,
}

#[derive(DeriveIden)]
pub enum Enrollments {
    Table,
    EnrollmentId,
    StudentId,
    CourseId,
    Grade,
}

#[derive(DeriveIden)]
pub enum Teachings {
    Table,
    TeachingId,
    FacultyId,
    CourseId,
    Semester,
}
