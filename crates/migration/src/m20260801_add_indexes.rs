use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on students for the default roster ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_students_last_name_first_name")
                    .table(Students::Table)
                    .col(Students::LastName)
                    .col(Students::FirstName)
                    .to_owned(),
            )
            .await?;

        // One row per student and subject pair
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id_subject_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Indexes on enrollments for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_subject_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::SubjectId)
                    .to_owned(),
            )
            .await?;

        // Indexes on grades for faster joins and the newest-first ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_grades_enrollment_id")
                    .table(Grades::Table)
                    .col(Grades::EnrollmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grades_grade_type")
                    .table(Grades::Table)
                    .col(Grades::GradeType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grades_date_recorded")
                    .table(Grades::Table)
                    .col(Grades::DateRecorded)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(Index::drop().name("idx_grades_date_recorded").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_grades_grade_type").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_grades_enrollment_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_subject_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_student_id").to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_student_id_subject_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_last_name_first_name")
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Students {
    Table,
    FirstName,
    LastName,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    SubjectId,
}

#[derive(Iden)]
enum Grades {
    Table,
    EnrollmentId,
    GradeType,
    DateRecorded,
}
