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
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Phone).string_len(15))
                    .col(ColumnDef::new(Students::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Students::Address).text())
                    .col(ColumnDef::new(Students::EnrollmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Students::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create subjects table
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Subjects::Description).text())
                    .col(ColumnDef::new(Subjects::Credits).integer().not_null())
                    .col(
                        ColumnDef::new(Subjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments table
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Enrollments::EnrollmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Enrollments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-subject_id")
                            .from(Enrollments::Table, Enrollments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create grades table
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Grades::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Grades::EnrollmentId).uuid().not_null())
                    .col(ColumnDef::new(Grades::GradeType).string_len(10).not_null())
                    .col(ColumnDef::new(Grades::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Grades::Score).decimal_len(5, 2).not_null())
                    .col(
                        ColumnDef::new(Grades::MaxScore)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(100),
                    )
                    .col(ColumnDef::new(Grades::DateRecorded).date_time().not_null())
                    .col(ColumnDef::new(Grades::DateUpdated).date_time().not_null())
                    .col(ColumnDef::new(Grades::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grades-enrollment_id")
                            .from(Grades::Table, Grades::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    StudentId,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    EnrollmentDate,
    IsActive,
}

#[derive(Iden)]
enum Subjects {
    Table,
    Id,
    Code,
    Name,
    Description,
    Credits,
    IsActive,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    SubjectId,
    EnrollmentDate,
    IsActive,
}

#[derive(Iden)]
enum Grades {
    Table,
    Id,
    EnrollmentId,
    GradeType,
    Title,
    Score,
    MaxScore,
    DateRecorded,
    DateUpdated,
    Notes,
}
