use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_faculty_table::Faculty;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentGroup::Id))
                    .col(integer(StudentGroup::FacultyId))
                    .col(string(StudentGroup::Name))
                    .col(small_integer(StudentGroup::Course))
                    .col(
                        timestamp_with_time_zone(StudentGroup::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_group_faculty_id")
                            .from(StudentGroup::Table, StudentGroup::FacultyId)
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StudentGroup {
    Table,
    Id,
    FacultyId,
    Name,
    Course,
    CreatedAt,
}
