use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_faculty_table::Faculty, m20260301_000003_create_user_table::User,
    m20260301_000005_create_dormitory_table::Dormitory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccommodationApplication::Table)
                    .if_not_exists()
                    .col(pk_auto(AccommodationApplication::Id))
                    .col(integer(AccommodationApplication::UserId))
                    .col(integer(AccommodationApplication::FacultyId))
                    .col(integer_null(AccommodationApplication::DormitoryId))
                    .col(small_integer(AccommodationApplication::Course))
                    .col(text_null(AccommodationApplication::Comment))
                    .col(string_len(AccommodationApplication::Status, 32).default("pending"))
                    .col(text_null(AccommodationApplication::ReviewComment))
                    .col(integer_null(AccommodationApplication::ReviewedBy))
                    .col(
                        timestamp_with_time_zone(AccommodationApplication::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(AccommodationApplication::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_user_id")
                            .from(
                                AccommodationApplication::Table,
                                AccommodationApplication::UserId,
                            )
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_reviewed_by")
                            .from(
                                AccommodationApplication::Table,
                                AccommodationApplication::ReviewedBy,
                            )
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_faculty_id")
                            .from(
                                AccommodationApplication::Table,
                                AccommodationApplication::FacultyId,
                            )
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_dormitory_id")
                            .from(
                                AccommodationApplication::Table,
                                AccommodationApplication::DormitoryId,
                            )
                            .to(Dormitory::Table, Dormitory::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_application_status")
                    .table(AccommodationApplication::Table)
                    .col(AccommodationApplication::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(AccommodationApplication::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum AccommodationApplication {
    Table,
    Id,
    UserId,
    FacultyId,
    DormitoryId,
    Course,
    Comment,
    Status,
    ReviewComment,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
