use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_faculty_table::Faculty,
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
                    .table(SettlementSchedule::Table)
                    .if_not_exists()
                    .col(pk_auto(SettlementSchedule::Id))
                    .col(integer(SettlementSchedule::DormitoryId))
                    .col(integer_null(SettlementSchedule::FacultyId))
                    .col(small_integer_null(SettlementSchedule::Course))
                    .col(date(SettlementSchedule::Date))
                    .col(time(SettlementSchedule::StartTime))
                    .col(time(SettlementSchedule::EndTime))
                    .col(text_null(SettlementSchedule::Note))
                    .col(
                        timestamp_with_time_zone(SettlementSchedule::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_schedule_dormitory_id")
                            .from(SettlementSchedule::Table, SettlementSchedule::DormitoryId)
                            .to(Dormitory::Table, Dormitory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_schedule_faculty_id")
                            .from(SettlementSchedule::Table, SettlementSchedule::FacultyId)
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SettlementSchedule::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SettlementSchedule {
    Table,
    Id,
    DormitoryId,
    FacultyId,
    Course,
    Date,
    StartTime,
    EndTime,
    Note,
    CreatedAt,
}
