use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000003_create_user_table::User, m20260301_000005_create_dormitory_table::Dormitory,
    m20260301_000006_create_room_table::Room,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SettlementAgreement::Table)
                    .if_not_exists()
                    .col(pk_auto(SettlementAgreement::Id))
                    .col(integer(SettlementAgreement::UserId))
                    .col(integer(SettlementAgreement::DormitoryId))
                    .col(integer_null(SettlementAgreement::RoomId))
                    .col(string_uniq(SettlementAgreement::ContractNumber))
                    .col(date(SettlementAgreement::StartDate))
                    .col(date(SettlementAgreement::EndDate))
                    .col(string_len(SettlementAgreement::PassportNumber, 32))
                    .col(string_len(SettlementAgreement::Status, 32).default("pending_review"))
                    .col(text_null(SettlementAgreement::ReviewComment))
                    .col(
                        timestamp_with_time_zone(SettlementAgreement::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(SettlementAgreement::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_agreement_user_id")
                            .from(SettlementAgreement::Table, SettlementAgreement::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_agreement_dormitory_id")
                            .from(SettlementAgreement::Table, SettlementAgreement::DormitoryId)
                            .to(Dormitory::Table, Dormitory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_agreement_room_id")
                            .from(SettlementAgreement::Table, SettlementAgreement::RoomId)
                            .to(Room::Table, Room::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SettlementAgreement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SettlementAgreement {
    Table,
    Id,
    UserId,
    DormitoryId,
    RoomId,
    ContractNumber,
    StartDate,
    EndDate,
    PassportNumber,
    Status,
    ReviewComment,
    CreatedAt,
    UpdatedAt,
}
