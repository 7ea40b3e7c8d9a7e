use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260301_000003_create_user_table::User, m20260301_000006_create_room_table::Room};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomReservation::Table)
                    .if_not_exists()
                    .col(pk_auto(RoomReservation::Id))
                    .col(integer(RoomReservation::UserId))
                    .col(integer(RoomReservation::RoomId))
                    .col(date(RoomReservation::StartDate))
                    .col(date(RoomReservation::EndDate))
                    .col(string_len(RoomReservation::Status, 32).default("pending"))
                    .col(text_null(RoomReservation::Comment))
                    .col(
                        timestamp_with_time_zone(RoomReservation::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(RoomReservation::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_reservation_user_id")
                            .from(RoomReservation::Table, RoomReservation::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_reservation_room_id")
                            .from(RoomReservation::Table, RoomReservation::RoomId)
                            .to(Room::Table, Room::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomReservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RoomReservation {
    Table,
    Id,
    UserId,
    RoomId,
    StartDate,
    EndDate,
    Status,
    Comment,
    CreatedAt,
    UpdatedAt,
}
