use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000005_create_dormitory_table::Dormitory;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Room::Table)
                    .if_not_exists()
                    .col(pk_auto(Room::Id))
                    .col(integer(Room::DormitoryId))
                    .col(string_len(Room::Number, 16))
                    .col(small_integer(Room::Floor))
                    .col(small_integer(Room::Capacity))
                    .col(small_integer(Room::Occupied).default(0))
                    .col(integer(Room::MonthlyRent).default(0))
                    .col(string_len(Room::Status, 32).default("available"))
                    .col(
                        timestamp_with_time_zone(Room::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_dormitory_id")
                            .from(Room::Table, Room::DormitoryId)
                            .to(Dormitory::Table, Dormitory::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_dormitory_number")
                    .table(Room::Table)
                    .col(Room::DormitoryId)
                    .col(Room::Number)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Room::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Room {
    Table,
    Id,
    DormitoryId,
    Number,
    Floor,
    Capacity,
    Occupied,
    MonthlyRent,
    Status,
    CreatedAt,
}
