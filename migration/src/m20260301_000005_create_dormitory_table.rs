use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dormitory::Table)
                    .if_not_exists()
                    .col(pk_auto(Dormitory::Id))
                    .col(string_uniq(Dormitory::Name))
                    .col(string(Dormitory::Address))
                    .col(integer_null(Dormitory::ManagerId))
                    .col(
                        timestamp_with_time_zone(Dormitory::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dormitory_manager_id")
                            .from(Dormitory::Table, Dormitory::ManagerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dormitory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Dormitory {
    Table,
    Id,
    Name,
    Address,
    ManagerId,
    CreatedAt,
}
