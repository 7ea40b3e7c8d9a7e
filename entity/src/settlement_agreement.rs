use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settlement_agreement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub dormitory_id: i32,
    pub room_id: Option<i32>,
    #[sea_orm(unique)]
    pub contract_number: String,
    pub start_date: Date,
    pub end_date: Date,
    pub passport_number: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_comment: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::dormitory::Entity",
        from = "Column::DormitoryId",
        to = "super::dormitory::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Dormitory,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Room,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::dormitory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dormitory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
