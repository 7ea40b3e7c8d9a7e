use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dormitory_id: i32,
    pub number: String,
    pub floor: i16,
    pub capacity: i16,
    pub occupied: i16,
    pub monthly_rent: i32,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dormitory::Entity",
        from = "Column::DormitoryId",
        to = "super::dormitory::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Dormitory,
    #[sea_orm(has_many = "super::room_reservation::Entity")]
    RoomReservation,
}

impl Related<super::dormitory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dormitory.def()
    }
}

impl Related<super::room_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomReservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
