use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "settlement_schedule")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dormitory_id: i32,
    pub faculty_id: Option<i32>,
    pub course: Option<i16>,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Faculty,
}

impl Related<super::dormitory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dormitory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
