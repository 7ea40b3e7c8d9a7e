pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_faculty_table;
mod m20260301_000002_create_student_group_table;
mod m20260301_000003_create_user_table;
mod m20260301_000004_create_refresh_token_table;
mod m20260301_000005_create_dormitory_table;
mod m20260301_000006_create_room_table;
mod m20260301_000007_create_accommodation_application_table;
mod m20260301_000008_create_room_reservation_table;
mod m20260301_000009_create_settlement_agreement_table;
mod m20260301_000010_create_settlement_schedule_table;
mod m20260301_000011_create_event_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_faculty_table::Migration),
            Box::new(m20260301_000002_create_student_group_table::Migration),
            Box::new(m20260301_000003_create_user_table::Migration),
            Box::new(m20260301_000004_create_refresh_token_table::Migration),
            Box::new(m20260301_000005_create_dormitory_table::Migration),
            Box::new(m20260301_000006_create_room_table::Migration),
            Box::new(m20260301_000007_create_accommodation_application_table::Migration),
            Box::new(m20260301_000008_create_room_reservation_table::Migration),
            Box::new(m20260301_000009_create_settlement_agreement_table::Migration),
            Box::new(m20260301_000010_create_settlement_schedule_table::Migration),
            Box::new(m20260301_000011_create_event_table::Migration),
        ]
    }
}
