//! Back-office statistics.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{application::ApplicationRepository, room::RoomRepository, user::UserRepository},
    error::AppError,
    model::stats::Stats,
};

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self) -> Result<Stats, AppError> {
        let users_by_role = UserRepository::new(self.db).count_by_role().await?;
        let applications_by_status = ApplicationRepository::new(self.db)
            .count_by_status()
            .await?;
        let (rooms, total_capacity, occupied_places) = RoomRepository::new(self.db).totals().await?;

        Ok(Stats {
            users_by_role,
            applications_by_status,
            rooms,
            total_capacity,
            occupied_places,
        })
    }
}
