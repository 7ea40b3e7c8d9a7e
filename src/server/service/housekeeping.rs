//! Daily cleanup of stale records.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        agreement::AgreementRepository, refresh_token::RefreshTokenRepository,
        reservation::ReservationRepository,
    },
    error::AppError,
};

/// Counts of records touched by one housekeeping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HousekeepingReport {
    pub agreements_archived: u64,
    pub reservations_cancelled: u64,
    pub tokens_deleted: u64,
}

pub struct HousekeepingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HousekeepingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Archives ended agreements, cancels pending reservations whose stay already began
    /// and deletes dead refresh tokens.
    ///
    /// # Arguments
    /// - `now` - Reference instant; its date is "today"
    pub async fn run(&self, now: DateTime<Utc>) -> Result<HousekeepingReport, AppError> {
        let today = now.date_naive();

        let agreements_archived = AgreementRepository::new(self.db)
            .archive_expired(today)
            .await?;
        let reservations_cancelled = ReservationRepository::new(self.db)
            .cancel_stale_pending(today)
            .await?;
        let tokens_deleted = RefreshTokenRepository::new(self.db)
            .delete_stale(now)
            .await?;

        Ok(HousekeepingReport {
            agreements_archived,
            reservations_cancelled,
            tokens_deleted,
        })
    }
}
