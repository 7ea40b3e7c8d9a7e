//! Back-office statistics.

use crate::model::stats::{CountDto, StatsDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// `(role, count)` pairs for every role, zero counts included.
    pub users_by_role: Vec<(String, u64)>,
    /// `(status, count)` pairs for every application status, zero counts included.
    pub applications_by_status: Vec<(String, u64)>,
    pub rooms: u64,
    pub total_capacity: i64,
    pub occupied_places: i64,
}

impl Stats {
    pub fn into_dto(self) -> StatsDto {
        let counts = |pairs: Vec<(String, u64)>| {
            pairs
                .into_iter()
                .map(|(key, count)| CountDto { key, count })
                .collect()
        };

        StatsDto {
            users_by_role: counts(self.users_by_role),
            applications_by_status: counts(self.applications_by_status),
            rooms: self.rooms,
            total_capacity: self.total_capacity,
            occupied_places: self.occupied_places,
        }
    }
}
