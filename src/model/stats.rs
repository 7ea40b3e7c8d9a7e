use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatsDto {
    pub users_by_role: Vec<CountDto>,
    pub applications_by_status: Vec<CountDto>,
    pub rooms: u64,
    pub total_capacity: i64,
    pub occupied_places: i64,
}
