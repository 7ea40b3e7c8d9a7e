use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use super::api::ParseEnumError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DormitoryDto {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub manager_id: Option<i32>,
    pub room_count: u64,
    pub total_capacity: i64,
    pub free_places: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DormitoryFormDto {
    pub name: String,
    pub address: String,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Maintenance,
    Closed,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(RoomStatus::Available),
            "maintenance" => Ok(RoomStatus::Maintenance),
            "closed" => Ok(RoomStatus::Closed),
            _ => Err(ParseEnumError {
                kind: "room status",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub dormitory_id: i32,
    pub number: String,
    pub floor: i16,
    pub capacity: i16,
    pub occupied: i16,
    pub free_places: i16,
    pub monthly_rent: i32,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomFormDto {
    pub number: String,
    pub floor: i16,
    pub capacity: i16,
    pub monthly_rent: i32,
    pub status: Option<RoomStatus>,
}
