use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use super::api::ParseEnumError;

/// Review state of an accommodation application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    ApprovedByFaculty,
    RejectedByFaculty,
    ApprovedByDorm,
    RejectedByDorm,
    Settled,
    Cancelled,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        ApplicationStatus::Pending,
        ApplicationStatus::ApprovedByFaculty,
        ApplicationStatus::RejectedByFaculty,
        ApplicationStatus::ApprovedByDorm,
        ApplicationStatus::RejectedByDorm,
        ApplicationStatus::Settled,
        ApplicationStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::ApprovedByFaculty => "approved_by_faculty",
            ApplicationStatus::RejectedByFaculty => "rejected_by_faculty",
            ApplicationStatus::ApprovedByDorm => "approved_by_dorm",
            ApplicationStatus::RejectedByDorm => "rejected_by_dorm",
            ApplicationStatus::Settled => "settled",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseEnumError {
                kind: "application status",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
    pub id: i32,
    pub user_id: i32,
    pub faculty_id: i32,
    pub dormitory_id: Option<i32>,
    pub course: i16,
    pub comment: Option<String>,
    pub status: ApplicationStatus,
    pub review_comment: Option<String>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateApplicationDto {
    /// Defaults to the applicant's own faculty.
    pub faculty_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    pub course: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusDto {
    pub status: ApplicationStatus,
    pub comment: Option<String>,
    /// Assigns a dormitory during the dormitory review stage when none was requested.
    pub dormitory_id: Option<i32>,
}
