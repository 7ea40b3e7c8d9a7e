use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use super::api::ParseEnumError;

/// Account role. Gates routes and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    Superadmin,
    FacultyDeanOffice,
    DormManager,
    StudentCouncilHead,
    StudentCouncilMember,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::Admin,
        Role::Superadmin,
        Role::FacultyDeanOffice,
        Role::DormManager,
        Role::StudentCouncilHead,
        Role::StudentCouncilMember,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
            Role::FacultyDeanOffice => "faculty_dean_office",
            Role::DormManager => "dorm_manager",
            Role::StudentCouncilHead => "student_council_head",
            Role::StudentCouncilMember => "student_council_member",
        }
    }

    /// Admins and superadmins.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| ParseEnumError {
                kind: "role",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}
