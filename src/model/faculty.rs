use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacultyDto {
    pub id: i32,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyFormDto {
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub faculty_id: i32,
    pub name: String,
    pub course: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupFormDto {
    pub name: String,
    pub course: i16,
}
