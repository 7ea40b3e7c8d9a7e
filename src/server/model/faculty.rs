//! Faculty and student group domain models.

use crate::model::faculty::{FacultyDto, GroupDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Faculty {
    pub id: i32,
    pub name: String,
    pub short_name: String,
}

impl Faculty {
    pub fn from_entity(entity: entity::faculty::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            short_name: entity.short_name,
        }
    }

    pub fn into_dto(self) -> FacultyDto {
        FacultyDto {
            id: self.id,
            name: self.name,
            short_name: self.short_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacultyParams {
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroup {
    pub id: i32,
    pub faculty_id: i32,
    pub name: String,
    pub course: i16,
}

impl StudentGroup {
    pub fn from_entity(entity: entity::student_group::Model) -> Self {
        Self {
            id: entity.id,
            faculty_id: entity.faculty_id,
            name: entity.name,
            course: entity.course,
        }
    }

    pub fn into_dto(self) -> GroupDto {
        GroupDto {
            id: self.id,
            faculty_id: self.faculty_id,
            name: self.name,
            course: self.course,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroupParams {
    pub name: String,
    pub course: i16,
}
