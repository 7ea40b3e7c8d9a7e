//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod agreement;
pub mod application;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod group;
pub mod refresh_token;
pub mod reservation;
pub mod room;
pub mod schedule;
pub mod user;

#[cfg(test)]
mod test;
