//! SeaORM entity models for the dormitory schema.

pub mod prelude;

pub mod accommodation_application;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod refresh_token;
pub mod room;
pub mod room_reservation;
pub mod settlement_agreement;
pub mod settlement_schedule;
pub mod student_group;
pub mod user;
