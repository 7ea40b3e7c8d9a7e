//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Status transition tables, capacity rules and ownership checks
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Access Decisions**: Checks that depend on a loaded resource, such as which
//!   dormitory an application belongs to

pub mod agreement;
pub mod application;
pub mod auth;
pub mod bootstrap;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod housekeeping;
pub mod reservation;
pub mod room;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod user;

#[cfg(test)]
mod test;
