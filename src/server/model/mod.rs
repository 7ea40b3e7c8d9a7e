//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.

pub mod agreement;
pub mod auth;
pub mod application;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod pagination;
pub mod reservation;
pub mod room;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod user;
