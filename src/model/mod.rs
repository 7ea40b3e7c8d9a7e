//! API data transfer objects shared by every endpoint.
//!
//! These are the JSON shapes the browser client sends and receives. Server-side domain
//! models convert into them at the controller boundary.

pub mod agreement;
pub mod api;
pub mod application;
pub mod auth;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod reservation;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod user;
