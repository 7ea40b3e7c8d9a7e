//! HTTP request handlers.
//!
//! Controllers extract the bearer token and request data, check access through
//! `AuthGuard`, validate request bodies, convert DTOs to domain parameters and hand off to
//! the service layer. Responses are DTOs serialized as JSON.

use serde::Deserialize;

use crate::server::model::pagination::{PageRequest, DEFAULT_PER_PAGE};

pub mod admin;
pub mod agreement;
pub mod application;
pub mod auth;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod reservation;
pub mod schedule;
pub mod search;
pub mod user;

/// `page` and `entries` query parameters shared by paginated endpoints.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.entries)
    }
}

pub fn default_entries() -> u64 {
    DEFAULT_PER_PAGE
}
