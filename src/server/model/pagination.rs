//! Pagination request and result types shared by all listings.

use crate::model::api::PaginatedDto;

/// Default page size when the client does not pass `entries`.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Upper bound on page size regardless of what the client asks for.
pub const MAX_PER_PAGE: u64 = 100;

/// Zero-based page number and clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Builds a page request, clamping `entries` into `1..=MAX_PER_PAGE`.
    pub fn new(page: u64, entries: u64) -> Self {
        Self {
            page,
            per_page: entries.clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PER_PAGE)
    }
}

/// One page of domain models with totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            total_pages: total.div_ceil(request.per_page),
        }
    }

    /// Converts each item with `f`, keeping the pagination numbers.
    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> PaginatedDto<D> {
        PaginatedDto {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
