//! Command palette search hits.

use crate::model::search::{SearchHitDto, SearchHitKind};

pub const MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_LIMIT: u64 = 5;
pub const MAX_LIMIT: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub kind: SearchHitKind,
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
}

impl SearchHit {
    pub fn into_dto(self) -> SearchHitDto {
        SearchHitDto {
            kind: self.kind,
            id: self.id,
            title: self.title,
            subtitle: self.subtitle,
        }
    }
}
