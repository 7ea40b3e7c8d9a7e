//! Command palette search across rooms, dormitories, faculties, groups and users.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        dormitory::DormitoryRepository, faculty::FacultyRepository, group::GroupRepository,
        room::RoomRepository, user::UserRepository,
    },
    error::AppError,
    model::{
        search::{SearchHit, DEFAULT_LIMIT, MAX_LIMIT, MIN_QUERY_LEN},
        user::User,
    },
};

pub struct SearchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SearchService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Searches every kind the caller may see, grouped by kind.
    ///
    /// # Arguments
    /// - `actor` - Caller; users are only searched for administrators
    /// - `query` - Free text, trimmed; shorter than two characters yields no hits
    /// - `limit` - Hits per kind, default 5, capped at 20
    pub async fn search(
        &self,
        actor: &User,
        query: &str,
        limit: Option<u64>,
    ) -> Result<Vec<SearchHit>, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let mut hits = RoomRepository::new(self.db).search(query, limit).await?;
        hits.extend(DormitoryRepository::new(self.db).search(query, limit).await?);
        hits.extend(FacultyRepository::new(self.db).search(query, limit).await?);
        hits.extend(GroupRepository::new(self.db).search(query, limit).await?);
        if actor.is_admin() {
            hits.extend(UserRepository::new(self.db).search(query, limit).await?);
        }

        Ok(hits)
    }
}
