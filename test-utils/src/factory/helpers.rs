//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including unique value generation and convenience methods for creating
//! entities with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a dormitory and a single room inside it.
///
/// # Returns
/// - `Ok((dormitory, room))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_room_with_dormitory(
    db: &DatabaseConnection,
) -> Result<(entity::dormitory::Model, entity::room::Model), DbErr> {
    let dormitory = crate::factory::dormitory::create_dormitory(db).await?;
    let room = crate::factory::room::create_room(db, dormitory.id).await?;

    Ok((dormitory, room))
}

/// Creates a faculty and a student enrolled in it.
///
/// # Returns
/// - `Ok((faculty, student))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_student_with_faculty(
    db: &DatabaseConnection,
) -> Result<(entity::faculty::Model, entity::user::Model), DbErr> {
    let faculty = crate::factory::faculty::create_faculty(db).await?;
    let student = crate::factory::user::UserFactory::new(db)
        .faculty_id(faculty.id)
        .build()
        .await?;

    Ok((faculty, student))
}

/// Creates a dormitory managed by a freshly created dorm manager.
///
/// # Returns
/// - `Ok((manager, dormitory))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_managed_dormitory(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::dormitory::Model), DbErr> {
    let manager = crate::factory::user::create_user_with_role(db, "dorm_manager").await?;
    let dormitory = crate::factory::dormitory::DormitoryFactory::new(db)
        .manager_id(manager.id)
        .build()
        .await?;

    Ok((manager, dormitory))
}
