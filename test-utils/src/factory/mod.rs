//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the ids of their parents explicitly, and
//! `helpers` offers shortcuts that create a whole chain of dependencies.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let faculty = factory::create_faculty(&db).await?;
//!     let student = factory::user::UserFactory::new(&db)
//!         .faculty_id(faculty.id)
//!         .build()
//!         .await?;
//!
//!     let (dormitory, room) = factory::helpers::create_room_with_dormitory(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `faculty` - Faculty entities
//! - `student_group` - Student group entities
//! - `user` - User entities of any role
//! - `dormitory` - Dormitory entities
//! - `room` - Room entities
//! - `application` - Accommodation application entities
//! - `reservation` - Room reservation entities
//! - `agreement` - Settlement agreement entities
//! - `schedule` - Settlement schedule entries
//! - `event` - Dormitory event entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod agreement;
pub mod application;
pub mod dormitory;
pub mod event;
pub mod faculty;
pub mod helpers;
pub mod reservation;
pub mod room;
pub mod schedule;
pub mod student_group;
pub mod user;

pub use dormitory::create_dormitory;
pub use faculty::create_faculty;
pub use room::create_room;
pub use student_group::create_group;
pub use user::{create_user, create_user_with_role};
