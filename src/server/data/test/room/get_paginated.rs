use super::*;

/// Tests the `available_only` filter.
///
/// Verifies that full rooms and rooms not in `available` status are excluded.
///
/// Expected: Ok with only the room that has a free place
#[tokio::test]
async fn available_only_excludes_full_and_closed_rooms() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;

    let free = RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(1)
        .build()
        .await?;
    RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(2)
        .build()
        .await?;
    RoomFactory::new(db, dormitory.id)
        .status("maintenance")
        .build()
        .await?;

    let filter = RoomFilter {
        available_only: true,
        ..Default::default()
    };
    let (rooms, total) = RoomRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 1);
    assert_eq!(rooms[0].id, free.id);

    Ok(())
}

/// Tests dormitory and floor filters with pagination.
///
/// Expected: Ok with the second floor rooms of one dormitory, one per page
#[tokio::test]
async fn filters_by_dormitory_and_floor() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let other = factory::create_dormitory(db).await?;

    RoomFactory::new(db, dormitory.id).floor(2).number("201").build().await?;
    RoomFactory::new(db, dormitory.id).floor(2).number("202").build().await?;
    RoomFactory::new(db, dormitory.id).floor(1).build().await?;
    RoomFactory::new(db, other.id).floor(2).build().await?;

    let filter = RoomFilter {
        dormitory_id: Some(dormitory.id),
        floor: Some(2),
        available_only: false,
        page: PageRequest::new(1, 1),
    };
    let (rooms, total) = RoomRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 2);
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].number, "202");

    Ok(())
}

/// Tests room number uniqueness within a dormitory.
///
/// Expected: Ok(true) in the same dormitory, Ok(false) elsewhere or for the room itself
#[tokio::test]
async fn detects_duplicate_numbers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let other = factory::create_dormitory(db).await?;
    let room = RoomFactory::new(db, dormitory.id).number("101").build().await?;

    let repo = RoomRepository::new(db);
    assert!(repo.number_exists(dormitory.id, "101", None).await?);
    assert!(!repo.number_exists(other.id, "101", None).await?);
    assert!(!repo.number_exists(dormitory.id, "101", Some(room.id)).await?);

    Ok(())
}
