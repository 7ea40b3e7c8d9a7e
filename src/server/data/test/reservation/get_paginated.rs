use super::*;

/// Tests scoping reservations to a set of dormitories.
///
/// Expected: Ok with only reservations for rooms in the listed dormitories
#[tokio::test]
async fn scopes_to_dormitories() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (dormitory, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let (_, other_room) = factory::helpers::create_room_with_dormitory(db).await?;
    let student = factory::create_user(db).await?;

    let mine = ReservationFactory::new(db, student.id, room.id).build().await?;
    ReservationFactory::new(db, student.id, other_room.id)
        .build()
        .await?;

    let filter = ReservationFilter {
        dormitory_ids: Some(vec![dormitory.id]),
        ..Default::default()
    };
    let (reservations, total) = ReservationRepository::new(db)
        .get_paginated(&filter)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(reservations[0].id, mine.id);

    Ok(())
}

/// Tests that an empty dormitory scope matches nothing.
///
/// Expected: Ok with no reservations
#[tokio::test]
async fn empty_scope_matches_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let student = factory::create_user(db).await?;
    ReservationFactory::new(db, student.id, room.id).build().await?;

    let filter = ReservationFilter {
        dormitory_ids: Some(Vec::new()),
        ..Default::default()
    };
    let (reservations, total) = ReservationRepository::new(db)
        .get_paginated(&filter)
        .await?;

    assert_eq!(total, 0);
    assert!(reservations.is_empty());

    Ok(())
}

/// Tests the status filter.
///
/// Expected: Ok with only pending reservations
#[tokio::test]
async fn filters_by_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let student = factory::create_user(db).await?;
    ReservationFactory::new(db, student.id, room.id).build().await?;
    ReservationFactory::new(db, student.id, room.id)
        .status("rejected")
        .build()
        .await?;

    let filter = ReservationFilter {
        status: Some(ReservationStatus::Pending),
        ..Default::default()
    };
    let (_, total) = ReservationRepository::new(db)
        .get_paginated(&filter)
        .await?;

    assert_eq!(total, 1);

    Ok(())
}
