use super::*;

async fn occupied(db: &sea_orm::DatabaseConnection, room_id: i32) -> i16 {
    entity::prelude::Room::find_by_id(room_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .occupied
}

/// Tests that check-in occupies a place in the room.
///
/// Expected: Ok with status checked_in and occupied incremented
#[tokio::test]
async fn check_in_increments_occupancy() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let student = factory::create_user(db).await?;
    let reservation = ReservationFactory::new(db, student.id, room.id)
        .status("confirmed")
        .build()
        .await?;

    let updated = ReservationRepository::new(db)
        .update_status(
            reservation.id,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            None,
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::CheckedIn);
    assert_eq!(occupied(db, room.id).await, 1);

    Ok(())
}

/// Tests that check-out frees a place in the room.
///
/// Expected: Ok with status checked_out and occupied decremented
#[tokio::test]
async fn check_out_decrements_occupancy() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let room = RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(1)
        .build()
        .await?;
    let student = factory::create_user(db).await?;
    let reservation = ReservationFactory::new(db, student.id, room.id)
        .status("checked_in")
        .build()
        .await?;

    ReservationRepository::new(db)
        .update_status(
            reservation.id,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            None,
        )
        .await?;

    assert_eq!(occupied(db, room.id).await, 0);

    Ok(())
}

/// Tests check-in on a full room.
///
/// Verifies that the conflict rolls back the transaction, leaving both the reservation
/// status and the room occupancy unchanged.
///
/// Expected: Err(AppError::Conflict) with nothing modified
#[tokio::test]
async fn check_in_on_full_room_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let room = RoomFactory::new(db, dormitory.id)
        .capacity(1)
        .occupied(1)
        .build()
        .await?;
    let student = factory::create_user(db).await?;
    let reservation = ReservationFactory::new(db, student.id, room.id)
        .status("confirmed")
        .build()
        .await?;

    let repo = ReservationRepository::new(db);
    let result = repo
        .update_status(
            reservation.id,
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(occupied(db, room.id).await, 1);
    let stored = repo.find_by_id(reservation.id).await?.unwrap();
    assert_eq!(stored.status, ReservationStatus::Confirmed);

    Ok(())
}

/// Tests status changes that do not move anyone.
///
/// Expected: Ok with comment stored and occupancy untouched
#[tokio::test]
async fn confirm_keeps_occupancy() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let student = factory::create_user(db).await?;
    let reservation = ReservationFactory::new(db, student.id, room.id)
        .build()
        .await?;

    let updated = ReservationRepository::new(db)
        .update_status(
            reservation.id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            Some("See you in September".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Confirmed);
    assert_eq!(updated.comment.as_deref(), Some("See you in September"));
    assert_eq!(occupied(db, room.id).await, 0);

    Ok(())
}

/// Tests updating a reservation that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ReservationRepository::new(db)
        .update_status(
            999,
            ReservationStatus::Pending,
            ReservationStatus::Cancelled,
            None,
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests a second check-in of a reservation that is already checked in.
///
/// Verifies that the status write only applies to a row still in the expected status, so
/// a repeated or concurrent check-in cannot take a second place in the room.
///
/// Expected: Ok for the first check-in, Err(AppError::Conflict) for the second with
/// occupancy still at one
#[tokio::test]
async fn repeated_check_in_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let room = RoomFactory::new(db, dormitory.id)
        .capacity(3)
        .build()
        .await?;
    let student = factory::create_user(db).await?;
    let reservation = ReservationFactory::new(db, student.id, room.id)
        .status("confirmed")
        .build()
        .await?;

    let repo = ReservationRepository::new(db);
    for expected_ok in [true, false] {
        let result = repo
            .update_status(
                reservation.id,
                ReservationStatus::Confirmed,
                ReservationStatus::CheckedIn,
                None,
            )
            .await;

        if expected_ok {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(AppError::Conflict(_))));
        }
    }

    assert_eq!(occupied(db, room.id).await, 1);
    let stored = repo.find_by_id(reservation.id).await?.unwrap();
    assert_eq!(stored.status, ReservationStatus::CheckedIn);

    Ok(())
}

/// Tests releasing the places of a student's checked-in reservations.
///
/// Expected: Ok(1), with the checked-in room freed and the confirmed room untouched
#[tokio::test]
async fn release_checked_in_frees_places() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let lived_in = RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(2)
        .build()
        .await?;
    let booked = RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(1)
        .build()
        .await?;
    let student = factory::create_user(db).await?;
    ReservationFactory::new(db, student.id, lived_in.id)
        .status("checked_in")
        .build()
        .await?;
    ReservationFactory::new(db, student.id, booked.id)
        .status("confirmed")
        .build()
        .await?;

    let released = ReservationRepository::release_checked_in(db, student.id).await?;

    assert_eq!(released, 1);
    assert_eq!(occupied(db, lived_in.id).await, 1);
    assert_eq!(occupied(db, booked.id).await, 1);

    Ok(())
}
