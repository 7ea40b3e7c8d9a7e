use super::*;

/// Tests cancelling pending reservations whose stay already began.
///
/// Expected: Ok(1) with only the stale pending reservation cancelled
#[tokio::test]
async fn cancels_only_stale_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let today = Utc::now().date_naive();

    let student = factory::create_user(db).await?;
    let stale = ReservationFactory::new(db, student.id, room.id)
        .start_date(today - Duration::days(2))
        .end_date(today + Duration::days(30))
        .build()
        .await?;
    let upcoming = ReservationFactory::new(db, student.id, room.id)
        .start_date(today + Duration::days(1))
        .build()
        .await?;
    let confirmed = ReservationFactory::new(db, student.id, room.id)
        .start_date(today - Duration::days(2))
        .end_date(today + Duration::days(30))
        .status("confirmed")
        .build()
        .await?;

    let repo = ReservationRepository::new(db);
    assert_eq!(repo.cancel_stale_pending(today).await?, 1);

    let expected = [
        (stale.id, ReservationStatus::Cancelled),
        (upcoming.id, ReservationStatus::Pending),
        (confirmed.id, ReservationStatus::Confirmed),
    ];
    for (id, status) in expected {
        assert_eq!(repo.find_by_id(id).await?.unwrap().status, status);
    }

    Ok(())
}
