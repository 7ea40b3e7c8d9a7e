use super::*;

/// Tests ordering by date, then start time.
///
/// Expected: Ok with the earlier day first and same-day slots by start time
#[tokio::test]
async fn orders_by_date_then_time() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let day = Utc::now().date_naive() + Duration::days(3);

    let afternoon = ScheduleFactory::new(db, dormitory.id)
        .date(day)
        .start_time(NaiveTime::from_hms_opt(14, 0, 0).unwrap())
        .build()
        .await?;
    let next_day = ScheduleFactory::new(db, dormitory.id)
        .date(day + Duration::days(1))
        .start_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
        .build()
        .await?;
    let morning = ScheduleFactory::new(db, dormitory.id)
        .date(day)
        .start_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        .build()
        .await?;

    let entries = ScheduleRepository::new(db)
        .list(&ScheduleFilter::default())
        .await?;

    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![morning.id, afternoon.id, next_day.id]);

    Ok(())
}

/// Tests that a faculty filter also returns slots open to every faculty.
///
/// Expected: Ok with the faculty's slot and the open slot, not another faculty's slot
#[tokio::test]
async fn faculty_filter_includes_open_slots() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let faculty = factory::create_faculty(db).await?;
    let other = factory::create_faculty(db).await?;
    let today = Utc::now().date_naive();

    let own = ScheduleFactory::new(db, dormitory.id)
        .faculty_id(faculty.id)
        .date(today + Duration::days(1))
        .build()
        .await?;
    let open = ScheduleFactory::new(db, dormitory.id)
        .date(today + Duration::days(2))
        .build()
        .await?;
    ScheduleFactory::new(db, dormitory.id)
        .faculty_id(other.id)
        .build()
        .await?;

    let filter = ScheduleFilter {
        faculty_id: Some(faculty.id),
        ..Default::default()
    };
    let entries = ScheduleRepository::new(db).list(&filter).await?;

    let ids: Vec<_> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![own.id, open.id]);

    Ok(())
}

/// Tests the dormitory and start date filters.
///
/// Expected: Ok with only the upcoming slot of the requested dormitory
#[tokio::test]
async fn filters_by_dormitory_and_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;
    let other = factory::create_dormitory(db).await?;
    let today = Utc::now().date_naive();

    ScheduleFactory::new(db, dormitory.id)
        .date(today - Duration::days(1))
        .build()
        .await?;
    let upcoming = ScheduleFactory::new(db, dormitory.id)
        .date(today)
        .build()
        .await?;
    ScheduleFactory::new(db, other.id).date(today).build().await?;

    let filter = ScheduleFilter {
        dormitory_id: Some(dormitory.id),
        from: Some(today),
        ..Default::default()
    };
    let entries = ScheduleRepository::new(db).list(&filter).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, upcoming.id);

    Ok(())
}
