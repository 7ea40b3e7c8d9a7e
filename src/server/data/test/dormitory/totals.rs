use super::*;

/// Tests that a dormitory carries the totals of its rooms.
///
/// Expected: Ok(Some) with two rooms, capacity 5 and 3 occupied places
#[tokio::test]
async fn find_by_id_sums_rooms() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;

    RoomFactory::new(db, dormitory.id)
        .capacity(2)
        .occupied(2)
        .build()
        .await?;
    RoomFactory::new(db, dormitory.id)
        .capacity(3)
        .occupied(1)
        .build()
        .await?;

    let found = DormitoryRepository::new(db)
        .find_by_id(dormitory.id)
        .await?
        .unwrap();

    assert_eq!(found.room_count, 2);
    assert_eq!(found.total_capacity, 5);
    assert_eq!(found.occupied, 3);
    assert_eq!(found.free_places(), 2);

    Ok(())
}

/// Tests listing every dormitory ordered by name, including ones without rooms.
///
/// Expected: Ok with both dormitories, the empty one reporting zero totals
#[tokio::test]
async fn get_all_orders_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let north = DormitoryFactory::new(db).name("North Hall").build().await?;
    let east = DormitoryFactory::new(db).name("East Hall").build().await?;
    RoomFactory::new(db, north.id).capacity(4).build().await?;

    let dormitories = DormitoryRepository::new(db).get_all().await?;

    let names: Vec<_> = dormitories.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["East Hall", "North Hall"]);
    assert_eq!(dormitories[0].id, east.id);
    assert_eq!(dormitories[0].room_count, 0);
    assert_eq!(dormitories[1].total_capacity, 4);

    Ok(())
}

/// Tests the name uniqueness check used on create and update.
///
/// Expected: Ok(true) for a taken name, Ok(false) when the taken name is the excluded row
#[tokio::test]
async fn name_exists_ignores_excluded() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = DormitoryRepository::new(db);

    let created = repo
        .create(DormitoryParams {
            name: " West Hall ".to_string(),
            address: "1 Campus Street".to_string(),
            manager_id: None,
        })
        .await?;

    assert_eq!(created.name, "West Hall");
    assert!(repo.name_exists("West Hall", None).await?);
    assert!(!repo.name_exists("West Hall", Some(created.id)).await?);
    assert!(!repo.name_exists("South Hall", None).await?);

    Ok(())
}
