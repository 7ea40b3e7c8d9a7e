use super::*;

/// Tests room, capacity and occupancy totals.
///
/// Expected: Ok((3, 7, 3))
#[tokio::test]
async fn sums_capacity_and_occupancy() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dormitory = factory::create_dormitory(db).await?;

    RoomFactory::new(db, dormitory.id).capacity(2).occupied(2).build().await?;
    RoomFactory::new(db, dormitory.id).capacity(3).occupied(1).build().await?;
    RoomFactory::new(db, dormitory.id).capacity(2).build().await?;

    let totals = RoomRepository::new(db).totals().await?;

    assert_eq!(totals, (3, 7, 3));

    Ok(())
}

/// Tests totals on an empty database.
///
/// Expected: Ok((0, 0, 0))
#[tokio::test]
async fn empty_totals_are_zero() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert_eq!(RoomRepository::new(db).totals().await?, (0, 0, 0));

    Ok(())
}
