use super::*;

/// Tests resolving the dormitories a manager is responsible for.
///
/// Expected: Ok with both managed dormitories and none for another manager
#[tokio::test]
async fn managed_ids_lists_managed_dormitories() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, first) = factory::helpers::create_managed_dormitory(db).await?;
    let second = DormitoryFactory::new(db)
        .manager_id(manager.id)
        .build()
        .await?;
    let other = factory::create_user_with_role(db, "dorm_manager").await?;
    factory::create_dormitory(db).await?;

    let repo = DormitoryRepository::new(db);
    let mut ids = repo.managed_ids(manager.id).await?;
    ids.sort();

    assert_eq!(ids, vec![first.id, second.id]);
    assert!(repo.managed_ids(other.id).await?.is_empty());

    Ok(())
}

/// Tests the per-dormitory management check.
///
/// Expected: Ok(true) only for the assigned manager
#[tokio::test]
async fn is_managed_by_checks_assignment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let other = factory::create_user_with_role(db, "dorm_manager").await?;

    let repo = DormitoryRepository::new(db);

    assert!(repo.is_managed_by(dormitory.id, manager.id).await?);
    assert!(!repo.is_managed_by(dormitory.id, other.id).await?);

    Ok(())
}

/// Tests that reassigning the manager moves management.
///
/// Expected: Ok(Some) with the new manager, who now manages the dormitory
#[tokio::test]
async fn update_reassigns_manager() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let successor = factory::create_user_with_role(db, "dorm_manager").await?;

    let repo = DormitoryRepository::new(db);
    let updated = repo
        .update(
            dormitory.id,
            DormitoryParams {
                name: dormitory.name.clone(),
                address: dormitory.address.clone(),
                manager_id: Some(successor.id),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.manager_id, Some(successor.id));
    assert!(repo.is_managed_by(dormitory.id, successor.id).await?);
    assert!(!repo.is_managed_by(dormitory.id, manager.id).await?);

    Ok(())
}
