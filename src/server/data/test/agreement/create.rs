use super::*;

/// Tests that a new agreement receives its contract number.
///
/// Verifies the number combines the creation year with the zero-padded row id and that
/// the agreement starts out awaiting review.
///
/// Expected: Ok with contract number `SA-{year}-{id:06}` and status pending_review
#[tokio::test]
async fn assigns_contract_number() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let (dormitory, room) = factory::helpers::create_room_with_dormitory(db).await?;
    let today = Utc::now().date_naive();

    let agreement = AgreementRepository::new(db)
        .create(
            student.id,
            AgreementParams {
                dormitory_id: dormitory.id,
                room_id: Some(room.id),
                start_date: today,
                end_date: today + Duration::days(300),
                passport_number: " AB123456 ".to_string(),
            },
        )
        .await?;

    assert_eq!(
        agreement.contract_number,
        format!("SA-{}-{:06}", agreement.created_at.year(), agreement.id)
    );
    assert_eq!(agreement.status, AgreementStatus::PendingReview);
    assert_eq!(agreement.passport_number, "AB123456");

    Ok(())
}

/// Tests that two agreements never share a contract number.
///
/// Expected: Ok with distinct contract numbers
#[tokio::test]
async fn contract_numbers_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let today = Utc::now().date_naive();

    let repo = AgreementRepository::new(db);
    let params = AgreementParams {
        dormitory_id: dormitory.id,
        room_id: None,
        start_date: today,
        end_date: today + Duration::days(180),
        passport_number: "CD654321".to_string(),
    };
    let first = repo.create(student.id, params.clone()).await?;
    let second = repo.create(student.id, params).await?;

    assert_ne!(first.contract_number, second.contract_number);
    assert_eq!(repo.find_by_user(student.id).await?.len(), 2);

    Ok(())
}

/// Tests listing agreements by status within a set of dormitories.
///
/// Expected: Ok with only the approved agreement of the scoped dormitory
#[tokio::test]
async fn lists_by_status_and_dormitories() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let other = factory::create_dormitory(db).await?;

    let expected = AgreementFactory::new(db, student.id, dormitory.id)
        .status("approved")
        .build()
        .await?;
    AgreementFactory::new(db, student.id, dormitory.id)
        .build()
        .await?;
    AgreementFactory::new(db, student.id, other.id)
        .status("approved")
        .build()
        .await?;

    let filter = AgreementFilter {
        status: Some(AgreementStatus::Approved),
        dormitory_ids: Some(vec![dormitory.id]),
        page: PageRequest::default(),
        ..Default::default()
    };
    let (agreements, total) = AgreementRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 1);
    assert_eq!(agreements[0].id, expected.id);

    Ok(())
}
