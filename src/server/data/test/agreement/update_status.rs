use super::*;

/// Tests reviewing an agreement awaiting review.
///
/// Expected: Ok(Some) with the new status and review comment stored
#[tokio::test]
async fn approves_pending_agreement() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let agreement = AgreementFactory::new(db, student.id, dormitory.id)
        .build()
        .await?;

    let updated = AgreementRepository::new(db)
        .update_status(
            agreement.id,
            AgreementStatus::PendingReview,
            AgreementStatus::Approved,
            Some("Documents verified".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, AgreementStatus::Approved);
    assert_eq!(updated.review_comment.as_deref(), Some("Documents verified"));

    Ok(())
}

/// Tests a review based on a status the agreement no longer has.
///
/// Expected: Err(AppError::Conflict) with the stored status unchanged
#[tokio::test]
async fn stale_status_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let agreement = AgreementFactory::new(db, student.id, dormitory.id)
        .status("approved")
        .build()
        .await?;

    let repo = AgreementRepository::new(db);
    let result = repo
        .update_status(
            agreement.id,
            AgreementStatus::PendingReview,
            AgreementStatus::Rejected,
            None,
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let stored = repo.find_by_id(agreement.id).await?.unwrap();
    assert_eq!(stored.status, AgreementStatus::Approved);

    Ok(())
}

/// Tests updating an agreement that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_agreement_returns_none() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AgreementRepository::new(db)
        .update_status(
            999,
            AgreementStatus::PendingReview,
            AgreementStatus::Approved,
            None,
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
