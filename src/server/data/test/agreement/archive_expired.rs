use super::*;

/// Tests archiving approved agreements whose term has ended.
///
/// Verifies that pending agreements past their end date and approved agreements still
/// running are left alone.
///
/// Expected: Ok(1) with only the ended approved agreement archived
#[tokio::test]
async fn archives_only_ended_approved() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = factory::create_user(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let today = Utc::now().date_naive();

    let ended = AgreementFactory::new(db, student.id, dormitory.id)
        .start_date(today - Duration::days(300))
        .end_date(today - Duration::days(1))
        .status("approved")
        .build()
        .await?;
    let ending_today = AgreementFactory::new(db, student.id, dormitory.id)
        .start_date(today - Duration::days(300))
        .end_date(today)
        .status("approved")
        .build()
        .await?;
    let stale_pending = AgreementFactory::new(db, student.id, dormitory.id)
        .start_date(today - Duration::days(300))
        .end_date(today - Duration::days(1))
        .build()
        .await?;

    let repo = AgreementRepository::new(db);
    assert_eq!(repo.archive_expired(today).await?, 1);

    let expected = [
        (ended.id, AgreementStatus::Archived),
        (ending_today.id, AgreementStatus::Approved),
        (stale_pending.id, AgreementStatus::PendingReview),
    ];
    for (id, status) in expected {
        assert_eq!(repo.find_by_id(id).await?.unwrap().status, status);
    }

    Ok(())
}
