use super::*;

/// Tests persisting a dormitory review that assigns a dormitory.
///
/// Expected: Ok(Some) with the new status, reviewer, comment and dormitory stored
#[tokio::test]
async fn stores_review_and_assigned_dormitory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;

    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .status("approved_by_faculty")
        .build()
        .await?;

    let repo = ApplicationRepository::new(db);
    let reviewed = repo
        .apply_review(ApplicationReview {
            id: application.id,
            from: ApplicationStatus::ApprovedByFaculty,
            status: ApplicationStatus::ApprovedByDorm,
            review_comment: Some("Room on the second floor".to_string()),
            reviewed_by: manager.id,
            dormitory_id: Some(dormitory.id),
        })
        .await?
        .unwrap();

    assert_eq!(reviewed.status, ApplicationStatus::ApprovedByDorm);
    assert_eq!(reviewed.reviewed_by, Some(manager.id));
    assert_eq!(reviewed.dormitory_id, Some(dormitory.id));
    assert_eq!(
        reviewed.review_comment.as_deref(),
        Some("Room on the second floor")
    );

    let stored = repo.find_by_id(application.id).await?.unwrap();
    assert_eq!(stored.status, ApplicationStatus::ApprovedByDorm);
    assert_eq!(stored.dormitory_id, Some(dormitory.id));

    Ok(())
}

/// Tests that a review without a dormitory keeps the requested one.
///
/// Expected: Ok(Some) with the original dormitory
#[tokio::test]
async fn keeps_requested_dormitory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let dormitory = factory::create_dormitory(db).await?;
    let dean = factory::create_user_with_role(db, "faculty_dean_office").await?;

    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .dormitory_id(dormitory.id)
        .build()
        .await?;

    let reviewed = ApplicationRepository::new(db)
        .apply_review(ApplicationReview {
            id: application.id,
            from: ApplicationStatus::Pending,
            status: ApplicationStatus::ApprovedByFaculty,
            review_comment: None,
            reviewed_by: dean.id,
            dormitory_id: None,
        })
        .await?
        .unwrap();

    assert_eq!(reviewed.dormitory_id, Some(dormitory.id));
    assert_eq!(reviewed.status, ApplicationStatus::ApprovedByFaculty);

    Ok(())
}

/// Tests reviewing an application that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn missing_application_returns_none() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::create_user_with_role(db, "admin").await?;

    let result = ApplicationRepository::new(db)
        .apply_review(ApplicationReview {
            id: 9999,
            from: ApplicationStatus::Pending,
            status: ApplicationStatus::ApprovedByFaculty,
            review_comment: None,
            reviewed_by: admin.id,
            dormitory_id: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests two reviewers acting on the same pending application.
///
/// Verifies that the second review, validated against the status both reviewers read,
/// is refused instead of overwriting the first decision.
///
/// Expected: Err(AppError::Conflict) with the first review kept
#[tokio::test]
async fn second_review_of_same_status_conflicts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let approver = factory::create_user_with_role(db, "faculty_dean_office").await?;
    let rejecter = factory::create_user_with_role(db, "faculty_dean_office").await?;

    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;

    let repo = ApplicationRepository::new(db);
    repo.apply_review(ApplicationReview {
        id: application.id,
        from: ApplicationStatus::Pending,
        status: ApplicationStatus::ApprovedByFaculty,
        review_comment: None,
        reviewed_by: approver.id,
        dormitory_id: None,
    })
    .await?;

    let result = repo
        .apply_review(ApplicationReview {
            id: application.id,
            from: ApplicationStatus::Pending,
            status: ApplicationStatus::RejectedByFaculty,
            review_comment: Some("Incomplete documents".to_string()),
            reviewed_by: rejecter.id,
            dormitory_id: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let stored = repo.find_by_id(application.id).await?.unwrap();
    assert_eq!(stored.status, ApplicationStatus::ApprovedByFaculty);
    assert_eq!(stored.reviewed_by, Some(approver.id));
    assert_eq!(stored.review_comment, None);

    Ok(())
}
