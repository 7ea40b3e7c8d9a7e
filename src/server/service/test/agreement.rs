use super::*;
use crate::server::{model::agreement::AgreementParams, service::agreement::AgreementService};
use test_utils::factory::agreement::AgreementFactory;

fn params(dormitory_id: i32, room_id: Option<i32>) -> AgreementParams {
    let today = Utc::now().date_naive();
    AgreementParams {
        dormitory_id,
        room_id,
        start_date: today,
        end_date: today + Duration::days(300),
        passport_number: "AB123456".to_string(),
    }
}

/// Tests submitting an agreement for a room in another dormitory.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn create_rejects_room_outside_dormitory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = actor(factory::create_user(db).await?);
    let dormitory = factory::create_dormitory(db).await?;
    let (_, foreign_room) = factory::helpers::create_room_with_dormitory(db).await?;

    let result = AgreementService::new(db)
        .create(&student, params(dormitory.id, Some(foreign_room.id)))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests editing an agreement before and after review.
///
/// Expected: Ok while pending review, Err(Conflict) once approved
#[tokio::test]
async fn edits_only_while_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let manager = actor(manager);
    let student = actor(factory::create_user(db).await?);
    let service = AgreementService::new(db);

    let agreement = service.create(&student, params(dormitory.id, None)).await?;
    assert!(agreement.contract_number.starts_with("SA-"));

    let edited = service
        .update(
            &student,
            agreement.id,
            AgreementParams {
                passport_number: "XY987654".to_string(),
                ..params(dormitory.id, None)
            },
        )
        .await?;
    assert_eq!(edited.passport_number, "XY987654");
    assert_eq!(edited.contract_number, agreement.contract_number);

    service
        .change_status(&manager, agreement.id, AgreementStatus::Approved, None)
        .await?;

    let late = service
        .update(&student, agreement.id, params(dormitory.id, None))
        .await;
    assert!(matches!(late, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that another student may not edit an agreement.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn stranger_cannot_edit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let stranger = actor(factory::create_user(db).await?);
    let dormitory = factory::create_dormitory(db).await?;
    let agreement = AgreementFactory::new(db, owner.id, dormitory.id)
        .build()
        .await?;

    let result = AgreementService::new(db)
        .update(&stranger, agreement.id, params(dormitory.id, None))
        .await;

    assert!(is_denied(&result));

    Ok(())
}

/// Tests the review transitions.
///
/// Verifies a pending agreement cannot be archived directly and a manager of another
/// dormitory cannot approve it.
///
/// Expected: Err(BadRequest), Err(AccessDenied), then Ok with the review comment stored
#[tokio::test]
async fn review_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let (outsider, _) = factory::helpers::create_managed_dormitory(db).await?;
    let manager = actor(manager);
    let student = factory::create_user(db).await?;
    let agreement = AgreementFactory::new(db, student.id, dormitory.id)
        .build()
        .await?;
    let service = AgreementService::new(db);

    let skipped = service
        .change_status(&manager, agreement.id, AgreementStatus::Archived, None)
        .await;
    assert!(matches!(skipped, Err(AppError::BadRequest(_))));

    let foreign = service
        .change_status(&actor(outsider), agreement.id, AgreementStatus::Approved, None)
        .await;
    assert!(is_denied(&foreign));

    let rejected = service
        .change_status(
            &manager,
            agreement.id,
            AgreementStatus::Rejected,
            Some("Passport number is unreadable".to_string()),
        )
        .await?;
    assert_eq!(rejected.status, AgreementStatus::Rejected);
    assert_eq!(
        rejected.review_comment.as_deref(),
        Some("Passport number is unreadable")
    );

    Ok(())
}
