use super::*;
use crate::server::{
    model::{application::ApplicationFilter, pagination::PageRequest},
    service::application::{ApplicationService, ApplyParams, StatusChange},
};
use test_utils::factory::{application::ApplicationFactory, user::UserFactory};

fn apply_params(dormitory_id: Option<i32>) -> ApplyParams {
    ApplyParams {
        faculty_id: None,
        dormitory_id,
        course: 2,
        comment: None,
    }
}

fn change(status: ApplicationStatus) -> StatusChange {
    StatusChange {
        status,
        comment: None,
        dormitory_id: None,
    }
}

/// Tests that a student may hold only one open application.
///
/// Expected: Ok for the first application with the student's faculty, Err(Conflict) for
/// the second
#[tokio::test]
async fn apply_rejects_second_open_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let student = actor(student);
    let service = ApplicationService::new(db);

    let application = service.apply(&student, apply_params(None)).await?;
    assert_eq!(application.faculty_id, faculty.id);
    assert_eq!(application.status, ApplicationStatus::Pending);

    let second = service.apply(&student, apply_params(None)).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests applying without any faculty to apply through.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn apply_requires_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = actor(factory::create_user(db).await?);

    let result = ApplicationService::new(db)
        .apply(&student, apply_params(None))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the full review path from filing to settlement.
///
/// Verifies the dean office approves, the dormitory manager assigns their dormitory and
/// approves, then settles the student.
///
/// Expected: Ok at every step, ending in settled with the dormitory assigned
#[tokio::test]
async fn walks_full_review_path() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let dean = actor(
        UserFactory::new(db)
            .role("faculty_dean_office")
            .faculty_id(faculty.id)
            .build()
            .await?,
    );
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let manager = actor(manager);
    let service = ApplicationService::new(db);

    let application = service.apply(&actor(student), apply_params(None)).await?;

    let approved = service
        .change_status(&dean, application.id, change(ApplicationStatus::ApprovedByFaculty))
        .await?;
    assert_eq!(approved.reviewed_by, Some(dean.id));

    let placed = service
        .change_status(
            &manager,
            application.id,
            StatusChange {
                dormitory_id: Some(dormitory.id),
                comment: Some("Welcome".to_string()),
                ..change(ApplicationStatus::ApprovedByDorm)
            },
        )
        .await?;
    assert_eq!(placed.dormitory_id, Some(dormitory.id));

    let settled = service
        .change_status(&manager, application.id, change(ApplicationStatus::Settled))
        .await?;
    assert_eq!(settled.status, ApplicationStatus::Settled);
    assert_eq!(settled.reviewed_by, Some(manager.id));

    Ok(())
}

/// Tests transitions that are not in the table.
///
/// Expected: Err(BadRequest) when skipping faculty review, even for an admin
#[tokio::test]
async fn rejects_skipping_faculty_review() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let admin = actor(factory::create_user_with_role(db, "admin").await?);
    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;

    let result = ApplicationService::new(db)
        .change_status(&admin, application.id, change(ApplicationStatus::Settled))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that dean office staff of another faculty may not review.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn other_faculty_cannot_review() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let other = factory::create_faculty(db).await?;
    let dean = actor(
        UserFactory::new(db)
            .role("faculty_dean_office")
            .faculty_id(other.id)
            .build()
            .await?,
    );
    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;

    let result = ApplicationService::new(db)
        .change_status(
            &dean,
            application.id,
            change(ApplicationStatus::ApprovedByFaculty),
        )
        .await;

    assert!(is_denied(&result));

    Ok(())
}

/// Tests that only the applicant may cancel.
///
/// Expected: Err(AccessDenied) for another student, Ok for the applicant
#[tokio::test]
async fn applicant_cancels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let stranger = actor(factory::create_user(db).await?);
    let application = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;
    let service = ApplicationService::new(db);

    let denied = service
        .change_status(&stranger, application.id, change(ApplicationStatus::Cancelled))
        .await;
    assert!(is_denied(&denied));

    let cancelled = service
        .change_status(
            &actor(student),
            application.id,
            change(ApplicationStatus::Cancelled),
        )
        .await?;
    assert_eq!(cancelled.status, ApplicationStatus::Cancelled);

    Ok(())
}

/// Tests that a dean office listing is narrowed to its faculty.
///
/// Expected: Ok with only the faculty's application
#[tokio::test]
async fn dean_office_lists_own_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let (other_faculty, other_student) = factory::helpers::create_student_with_faculty(db).await?;
    let dean = actor(
        UserFactory::new(db)
            .role("faculty_dean_office")
            .faculty_id(faculty.id)
            .build()
            .await?,
    );
    let own = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;
    ApplicationFactory::new(db, other_student.id, other_faculty.id)
        .build()
        .await?;

    let page = ApplicationService::new(db)
        .list(
            &dean,
            ApplicationFilter {
                faculty_id: Some(other_faculty.id),
                page: PageRequest::default(),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, own.id);

    Ok(())
}

/// Tests that students may not list applications.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn student_cannot_list() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = actor(factory::create_user(db).await?);

    let result = ApplicationService::new(db)
        .list(&student, ApplicationFilter::default())
        .await;

    assert!(is_denied(&result));

    Ok(())
}
