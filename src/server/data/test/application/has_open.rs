use super::*;

/// Tests that a freshly filed application counts as open.
///
/// Expected: Ok(true) after creation, Ok(false) for a student without applications
#[tokio::test]
async fn created_application_is_open() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let other = factory::create_user(db).await?;

    let repo = ApplicationRepository::new(db);
    let application = repo
        .create(CreateApplicationParams {
            user_id: student.id,
            faculty_id: faculty.id,
            dormitory_id: None,
            course: 2,
            comment: None,
        })
        .await?;

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(repo.has_open(student.id).await?);
    assert!(!repo.has_open(other.id).await?);

    Ok(())
}

/// Tests that closed applications do not block a new one.
///
/// Expected: Ok(false) when every application is rejected, cancelled or settled
#[tokio::test]
async fn closed_applications_are_not_open() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;

    for status in ["rejected_by_faculty", "cancelled", "settled"] {
        ApplicationFactory::new(db, student.id, faculty.id)
            .status(status)
            .build()
            .await?;
    }

    assert!(!ApplicationRepository::new(db).has_open(student.id).await?);

    Ok(())
}

/// Tests that an application approved by the faculty is still open.
///
/// Expected: Ok(true)
#[tokio::test]
async fn faculty_approved_is_open() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;

    ApplicationFactory::new(db, student.id, faculty.id)
        .status("approved_by_faculty")
        .build()
        .await?;

    assert!(ApplicationRepository::new(db).has_open(student.id).await?);

    Ok(())
}
