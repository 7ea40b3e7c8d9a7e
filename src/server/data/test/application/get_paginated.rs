use super::*;

/// Tests scoping a listing to a manager's dormitories.
///
/// Verifies that without `include_unassigned` only applications for the listed
/// dormitories are returned, and with it faculty-approved applications lacking a
/// dormitory are added while pending ones without a dormitory stay hidden.
///
/// Expected: Ok with one application, then two
#[tokio::test]
async fn scopes_to_dormitories_and_unassigned() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let (_, managed) = factory::helpers::create_managed_dormitory(db).await?;
    let elsewhere = factory::create_dormitory(db).await?;

    let assigned = ApplicationFactory::new(db, student.id, faculty.id)
        .dormitory_id(managed.id)
        .status("approved_by_faculty")
        .build()
        .await?;
    ApplicationFactory::new(db, student.id, faculty.id)
        .dormitory_id(elsewhere.id)
        .status("approved_by_faculty")
        .build()
        .await?;
    let unassigned = ApplicationFactory::new(db, student.id, faculty.id)
        .status("approved_by_faculty")
        .build()
        .await?;
    ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;

    let repo = ApplicationRepository::new(db);
    let mut filter = ApplicationFilter {
        dormitory_ids: Some(vec![managed.id]),
        page: PageRequest::default(),
        ..Default::default()
    };

    let (applications, total) = repo.get_paginated(&filter).await?;
    assert_eq!(total, 1);
    assert_eq!(applications[0].id, assigned.id);

    filter.include_unassigned = true;
    let (applications, total) = repo.get_paginated(&filter).await?;
    assert_eq!(total, 2);
    let mut ids: Vec<_> = applications.iter().map(|a| a.id).collect();
    ids.sort();
    assert_eq!(ids, vec![assigned.id, unassigned.id]);

    Ok(())
}

/// Tests that an empty dormitory scope matches nothing.
///
/// Expected: Ok with no applications
#[tokio::test]
async fn empty_scope_matches_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let dormitory = factory::create_dormitory(db).await?;

    ApplicationFactory::new(db, student.id, faculty.id)
        .dormitory_id(dormitory.id)
        .build()
        .await?;

    let filter = ApplicationFilter {
        dormitory_ids: Some(Vec::new()),
        page: PageRequest::default(),
        ..Default::default()
    };
    let (applications, total) = ApplicationRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 0);
    assert!(applications.is_empty());

    Ok(())
}

/// Tests status and faculty filters.
///
/// Expected: Ok with only the pending application of the requested faculty
#[tokio::test]
async fn filters_by_status_and_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (faculty, student) = factory::helpers::create_student_with_faculty(db).await?;
    let (other_faculty, other_student) = factory::helpers::create_student_with_faculty(db).await?;

    let expected = ApplicationFactory::new(db, student.id, faculty.id)
        .build()
        .await?;
    ApplicationFactory::new(db, student.id, faculty.id)
        .status("cancelled")
        .build()
        .await?;
    ApplicationFactory::new(db, other_student.id, other_faculty.id)
        .build()
        .await?;

    let filter = ApplicationFilter {
        status: Some(ApplicationStatus::Pending),
        faculty_id: Some(faculty.id),
        page: PageRequest::default(),
        ..Default::default()
    };
    let (applications, total) = ApplicationRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 1);
    assert_eq!(applications[0].id, expected.id);

    Ok(())
}
