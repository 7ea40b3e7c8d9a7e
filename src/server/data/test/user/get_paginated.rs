use super::*;
use test_utils::factory::user::UserFactory;

/// Tests pagination ordered by last name.
///
/// Verifies that the repository returns the requested page and the total number of
/// matching users rather than the number on the page.
///
/// Expected: Ok with two users on the first page and a total of three
#[tokio::test]
async fn returns_page_ordered_by_last_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).last_name("Curie").build().await?;
    UserFactory::new(db).last_name("Babbage").build().await?;
    UserFactory::new(db).last_name("Alvarez").build().await?;

    let filter = UserFilter {
        page: PageRequest::new(0, 2),
        ..Default::default()
    };
    let (users, total) = UserRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 3);
    let names: Vec<_> = users.iter().map(|u| u.last_name.as_str()).collect();
    assert_eq!(names, vec!["Alvarez", "Babbage"]);

    Ok(())
}

/// Tests role and faculty filters.
///
/// Expected: Ok with only the student of the requested faculty
#[tokio::test]
async fn filters_by_role_and_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let faculty = factory::create_faculty(db).await?;
    let other = factory::create_faculty(db).await?;
    let student = UserFactory::new(db).faculty_id(faculty.id).build().await?;
    UserFactory::new(db).faculty_id(other.id).build().await?;
    UserFactory::new(db)
        .role("faculty_dean_office")
        .faculty_id(faculty.id)
        .build()
        .await?;

    let filter = UserFilter {
        role: Some(Role::Student),
        faculty_id: Some(faculty.id),
        ..Default::default()
    };
    let (users, total) = UserRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].id, student.id);

    Ok(())
}

/// Tests free-text search over email and names.
///
/// Expected: Ok with users whose email or name contains the text
#[tokio::test]
async fn searches_email_and_names() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    UserFactory::new(db).first_name("Grace").build().await?;
    UserFactory::new(db)
        .email("grace.hopper@example.com")
        .build()
        .await?;
    UserFactory::new(db).first_name("Alan").build().await?;

    let filter = UserFilter {
        search: Some("grace".to_string()),
        ..Default::default()
    };
    let (_, total) = UserRepository::new(db).get_paginated(&filter).await?;

    assert_eq!(total, 2);

    Ok(())
}
