use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: None,
        role: Role::Student,
        faculty_id: None,
        group_id: None,
    }
}

/// Tests that emails are stored lowercased and trimmed.
///
/// Verifies that lookups by email ignore case so the same address cannot be registered
/// twice with different capitalisation.
///
/// Expected: Ok with lowercase email, found by a mixed-case lookup
#[tokio::test]
async fn normalizes_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(params("  Ada@Example.COM ")).await?;

    assert_eq!(user.email, "ada@example.com");
    assert!(repo.email_exists("ADA@example.com").await?);

    let found = repo.find_by_email("ada@EXAMPLE.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests role existence checks.
///
/// Expected: Ok(false) before a superadmin exists, Ok(true) after
#[tokio::test]
async fn reports_role_existence() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    assert!(!repo.role_exists(Role::Superadmin).await?);

    factory::create_user_with_role(db, "superadmin").await?;

    assert!(repo.role_exists(Role::Superadmin).await?);

    Ok(())
}

/// Tests counting users per role.
///
/// Verifies that every role is reported, including roles without accounts.
///
/// Expected: Ok with one entry per role and correct counts
#[tokio::test]
async fn counts_every_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::create_user_with_role(db, "admin").await?;

    let counts = UserRepository::new(db).count_by_role().await?;

    assert_eq!(counts.len(), Role::ALL.len());
    assert!(counts.contains(&("student".to_string(), 2)));
    assert!(counts.contains(&("admin".to_string(), 1)));
    assert!(counts.contains(&("dorm_manager".to_string(), 0)));

    Ok(())
}
