use super::*;

/// Tests authenticating with a valid access token and no permissions.
///
/// Expected: Ok with the token's user
#[tokio::test]
async fn accepts_valid_access_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let student = factory::create_user(db).await?;
    let token = access_token(&jwt, &student, Role::Student);

    let user = AuthGuard::new(db, &jwt, &token).require(&[]).await?;

    assert_eq!(user.id, student.id);
    assert_eq!(user.role, Role::Student);

    Ok(())
}

/// Tests that a refresh token cannot be used as a bearer token.
///
/// Expected: Err(InvalidToken)
#[tokio::test]
async fn rejects_refresh_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let student = factory::create_user(db).await?;
    let token = BearerToken(
        jwt.issue(student.id, Role::Student, TokenType::Refresh)?
            .token,
    );

    let result = AuthGuard::new(db, &jwt, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a token whose user has been deleted.
///
/// Expected: Err(UserNotInDatabase)
#[tokio::test]
async fn rejects_token_of_deleted_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let token = BearerToken(jwt.issue(4242, Role::Admin, TokenType::Access)?.token);

    let result = AuthGuard::new(db, &jwt, &token).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));

    Ok(())
}

/// Tests that permissions are checked against the stored role, not the token's claim.
///
/// Verifies that a student holding a token that claims the admin role is still denied.
///
/// Expected: Err(AccessDenied)
#[tokio::test]
async fn uses_stored_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let student = factory::create_user(db).await?;
    let token = access_token(&jwt, &student, Role::Admin);

    let result = AuthGuard::new(db, &jwt, &token)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests that every listed permission must hold.
///
/// Expected: Err(AccessDenied) when the second permission fails
#[tokio::test]
async fn requires_all_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let student = factory::create_user(db).await?;
    let token = access_token(&jwt, &student, Role::Student);

    let result = AuthGuard::new(db, &jwt, &token)
        .require(&[Permission::AnyOf(&[Role::Student]), Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}
