use super::*;
use crate::server::{model::auth::RegisterParams, service::auth::AuthService};

fn register_params(email: &str) -> RegisterParams {
    RegisterParams {
        email: email.to_string(),
        password: "correct horse battery".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: None,
        faculty_id: None,
        group_id: None,
    }
}

/// Tests that registration creates a student and signs it in.
///
/// Expected: Ok with a student account, both tokens and the access lifetime in seconds
#[tokio::test]
async fn register_creates_student() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();

    let pair = AuthService::new(db, &jwt)
        .register(register_params("Ada@Example.com"))
        .await?;

    assert_eq!(pair.user.role, Role::Student);
    assert_eq!(pair.user.email, "ada@example.com");
    assert_eq!(pair.expires_in, 15 * 60);
    assert!(!pair.access_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);

    Ok(())
}

/// Tests registering an email twice, ignoring case.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn register_rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);

    service.register(register_params("ada@example.com")).await?;
    let result = service.register(register_params("ADA@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests registering into a group that belongs to another faculty.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn register_rejects_group_outside_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let faculty = factory::create_faculty(db).await?;
    let other = factory::create_faculty(db).await?;
    let group = factory::create_group(db, other.id).await?;

    let result = AuthService::new(db, &jwt)
        .register(RegisterParams {
            faculty_id: Some(faculty.id),
            group_id: Some(group.id),
            ..register_params("ada@example.com")
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests login with the right and the wrong password.
///
/// Expected: Ok for the right password, Err(InvalidCredentials) for the wrong one and
/// for an unknown email
#[tokio::test]
async fn login_checks_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);
    let registered = service.register(register_params("ada@example.com")).await?;

    let pair = service
        .login(" ADA@example.com ", "correct horse battery")
        .await?;
    assert_eq!(pair.user.id, registered.user.id);

    for (email, password) in [
        ("ada@example.com", "wrong password"),
        ("nobody@example.com", "correct horse battery"),
    ] {
        let result = service.login(email, password).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}

/// Tests refresh token rotation.
///
/// Verifies that a refresh token works exactly once and the rotated token works after it.
///
/// Expected: Ok for the first use, Err(InvalidToken) for the replay, Ok for the new token
#[tokio::test]
async fn refresh_rotates_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);
    let pair = service.register(register_params("ada@example.com")).await?;

    let rotated = service.refresh(&pair.refresh_token).await?;
    let replay = service.refresh(&pair.refresh_token).await;

    assert!(matches!(
        replay,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));
    service.refresh(&rotated.refresh_token).await?;

    Ok(())
}

/// Tests that an access token is not accepted for refresh.
///
/// Expected: Err(InvalidToken)
#[tokio::test]
async fn refresh_rejects_access_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);
    let pair = service.register(register_params("ada@example.com")).await?;

    let result = service.refresh(&pair.access_token).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests that logout revokes the refresh token and may be repeated.
///
/// Expected: Ok for both logouts, Err(InvalidToken) when refreshing afterwards
#[tokio::test]
async fn logout_revokes_refresh_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);
    let pair = service.register(register_params("ada@example.com")).await?;

    service.logout(&pair.refresh_token).await?;
    service.logout(&pair.refresh_token).await?;

    assert!(service.refresh(&pair.refresh_token).await.is_err());

    Ok(())
}

/// Tests changing the password.
///
/// Verifies that the old password stops working, the new one works and existing
/// refresh tokens are revoked.
///
/// Expected: Ok, with the old session signed out
#[tokio::test]
async fn change_password_revokes_sessions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let jwt = jwt();
    let service = AuthService::new(db, &jwt);
    let pair = service.register(register_params("ada@example.com")).await?;

    let wrong = service
        .change_password(&pair.user, "not my password", "new secret value")
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    service
        .change_password(&pair.user, "correct horse battery", "new secret value")
        .await?;

    assert!(service.refresh(&pair.refresh_token).await.is_err());
    assert!(service
        .login("ada@example.com", "correct horse battery")
        .await
        .is_err());
    service.login("ada@example.com", "new secret value").await?;

    Ok(())
}
