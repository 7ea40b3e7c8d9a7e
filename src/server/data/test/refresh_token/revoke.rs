use super::*;

/// Tests that a refresh token can be revoked exactly once.
///
/// Rotation depends on the second revocation of the same token reporting failure, so a
/// replayed refresh token is rejected.
///
/// Expected: Ok(true) on first revoke, Ok(false) on second
#[tokio::test]
async fn revokes_only_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "jti-1".to_string(), Utc::now() + Duration::days(7))
        .await?;

    assert!(repo.is_active("jti-1").await?);
    assert!(repo.revoke("jti-1").await?);
    assert!(!repo.is_active("jti-1").await?);
    assert!(!repo.revoke("jti-1").await?);

    Ok(())
}

/// Tests that expired tokens are neither active nor revocable.
///
/// Expected: Ok(false) for both checks
#[tokio::test]
async fn expired_token_is_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = RefreshTokenRepository::new(db);
    repo.create(user.id, "old".to_string(), Utc::now() - Duration::days(1))
        .await?;

    assert!(!repo.is_active("old").await?);
    assert!(!repo.revoke("old").await?);

    Ok(())
}

/// Tests revoking every token of a user.
///
/// Expected: Ok with the user's two tokens revoked and the other user's untouched
#[tokio::test]
async fn revokes_all_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = RefreshTokenRepository::new(db);
    let expires = Utc::now() + Duration::days(7);
    repo.create(user.id, "a".to_string(), expires).await?;
    repo.create(user.id, "b".to_string(), expires).await?;
    repo.create(other.id, "c".to_string(), expires).await?;

    assert_eq!(repo.revoke_all_for_user(user.id).await?, 2);
    assert!(!repo.is_active("a").await?);
    assert!(repo.is_active("c").await?);

    Ok(())
}

/// Tests deleting revoked and expired tokens.
///
/// Expected: Ok(2) with only the live token left
#[tokio::test]
async fn deletes_stale_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = RefreshTokenRepository::new(db);
    let now = Utc::now();
    repo.create(user.id, "live".to_string(), now + Duration::days(7))
        .await?;
    repo.create(user.id, "expired".to_string(), now - Duration::days(1))
        .await?;
    repo.create(user.id, "revoked".to_string(), now + Duration::days(7))
        .await?;
    repo.revoke("revoked").await?;

    assert_eq!(repo.delete_stale(now).await?, 2);
    assert!(repo.is_active("live").await?);

    Ok(())
}
