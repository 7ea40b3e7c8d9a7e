use crate::{
    model::user::Role,
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{authorize, AuthGuard, BearerToken, Permission},
        model::user::User,
        service::auth::token::{JwtService, TokenType},
    },
};
use chrono::Duration;
use test_utils::{builder::TestBuilder, factory};

mod guard;
mod permission;

fn jwt() -> JwtService {
    JwtService::new(
        "middleware-test-secret-0123456789",
        Duration::minutes(15),
        Duration::days(7),
    )
}

fn access_token(jwt: &JwtService, user: &entity::user::Model, role: Role) -> BearerToken {
    BearerToken(jwt.issue(user.id, role, TokenType::Access).unwrap().token)
}
