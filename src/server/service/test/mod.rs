use crate::{
    model::{
        agreement::AgreementStatus, application::ApplicationStatus,
        reservation::ReservationStatus, user::Role,
    },
    server::{
        error::{auth::AuthError, AppError},
        model::user::User,
        service::auth::token::JwtService,
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod agreement;
mod application;
mod auth;
mod search;

fn jwt() -> JwtService {
    JwtService::new(
        "service-test-secret-0123456789abc",
        Duration::minutes(15),
        Duration::days(7),
    )
}

/// Loads a factory-built account as the domain user that services act on.
fn actor(entity: entity::user::Model) -> User {
    User::from_entity(entity).unwrap()
}

fn is_denied<T>(result: &Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_, _))))
}
