use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ErrorDto,
        auth::{LoginDto, RefreshDto, RegisterDto, TokenPairDto},
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken},
        model::auth::RegisterParams,
        service::auth::AuthService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a student account.
///
/// Creates an account with the student role and returns a token pair so the client is
/// signed in immediately. Rate limited per client IP.
///
/// # Returns
/// - `201 Created` - Account created, token pair returned
/// - `400 Bad Request` - Invalid email, short password, or faculty/group mismatch
/// - `409 Conflict` - Email already registered
/// - `429 Too Many Requests` - Rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = TokenPairDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let pair = AuthService::new(&state.db, &state.jwt)
        .register(RegisterParams {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            faculty_id: payload.faculty_id,
            group_id: payload.group_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(pair.into_dto())))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - Token pair
/// - `401 Unauthorized` - Wrong email or password (same message for both)
/// - `429 Too Many Requests` - Rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = TokenPairDto),
        (status = 400, description = "Missing email or password", body = ErrorDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let pair = AuthService::new(&state.db, &state.jwt)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Exchange a refresh token for a new token pair.
///
/// The presented refresh token is revoked; using it again fails with 401.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshDto,
    responses(
        (status = 200, description = "New token pair", body = TokenPairDto),
        (status = 401, description = "Refresh token invalid, expired or revoked", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshDto>,
) -> Result<impl IntoResponse, AppError> {
    let pair = AuthService::new(&state.db, &state.jwt)
        .refresh(&payload.refresh_token)
        .await?;

    Ok((StatusCode::OK, Json(pair.into_dto())))
}

/// Revoke a refresh token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    request_body = RefreshDto,
    responses(
        (status = 204, description = "Refresh token revoked"),
        (status = 401, description = "Refresh token invalid", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.jwt)
        .logout(&payload.refresh_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
