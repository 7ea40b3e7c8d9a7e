use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        auth::ChangePasswordDto,
        user::{CreateUserDto, Role, UpdateProfileDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::{default_entries, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::PageRequest,
            user::{NewUserParams, UpdateProfileParams, UpdateUserParams, UserFilter},
        },
        service::{auth::AuthService, user::UserService},
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<Role>,
    pub faculty_id: Option<i32>,
    pub search: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Own profile", body = UserDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the caller's names, phone and group.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Empty name, or group outside the caller's faculty
/// - `401 Unauthorized` - Missing or invalid access token
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let params = UpdateProfileParams {
        id: user.id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        group_id: payload.group_id,
    };
    let updated = UserService::new(&state.db)
        .update_profile(&user, params)
        .await?;

    Ok((StatusCode::OK, Json(updated.into_dto())))
}

/// Change the caller's password.
///
/// All refresh tokens of the caller are revoked, signing out other sessions.
#[utoipa::path(
    put,
    path = "/api/users/me/password",
    tag = USER_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "New password too short", body = ErrorDto),
        (status = 401, description = "Current password is wrong", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    AuthService::new(&state.db, &state.jwt)
        .change_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List accounts for the back office.
///
/// Ordered by last name. `search` matches email, first and last name.
///
/// # Access Control
/// - `Admin` - Administrators and superadmins
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = USER_TAG,
    params(
        ("role" = Option<Role>, Query, description = "Only accounts with this role"),
        ("faculty_id" = Option<i32>, Query, description = "Only accounts of this faculty"),
        ("search" = Option<String>, Query, description = "Substring of email or name"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of accounts", body = PaginatedDto<UserDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let filter = UserFilter {
        role: params.role,
        faculty_id: params.faculty_id,
        search: params.search.filter(|s| !s.trim().is_empty()),
        page: PageRequest::new(params.page, params.entries),
    };
    let users = UserService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(users.into_dto(|u| u.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account", body = UserDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Account not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Create an account with any role.
///
/// Only a superadmin may create another superadmin.
///
/// # Access Control
/// - `Admin` - Administrators and superadmins
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Invalid fields or faculty/group mismatch
/// - `403 Forbidden` - Not an administrator, or superadmin rule violated
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid account data", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let params = NewUserParams {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        role: payload.role,
        faculty_id: payload.faculty_id,
        group_id: payload.group_id,
    };
    let user = UserService::new(&state.db).create(&actor, params).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Update an account's names, role and memberships.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = UserDto),
        (status = 400, description = "Invalid account data", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let params = UpdateUserParams {
        id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        role: payload.role,
        faculty_id: payload.faculty_id,
        group_id: payload.group_id,
    };
    let user = UserService::new(&state.db).update(&actor, params).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Delete an account. Administrators cannot delete themselves.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Attempted to delete own account", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db).delete(&actor, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the students of a faculty.
///
/// # Access Control
/// - `FacultyStaff` - Dean office staff of the faculty, or an administrator
#[utoipa::path(
    get,
    path = "/api/faculties/{id}/students",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "Faculty ID"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of students", body = PaginatedDto<UserDto>),
        (status = 403, description = "Not staff of this faculty", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_faculty_students(
    State(state): State<AppState>,
    token: BearerToken,
    Path(faculty_id): Path<i32>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::FacultyStaff(faculty_id)])
        .await?;

    let students = UserService::new(&state.db)
        .students_of_faculty(faculty_id, pagination.page_request())
        .await?;

    Ok((StatusCode::OK, Json(students.into_dto(|u| u.into_dto()))))
}
