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
        application::{
            ApplicationDto, ApplicationStatus, CreateApplicationDto, UpdateApplicationStatusDto,
        },
        user::Role,
    },
    server::{
        controller::default_entries,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{application::ApplicationFilter, pagination::PageRequest},
        service::application::{ApplicationService, ApplyParams, StatusChange},
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping application endpoints in OpenAPI documentation
pub static APPLICATION_TAG: &str = "application";

#[derive(Debug, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<ApplicationStatus>,
    pub faculty_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

/// File an accommodation application.
///
/// A student may have only one open (pending, faculty approved or dormitory approved)
/// application at a time. `faculty_id` defaults to the student's own faculty.
///
/// # Access Control
/// - `Student` - Student accounts
///
/// # Returns
/// - `201 Created` - Pending application
/// - `400 Bad Request` - Course outside 1..=6, or no faculty known
/// - `409 Conflict` - An open application already exists
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application filed", body = ApplicationDto),
        (status = 400, description = "Invalid application", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 409, description = "An open application already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_application(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let student = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::AnyOf(&[Role::Student])])
        .await?;
    payload.validate()?;

    let application = ApplicationService::new(&state.db)
        .apply(
            &student,
            ApplyParams {
                faculty_id: payload.faculty_id,
                dormitory_id: payload.dormitory_id,
                course: payload.course,
                comment: payload.comment,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(application.into_dto())))
}

/// List the caller's own applications, newest first.
#[utoipa::path(
    get,
    path = "/api/applications/my",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Own applications", body = Vec<ApplicationDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn my_applications(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let applications = ApplicationService::new(&state.db).my(&user).await?;
    let dtos: Vec<ApplicationDto> = applications.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List applications visible to the caller.
///
/// Administrators and the student council head see every application. Dean office staff
/// are limited to their faculty, dormitory managers to the dormitories they manage plus
/// faculty approved applications that have no dormitory yet.
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    params(
        ("status" = Option<ApplicationStatus>, Query, description = "Only this status"),
        ("faculty_id" = Option<i32>, Query, description = "Only this faculty"),
        ("dormitory_id" = Option<i32>, Query, description = "Only this dormitory"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of applications", body = PaginatedDto<ApplicationDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 403, description = "Role may not list applications", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_applications(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<ApplicationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = ApplicationFilter {
        status: params.status,
        faculty_id: params.faculty_id,
        dormitory_id: params.dormitory_id,
        dormitory_ids: None,
        include_unassigned: false,
        page: PageRequest::new(params.page, params.entries),
    };
    let applications = ApplicationService::new(&state.db)
        .list(&user, filter)
        .await?;

    Ok((StatusCode::OK, Json(applications.into_dto(|a| a.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = ApplicationDto),
        (status = 403, description = "Not allowed to view this application", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_application(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let application = ApplicationService::new(&state.db).get(&user, id).await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

/// Change an application's status.
///
/// Only transitions in the workflow table are accepted, by the actor the table names.
/// The reviewer and review comment are recorded.
///
/// # Returns
/// - `200 OK` - Updated application
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `403 Forbidden` - Caller may not perform this transition
/// - `404 Not Found` - Application not found
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    tag = APPLICATION_TAG,
    params(("id" = i32, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ApplicationDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn change_application_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateApplicationStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let application = ApplicationService::new(&state.db)
        .change_status(
            &user,
            id,
            StatusChange {
                status: payload.status,
                comment: payload.comment,
                dormitory_id: payload.dormitory_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}
