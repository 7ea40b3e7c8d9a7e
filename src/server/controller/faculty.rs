use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        faculty::{FacultyDto, FacultyFormDto, GroupDto, GroupFormDto},
    },
    server::{
        error::AppError,
        middleware::auth::{authorize, AuthGuard, BearerToken, Permission},
        model::faculty::{FacultyParams, GroupParams},
        service::faculty::FacultyService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping faculty endpoints in OpenAPI documentation
pub static FACULTY_TAG: &str = "faculty";

/// List all faculties.
///
/// Public, the registration form uses it before the user has an account.
#[utoipa::path(
    get,
    path = "/api/faculties",
    tag = FACULTY_TAG,
    responses(
        (status = 200, description = "All faculties ordered by name", body = Vec<FacultyDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_faculties(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let faculties = FacultyService::new(&state.db).list().await?;
    let dtos: Vec<FacultyDto> = faculties.into_iter().map(|f| f.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a faculty.
///
/// # Access Control
/// - `Admin` - Administrators and superadmins
///
/// # Returns
/// - `201 Created` - Faculty created
/// - `400 Bad Request` - Empty name or short name
/// - `409 Conflict` - A faculty with this name exists
#[utoipa::path(
    post,
    path = "/api/admin/faculties",
    tag = FACULTY_TAG,
    request_body = FacultyFormDto,
    responses(
        (status = 201, description = "Faculty created", body = FacultyDto),
        (status = 400, description = "Invalid faculty data", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 409, description = "Faculty name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<FacultyFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let faculty = FacultyService::new(&state.db)
        .create(FacultyParams {
            name: payload.name,
            short_name: payload.short_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(faculty.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/faculties/{id}",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = FacultyFormDto,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyDto),
        (status = 400, description = "Invalid faculty data", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Faculty not found", body = ErrorDto),
        (status = 409, description = "Faculty name taken", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<FacultyFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let faculty = FacultyService::new(&state.db)
        .update(
            id,
            FacultyParams {
                name: payload.name,
                short_name: payload.short_name,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(faculty.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/faculties/{id}",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 204, description = "Faculty deleted"),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Faculty not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_faculty(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    FacultyService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the student groups of a faculty. Public.
#[utoipa::path(
    get,
    path = "/api/faculties/{id}/groups",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Groups ordered by course and name", body = Vec<GroupDto>),
        (status = 404, description = "Faculty not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Path(faculty_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let groups = FacultyService::new(&state.db).list_groups(faculty_id).await?;
    let dtos: Vec<GroupDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create a student group in a faculty.
///
/// # Access Control
/// - `FacultyStaff` - Dean office staff of the faculty, or an administrator
///
/// # Returns
/// - `201 Created` - Group created
/// - `400 Bad Request` - Empty name or course outside 1..=6
/// - `404 Not Found` - Faculty not found
#[utoipa::path(
    post,
    path = "/api/faculties/{id}/groups",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = GroupFormDto,
    responses(
        (status = 201, description = "Group created", body = GroupDto),
        (status = 400, description = "Invalid group data", body = ErrorDto),
        (status = 403, description = "Not staff of this faculty", body = ErrorDto),
        (status = 404, description = "Faculty not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_group(
    State(state): State<AppState>,
    token: BearerToken,
    Path(faculty_id): Path<i32>,
    Json(payload): Json<GroupFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::FacultyStaff(faculty_id)])
        .await?;
    payload.validate()?;

    let group = FacultyService::new(&state.db)
        .create_group(
            faculty_id,
            GroupParams {
                name: payload.name,
                course: payload.course,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(group.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    request_body = GroupFormDto,
    responses(
        (status = 200, description = "Group updated", body = GroupDto),
        (status = 400, description = "Invalid group data", body = ErrorDto),
        (status = 403, description = "Not staff of the group's faculty", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_group(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<GroupFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let service = FacultyService::new(&state.db);
    let group = service.get_group(id).await?;
    authorize(&state.db, &user, &[Permission::FacultyStaff(group.faculty_id)]).await?;

    let group = service
        .update_group(
            id,
            GroupParams {
                name: payload.name,
                course: payload.course,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(group.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    tag = FACULTY_TAG,
    params(("id" = i32, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 403, description = "Not staff of the group's faculty", body = ErrorDto),
        (status = 404, description = "Group not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_group(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let service = FacultyService::new(&state.db);
    let group = service.get_group(id).await?;
    authorize(&state.db, &user, &[Permission::FacultyStaff(group.faculty_id)]).await?;

    service.delete_group(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
