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
        dormitory::{DormitoryDto, DormitoryFormDto, RoomDto, RoomFormDto, RoomStatus},
    },
    server::{
        controller::default_entries,
        error::AppError,
        middleware::auth::{authorize, AuthGuard, BearerToken, Permission},
        model::{
            dormitory::DormitoryParams,
            pagination::PageRequest,
            room::{RoomFilter, RoomParams},
        },
        service::{dormitory::DormitoryService, room::RoomService},
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping dormitory and room endpoints in OpenAPI documentation
pub static DORMITORY_TAG: &str = "dormitory";

#[derive(Debug, Deserialize)]
pub struct RoomListParams {
    pub dormitory_id: Option<i32>,
    pub floor: Option<i16>,
    #[serde(default)]
    pub available_only: bool,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

/// List dormitories with room and free-place totals.
#[utoipa::path(
    get,
    path = "/api/dormitories",
    tag = DORMITORY_TAG,
    responses(
        (status = 200, description = "All dormitories ordered by name", body = Vec<DormitoryDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_dormitories(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let dormitories = DormitoryService::new(&state.db).list().await?;
    let dtos: Vec<DormitoryDto> = dormitories.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/dormitories/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Dormitory ID")),
    responses(
        (status = 200, description = "Dormitory", body = DormitoryDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 404, description = "Dormitory not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_dormitory(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let dormitory = DormitoryService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(dormitory.into_dto())))
}

/// Create a dormitory.
///
/// # Access Control
/// - `Admin` - Administrators and superadmins
///
/// # Returns
/// - `201 Created` - Dormitory created
/// - `400 Bad Request` - Empty fields, or `manager_id` is not a dorm_manager account
/// - `409 Conflict` - A dormitory with this name exists
#[utoipa::path(
    post,
    path = "/api/admin/dormitories",
    tag = DORMITORY_TAG,
    request_body = DormitoryFormDto,
    responses(
        (status = 201, description = "Dormitory created", body = DormitoryDto),
        (status = 400, description = "Invalid dormitory data", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 409, description = "Dormitory name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_dormitory(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<DormitoryFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let dormitory = DormitoryService::new(&state.db)
        .create(DormitoryParams {
            name: payload.name,
            address: payload.address,
            manager_id: payload.manager_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dormitory.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/dormitories/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Dormitory ID")),
    request_body = DormitoryFormDto,
    responses(
        (status = 200, description = "Dormitory updated", body = DormitoryDto),
        (status = 400, description = "Invalid dormitory data", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Dormitory not found", body = ErrorDto),
        (status = 409, description = "Dormitory name taken", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_dormitory(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<DormitoryFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let dormitory = DormitoryService::new(&state.db)
        .update(
            id,
            DormitoryParams {
                name: payload.name,
                address: payload.address,
                manager_id: payload.manager_id,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(dormitory.into_dto())))
}

/// Delete a dormitory together with its rooms.
#[utoipa::path(
    delete,
    path = "/api/admin/dormitories/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Dormitory ID")),
    responses(
        (status = 204, description = "Dormitory deleted"),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 404, description = "Dormitory not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_dormitory(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    DormitoryService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List rooms.
///
/// `available_only` keeps rooms with status `available` and at least one free place.
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = DORMITORY_TAG,
    params(
        ("dormitory_id" = Option<i32>, Query, description = "Only rooms of this dormitory"),
        ("floor" = Option<i16>, Query, description = "Only rooms on this floor"),
        ("available_only" = Option<bool>, Query, description = "Only bookable rooms"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of rooms", body = PaginatedDto<RoomDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<RoomListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = RoomFilter {
        dormitory_id: params.dormitory_id,
        floor: params.floor,
        available_only: params.available_only,
        page: PageRequest::new(params.page, params.entries),
    };
    let rooms = RoomService::new(&state.db).list(filter).await?;

    Ok((StatusCode::OK, Json(rooms.into_dto(|r| r.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = RoomDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_room(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let room = RoomService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(room.into_dto())))
}

/// Add a room to a dormitory.
///
/// Status defaults to `available` when omitted.
///
/// # Access Control
/// - `DormitoryManager` - Manager of the dormitory, or an administrator
///
/// # Returns
/// - `201 Created` - Room created
/// - `400 Bad Request` - Empty number, capacity below 1 or negative rent
/// - `404 Not Found` - Dormitory not found
/// - `409 Conflict` - Room number already used in the dormitory
#[utoipa::path(
    post,
    path = "/api/dormitories/{id}/rooms",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Dormitory ID")),
    request_body = RoomFormDto,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Invalid room data", body = ErrorDto),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 404, description = "Dormitory not found", body = ErrorDto),
        (status = 409, description = "Room number taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_room(
    State(state): State<AppState>,
    token: BearerToken,
    Path(dormitory_id): Path<i32>,
    Json(payload): Json<RoomFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::DormitoryManager(dormitory_id)])
        .await?;
    payload.validate()?;

    let params = RoomParams {
        number: payload.number,
        floor: payload.floor,
        capacity: payload.capacity,
        monthly_rent: payload.monthly_rent,
        status: payload.status.unwrap_or(RoomStatus::Available),
    };
    let room = RoomService::new(&state.db)
        .create(dormitory_id, params)
        .await?;

    Ok((StatusCode::CREATED, Json(room.into_dto())))
}

/// Update a room.
///
/// Status is kept when omitted. Capacity cannot drop below the current occupancy.
#[utoipa::path(
    put,
    path = "/api/rooms/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    request_body = RoomFormDto,
    responses(
        (status = 200, description = "Room updated", body = RoomDto),
        (status = 400, description = "Invalid room data or capacity below occupancy", body = ErrorDto),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Room number taken", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_room(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<RoomFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let service = RoomService::new(&state.db);
    let room = service.get(id).await?;
    authorize(
        &state.db,
        &user,
        &[Permission::DormitoryManager(room.dormitory_id)],
    )
    .await?;

    let params = RoomParams {
        number: payload.number,
        floor: payload.floor,
        capacity: payload.capacity,
        monthly_rent: payload.monthly_rent,
        status: payload.status.unwrap_or(room.status),
    };
    let room = service.update(id, params).await?;

    Ok((StatusCode::OK, Json(room.into_dto())))
}

/// Delete an empty room.
#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    tag = DORMITORY_TAG,
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Room still has occupants", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_room(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let service = RoomService::new(&state.db);
    let room = service.get(id).await?;
    authorize(
        &state.db,
        &user,
        &[Permission::DormitoryManager(room.dormitory_id)],
    )
    .await?;

    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
