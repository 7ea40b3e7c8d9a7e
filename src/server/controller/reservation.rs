use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        reservation::{
            CreateReservationDto, ReservationDto, ReservationStatus, UpdateReservationStatusDto,
        },
        user::Role,
    },
    server::{
        controller::default_entries,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            pagination::PageRequest,
            reservation::{CreateReservationParams, ReservationFilter},
        },
        service::reservation::ReservationService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping reservation endpoints in OpenAPI documentation
pub static RESERVATION_TAG: &str = "reservation";

#[derive(Debug, Deserialize)]
pub struct ReservationListParams {
    pub status: Option<ReservationStatus>,
    pub room_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

/// Reserve a place in a room.
///
/// The room must be available with a free place and the stay may not start in the past.
/// A student holds at most one active reservation.
///
/// # Access Control
/// - `Student` - Student accounts
///
/// # Returns
/// - `201 Created` - Pending reservation
/// - `400 Bad Request` - End date not after start date, or start date in the past
/// - `404 Not Found` - Room not found
/// - `409 Conflict` - Room not bookable, or an active reservation exists
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    request_body = CreateReservationDto,
    responses(
        (status = 201, description = "Reservation created", body = ReservationDto),
        (status = 400, description = "Invalid dates", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 404, description = "Room not found", body = ErrorDto),
        (status = 409, description = "Room full or active reservation exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<CreateReservationDto>,
) -> Result<impl IntoResponse, AppError> {
    let student = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::AnyOf(&[Role::Student])])
        .await?;
    payload.validate()?;

    let params = CreateReservationParams {
        user_id: student.id,
        room_id: payload.room_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        comment: payload.comment,
    };
    let reservation = ReservationService::new(&state.db)
        .create(&student, params, Utc::now().date_naive())
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/reservations/my",
    tag = RESERVATION_TAG,
    responses(
        (status = 200, description = "Own reservations, newest first", body = Vec<ReservationDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn my_reservations(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let reservations = ReservationService::new(&state.db).my(&user).await?;
    let dtos: Vec<ReservationDto> = reservations.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List reservations.
///
/// # Access Control
/// - `Admin` - Every reservation
/// - `DormManager` - Reservations for rooms of managed dormitories
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    params(
        ("status" = Option<ReservationStatus>, Query, description = "Only this status"),
        ("room_id" = Option<i32>, Query, description = "Only this room"),
        ("dormitory_id" = Option<i32>, Query, description = "Only rooms of this dormitory"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of reservations", body = PaginatedDto<ReservationDto>),
        (status = 403, description = "Role may not list reservations", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<ReservationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = ReservationFilter {
        status: params.status,
        room_id: params.room_id,
        dormitory_id: params.dormitory_id,
        dormitory_ids: None,
        page: PageRequest::new(params.page, params.entries),
    };
    let reservations = ReservationService::new(&state.db)
        .list(&user, filter)
        .await?;

    Ok((StatusCode::OK, Json(reservations.into_dto(|r| r.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ReservationDto),
        (status = 403, description = "Not allowed to view this reservation", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let reservation = ReservationService::new(&state.db).get(&user, id).await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Change a reservation's status.
///
/// Check-in and check-out adjust the room's occupancy in the same transaction as the
/// status change.
///
/// # Returns
/// - `200 OK` - Updated reservation
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `403 Forbidden` - Caller may not perform this transition
/// - `409 Conflict` - Confirming or checking in would exceed the room's capacity
#[utoipa::path(
    patch,
    path = "/api/reservations/{id}/status",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateReservationStatusDto,
    responses(
        (status = 200, description = "Status changed", body = ReservationDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Room capacity exceeded", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn change_reservation_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReservationStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let reservation = ReservationService::new(&state.db)
        .change_status(&user, id, payload.status, payload.comment)
        .await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}
