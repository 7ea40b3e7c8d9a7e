use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        schedule::{ScheduleEntryDto, ScheduleEntryFormDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken},
        model::schedule::{ScheduleEntryParams, ScheduleFilter},
        service::schedule::ScheduleService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping settlement schedule endpoints in OpenAPI documentation
pub static SCHEDULE_TAG: &str = "schedule";

#[derive(Debug, Deserialize)]
pub struct ScheduleListParams {
    pub dormitory_id: Option<i32>,
    pub faculty_id: Option<i32>,
    pub from: Option<NaiveDate>,
}

impl From<ScheduleEntryFormDto> for ScheduleEntryParams {
    fn from(dto: ScheduleEntryFormDto) -> Self {
        Self {
            dormitory_id: dto.dormitory_id,
            faculty_id: dto.faculty_id,
            course: dto.course,
            date: dto.date,
            start_time: dto.start_time,
            end_time: dto.end_time,
            note: dto.note,
        }
    }
}

/// List settlement slots ordered by date and start time.
///
/// Filtering by faculty also returns slots open to every faculty.
#[utoipa::path(
    get,
    path = "/api/schedule",
    tag = SCHEDULE_TAG,
    params(
        ("dormitory_id" = Option<i32>, Query, description = "Only this dormitory"),
        ("faculty_id" = Option<i32>, Query, description = "Slots for this faculty"),
        ("from" = Option<NaiveDate>, Query, description = "Slots on or after this date")
    ),
    responses(
        (status = 200, description = "Settlement schedule", body = Vec<ScheduleEntryDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_schedule(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<ScheduleListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = ScheduleFilter {
        dormitory_id: params.dormitory_id,
        faculty_id: params.faculty_id,
        from: params.from,
    };
    let entries = ScheduleService::new(&state.db).list(filter).await?;
    let dtos: Vec<ScheduleEntryDto> = entries.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Add a settlement slot.
///
/// # Access Control
/// - `DormitoryManager` - Manager of the slot's dormitory, or an administrator
///
/// # Returns
/// - `201 Created` - Slot created
/// - `400 Bad Request` - Start time not before end time, or unknown dormitory/faculty
#[utoipa::path(
    post,
    path = "/api/schedule",
    tag = SCHEDULE_TAG,
    request_body = ScheduleEntryFormDto,
    responses(
        (status = 201, description = "Slot created", body = ScheduleEntryDto),
        (status = 400, description = "Invalid slot", body = ErrorDto),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_schedule_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<ScheduleEntryFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let entry = ScheduleService::new(&state.db)
        .create(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/schedule/{id}",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule entry ID")),
    request_body = ScheduleEntryFormDto,
    responses(
        (status = 200, description = "Slot updated", body = ScheduleEntryDto),
        (status = 400, description = "Invalid slot", body = ErrorDto),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 404, description = "Slot not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_schedule_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<ScheduleEntryFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let entry = ScheduleService::new(&state.db)
        .update(&user, id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(entry.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/{id}",
    tag = SCHEDULE_TAG,
    params(("id" = i32, Path, description = "Schedule entry ID")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 403, description = "Not the manager of this dormitory", body = ErrorDto),
        (status = 404, description = "Slot not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_schedule_entry(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    ScheduleService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
