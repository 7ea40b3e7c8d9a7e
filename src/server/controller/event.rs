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
        api::ErrorDto,
        event::{EventDto, EventFormDto},
        user::Role,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::event::{EventFilter, EventParams},
        service::event::EventService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping event endpoints in OpenAPI documentation
pub static EVENT_TAG: &str = "event";

const COUNCIL: Permission =
    Permission::AnyOf(&[Role::StudentCouncilHead, Role::StudentCouncilMember]);

#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub dormitory_id: Option<i32>,
    #[serde(default)]
    pub upcoming: bool,
}

impl From<EventFormDto> for EventParams {
    fn from(dto: EventFormDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            location: dto.location,
            starts_at: dto.starts_at,
            ends_at: dto.ends_at,
            dormitory_id: dto.dormitory_id,
        }
    }
}

/// List events ordered by start time.
///
/// `upcoming` keeps events that have not started yet.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(
        ("dormitory_id" = Option<i32>, Query, description = "Only events of this dormitory"),
        ("upcoming" = Option<bool>, Query, description = "Only events starting in the future")
    ),
    responses(
        (status = 200, description = "Events", body = Vec<EventDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_events(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<EventListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = EventFilter {
        dormitory_id: params.dormitory_id,
        starting_after: params.upcoming.then(Utc::now),
    };
    let events = EventService::new(&state.db).list(filter).await?;
    let dtos: Vec<EventDto> = events.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Announce an event.
///
/// # Access Control
/// - `StudentCouncilHead`, `StudentCouncilMember` - Student council
/// - `Admin` - Administrators and superadmins
///
/// # Returns
/// - `201 Created` - Event created
/// - `400 Bad Request` - Empty title, `ends_at` not after `starts_at`, or unknown dormitory
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = EventFormDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid event", body = ErrorDto),
        (status = 403, description = "Not a student council member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<EventFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[COUNCIL])
        .await?;
    payload.validate()?;

    let event = EventService::new(&state.db)
        .create(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(event.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event ID")),
    request_body = EventFormDto,
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, description = "Invalid event", body = ErrorDto),
        (status = 403, description = "Not a student council member", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_event(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<EventFormDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[COUNCIL])
        .await?;
    payload.validate()?;

    let event = EventService::new(&state.db)
        .update(id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(event.into_dto())))
}

/// Delete an event. Allowed for administrators, the council head and the event's creator.
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    EventService::new(&state.db).delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
