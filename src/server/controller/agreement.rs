use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        agreement::{AgreementDto, AgreementFormDto, AgreementStatus, UpdateAgreementStatusDto},
        api::{ErrorDto, PaginatedDto},
        user::Role,
    },
    server::{
        controller::default_entries,
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        model::{
            agreement::{AgreementFilter, AgreementParams},
            pagination::PageRequest,
        },
        service::agreement::AgreementService,
        state::AppState,
        util::validate::Validate,
    },
};

/// Tag for grouping settlement agreement endpoints in OpenAPI documentation
pub static AGREEMENT_TAG: &str = "agreement";

#[derive(Debug, Deserialize)]
pub struct AgreementListParams {
    pub status: Option<AgreementStatus>,
    pub dormitory_id: Option<i32>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl From<AgreementFormDto> for AgreementParams {
    fn from(dto: AgreementFormDto) -> Self {
        Self {
            dormitory_id: dto.dormitory_id,
            room_id: dto.room_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            passport_number: dto.passport_number,
        }
    }
}

/// Submit a settlement agreement for review.
///
/// The contract number `SA-{year}-{id}` is assigned on creation.
///
/// # Access Control
/// - `Student` - Student accounts
///
/// # Returns
/// - `201 Created` - Agreement awaiting review
/// - `400 Bad Request` - Invalid dates, empty passport number, or room outside the dormitory
/// - `404 Not Found` - Dormitory or room not found
#[utoipa::path(
    post,
    path = "/api/agreements",
    tag = AGREEMENT_TAG,
    request_body = AgreementFormDto,
    responses(
        (status = 201, description = "Agreement created", body = AgreementDto),
        (status = 400, description = "Invalid agreement", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 404, description = "Dormitory or room not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn create_agreement(
    State(state): State<AppState>,
    token: BearerToken,
    Json(payload): Json<AgreementFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let student = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::AnyOf(&[Role::Student])])
        .await?;
    payload.validate()?;

    let agreement = AgreementService::new(&state.db)
        .create(&student, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(agreement.into_dto())))
}

/// Edit an agreement while it awaits review.
#[utoipa::path(
    put,
    path = "/api/agreements/{id}",
    tag = AGREEMENT_TAG,
    params(("id" = i32, Path, description = "Agreement ID")),
    request_body = AgreementFormDto,
    responses(
        (status = 200, description = "Agreement updated", body = AgreementDto),
        (status = 400, description = "Invalid agreement", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Agreement not found", body = ErrorDto),
        (status = 409, description = "Agreement was already reviewed", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn update_agreement(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<AgreementFormDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;
    payload.validate()?;

    let agreement = AgreementService::new(&state.db)
        .update(&user, id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(agreement.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/agreements/my",
    tag = AGREEMENT_TAG,
    responses(
        (status = 200, description = "Own agreements, newest first", body = Vec<AgreementDto>),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn my_agreements(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let agreements = AgreementService::new(&state.db).my(&user).await?;
    let dtos: Vec<AgreementDto> = agreements.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// List agreements for administrators, or the caller's managed dormitories.
#[utoipa::path(
    get,
    path = "/api/agreements",
    tag = AGREEMENT_TAG,
    params(
        ("status" = Option<AgreementStatus>, Query, description = "Only this status"),
        ("dormitory_id" = Option<i32>, Query, description = "Only this dormitory"),
        ("page" = Option<u64>, Query, description = "Zero-based page number"),
        ("entries" = Option<u64>, Query, description = "Entries per page (max 100)")
    ),
    responses(
        (status = 200, description = "Page of agreements", body = PaginatedDto<AgreementDto>),
        (status = 403, description = "Role may not list agreements", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn list_agreements(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<AgreementListParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let filter = AgreementFilter {
        status: params.status,
        dormitory_id: params.dormitory_id,
        dormitory_ids: None,
        page: PageRequest::new(params.page, params.entries),
    };
    let agreements = AgreementService::new(&state.db)
        .list(&user, filter)
        .await?;

    Ok((StatusCode::OK, Json(agreements.into_dto(|a| a.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/agreements/{id}",
    tag = AGREEMENT_TAG,
    params(("id" = i32, Path, description = "Agreement ID")),
    responses(
        (status = 200, description = "Agreement", body = AgreementDto),
        (status = 403, description = "Not allowed to view this agreement", body = ErrorDto),
        (status = 404, description = "Agreement not found", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_agreement(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let agreement = AgreementService::new(&state.db).get(&user, id).await?;

    Ok((StatusCode::OK, Json(agreement.into_dto())))
}

/// Approve, reject or archive an agreement.
///
/// # Access Control
/// - `DormitoryManager` - Manager of the agreement's dormitory, or an administrator
#[utoipa::path(
    patch,
    path = "/api/agreements/{id}/status",
    tag = AGREEMENT_TAG,
    params(("id" = i32, Path, description = "Agreement ID")),
    request_body = UpdateAgreementStatusDto,
    responses(
        (status = 200, description = "Status changed", body = AgreementDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 403, description = "Access denied", body = ErrorDto),
        (status = 404, description = "Agreement not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn change_agreement_status(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAgreementStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let agreement = AgreementService::new(&state.db)
        .change_status(&user, id, payload.status, payload.comment)
        .await?;

    Ok((StatusCode::OK, Json(agreement.into_dto())))
}
