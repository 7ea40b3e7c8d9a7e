use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, stats::StatsDto},
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken, Permission},
        service::stats::StatsService,
        state::AppState,
    },
};

/// Tag for grouping back-office endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Back-office dashboard numbers.
///
/// User counts per role, application counts per status, and room, capacity and
/// occupancy totals.
///
/// # Access Control
/// - `Admin` - Administrators and superadmins
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Statistics", body = StatsDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn get_stats(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[Permission::Admin])
        .await?;

    let stats = StatsService::new(&state.db).get().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}
