use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        search::{SearchHitDto, SearchResultsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, BearerToken},
        service::search::SearchService,
        state::AppState,
    },
};

/// Tag for grouping search endpoints in OpenAPI documentation
pub static SEARCH_TAG: &str = "search";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u64>,
}

/// Command palette search.
///
/// Matches rooms, dormitories, faculties and groups, plus user accounts for
/// administrators. Hits are grouped by kind. Queries shorter than two characters return no
/// hits.
///
/// # Arguments
/// - `q` - Free text
/// - `limit` - Hits per kind, default 5, capped at 20
#[utoipa::path(
    get,
    path = "/api/search",
    tag = SEARCH_TAG,
    params(
        ("q" = String, Query, description = "Search text"),
        ("limit" = Option<u64>, Query, description = "Hits per kind (max 20)")
    ),
    responses(
        (status = 200, description = "Search hits", body = SearchResultsDto),
        (status = 401, description = "Missing or invalid access token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("bearer" = []))
)]
pub async fn search(
    State(state): State<AppState>,
    token: BearerToken,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &token)
        .require(&[])
        .await?;

    let hits = SearchService::new(&state.db)
        .search(&user, &params.q, params.limit)
        .await?;
    let hits: Vec<SearchHitDto> = hits.into_iter().map(|h| h.into_dto()).collect();

    Ok((
        StatusCode::OK,
        Json(SearchResultsDto {
            query: params.q,
            hits,
        }),
    ))
}
