//! Route table, OpenAPI document and HTTP middleware.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::{
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
        Components,
    },
    OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        admin::{self, ADMIN_TAG},
        agreement::{self, AGREEMENT_TAG},
        application::{self, APPLICATION_TAG},
        auth::{self, AUTH_TAG},
        dormitory::{self, DORMITORY_TAG},
        event::{self, EVENT_TAG},
        faculty::{self, FACULTY_TAG},
        reservation::{self, RESERVATION_TAG},
        schedule::{self, SCHEDULE_TAG},
        search::{self, SEARCH_TAG},
        user::{self, USER_TAG},
    },
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Requests per second replenished for each client IP on rate limited auth routes.
const AUTH_RATE_PER_SECOND: u64 = 2;
/// Requests a client IP may burst before being limited.
const AUTH_RATE_BURST: u32 = 10;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dormitory API",
        description = "Dormitory management: housing, applications, reservations and settlement"
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token refresh"),
        (name = USER_TAG, description = "Profiles and account administration"),
        (name = FACULTY_TAG, description = "Faculties and student groups"),
        (name = DORMITORY_TAG, description = "Dormitories and rooms"),
        (name = APPLICATION_TAG, description = "Accommodation applications"),
        (name = RESERVATION_TAG, description = "Room reservations"),
        (name = AGREEMENT_TAG, description = "Settlement agreements"),
        (name = SCHEDULE_TAG, description = "Settlement schedule"),
        (name = EVENT_TAG, description = "Student council events"),
        (name = SEARCH_TAG, description = "Command palette search"),
        (name = ADMIN_TAG, description = "Back-office statistics")
    )
)]
struct ApiDoc;

/// Builds the application router with every API route, Swagger UI at `/swagger-ui` and
/// the CORS and tracing layers.
///
/// Login, registration and refresh are rate limited per peer IP, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Returns
/// - `Ok(Router)` - Router ready to serve
/// - `Err(ConfigError::InvalidEnvVar)` - `CORS_ORIGIN` is not a valid header value
pub fn router(config: &Config, state: AppState) -> Result<Router, AppError> {
    let (api_router, mut api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth_routes()?)
        .merge(api_routes())
        .with_state(state)
        .split_for_parts();

    api.components
        .get_or_insert_with(Components::new)
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );

    let router = api_router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}

fn auth_routes() -> Result<OpenApiRouter<AppState>, AppError> {
    let governor = GovernorConfigBuilder::default()
        .per_second(AUTH_RATE_PER_SECOND)
        .burst_size(AUTH_RATE_BURST)
        .finish()
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: "rate limit".to_string(),
            reason: "period and burst size must be non-zero".to_string(),
        })?;

    let limited = OpenApiRouter::new()
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::refresh))
        .layer(GovernorLayer::new(Arc::new(governor)));

    Ok(OpenApiRouter::new()
        .merge(limited)
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me)))
}

fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        // users
        .routes(routes!(user::get_profile, user::update_profile))
        .routes(routes!(user::change_password))
        .routes(routes!(user::list_users, user::create_user))
        .routes(routes!(user::get_user, user::update_user, user::delete_user))
        .routes(routes!(user::list_faculty_students))
        // faculties and groups
        .routes(routes!(faculty::list_faculties))
        .routes(routes!(faculty::create_faculty))
        .routes(routes!(faculty::update_faculty, faculty::delete_faculty))
        .routes(routes!(faculty::list_groups, faculty::create_group))
        .routes(routes!(faculty::update_group, faculty::delete_group))
        // dormitories and rooms
        .routes(routes!(dormitory::list_dormitories))
        .routes(routes!(dormitory::get_dormitory))
        .routes(routes!(dormitory::create_dormitory))
        .routes(routes!(dormitory::update_dormitory, dormitory::delete_dormitory))
        .routes(routes!(dormitory::list_rooms))
        .routes(routes!(
            dormitory::get_room,
            dormitory::update_room,
            dormitory::delete_room
        ))
        .routes(routes!(dormitory::create_room))
        // applications
        .routes(routes!(
            application::create_application,
            application::list_applications
        ))
        .routes(routes!(application::my_applications))
        .routes(routes!(application::get_application))
        .routes(routes!(application::change_application_status))
        // reservations
        .routes(routes!(
            reservation::create_reservation,
            reservation::list_reservations
        ))
        .routes(routes!(reservation::my_reservations))
        .routes(routes!(reservation::get_reservation))
        .routes(routes!(reservation::change_reservation_status))
        // agreements
        .routes(routes!(agreement::create_agreement, agreement::list_agreements))
        .routes(routes!(agreement::my_agreements))
        .routes(routes!(agreement::get_agreement, agreement::update_agreement))
        .routes(routes!(agreement::change_agreement_status))
        // schedule and events
        .routes(routes!(schedule::list_schedule, schedule::create_schedule_entry))
        .routes(routes!(
            schedule::update_schedule_entry,
            schedule::delete_schedule_entry
        ))
        .routes(routes!(event::list_events, event::create_event))
        .routes(routes!(event::update_event, event::delete_event))
        // search and back office
        .routes(routes!(search::search))
        .routes(routes!(admin::get_stats))
}

fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "CORS_ORIGIN".to_string(),
            reason: e.to_string(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}
