//! User handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CurrentUserResponse, NotificationResponse};
use crate::errors::AppResult;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_user))
        .route("/me/notifications", get(list_notifications))
}

/// Current user with role profile fields
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<CurrentUserResponse>> {
    let me = state.user_service.current_user(current_user.id).await?;
    Ok(Json(me))
}

/// Notifications addressed to the current user, oldest first
#[utoipa::path(
    get,
    path = "/users/me/notifications",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<NotificationResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_notifications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let messages = state.user_service.notifications(current_user.id).await?;
    Ok(Json(messages.into_iter().map(NotificationResponse::from).collect()))
}
