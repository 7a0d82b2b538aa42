//! Contact request handlers.
//!
//! The caller's identity always comes from the token; no endpoint accepts a
//! user id.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::DETAIL_ACCEPTED;
use crate::domain::{ContactRequestSummary, CreatedRequestResponse, MobileLocalClient};
use crate::errors::AppResult;
use crate::types::{Created, DetailResponse, NoContent};

pub fn contact_request_routes() -> Router<AppState> {
    Router::new()
        .route("/request/create", post(create_request))
        .route("/request/cancel", delete(cancel_request))
        .route("/requests/pending", get(list_pending_requests))
        .route("/request/:id/accept", post(accept_request))
        .route("/mobile-clients", get(find_snapshots))
}

/// Open a contact request for the caller
#[utoipa::path(
    post,
    path = "/request/create",
    tag = "Contact requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Request opened", body = CreatedRequestResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A pending request already exists")
    )
)]
pub async fn create_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Created<CreatedRequestResponse>> {
    let request = state
        .contact_request_service
        .create_request(current_user.id)
        .await?;

    Ok(Created(CreatedRequestResponse::from(request)))
}

/// Cancel the caller's pending request
#[utoipa::path(
    delete,
    path = "/request/cancel",
    tag = "Contact requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Request cancelled"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a client"),
        (status = 404, description = "No client profile or no pending request")
    )
)]
pub async fn cancel_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<NoContent> {
    state
        .contact_request_service
        .cancel_request(current_user.id, current_user.role)
        .await?;

    Ok(NoContent)
}

/// Pending requests for sellers, own requests for clients
#[utoipa::path(
    get,
    path = "/requests/pending",
    tag = "Contact requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requests, newest first", body = Vec<ContactRequestSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrators have no request view")
    )
)]
pub async fn list_pending_requests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContactRequestSummary>>> {
    let requests = state
        .contact_request_service
        .list_pending(current_user.id, current_user.role)
        .await?;

    Ok(Json(
        requests
            .into_iter()
            .map(ContactRequestSummary::from)
            .collect(),
    ))
}

/// Accept a pending request as the calling seller
#[utoipa::path(
    post,
    path = "/request/{id}/accept",
    tag = "Contact requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Contact request id")),
    responses(
        (status = 200, description = "Request accepted", body = DetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a seller"),
        (status = 404, description = "Seller profile, request or client missing")
    )
)]
pub async fn accept_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DetailResponse>> {
    state
        .contact_request_service
        .accept_request(current_user.id, current_user.role, id)
        .await?;

    Ok(Json(DetailResponse::new(DETAIL_ACCEPTED)))
}

#[derive(Debug, Deserialize)]
pub struct NationalIdQuery {
    pub national_id: String,
}

/// Client snapshots taken on acceptance, looked up by national id
#[utoipa::path(
    get,
    path = "/mobile-clients",
    tag = "Contact requests",
    security(("bearer_auth" = [])),
    params(("national_id" = String, Query, description = "Client national id")),
    responses(
        (status = 200, description = "Snapshots, oldest first", body = Vec<MobileLocalClient>),
        (status = 400, description = "Missing or blank national id"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is a client"),
        (status = 404, description = "No snapshot for this national id")
    )
)]
pub async fn find_snapshots(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<NationalIdQuery>,
) -> AppResult<Json<Vec<MobileLocalClient>>> {
    let snapshots = state
        .contact_request_service
        .snapshots_by_national_id(current_user.role, query.national_id)
        .await?;

    Ok(Json(snapshots))
}
