//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::services::{Registration, TokenResponse};
use crate::types::{Created, DetailResponse};

/// Account registration; profile fields apply to clients and sellers
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// administrator, client or seller (case-insensitive)
    #[schema(example = "client")]
    pub role: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Name is too long"))]
    #[schema(example = "Ana")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "Surname is too long"))]
    #[schema(example = "Gómez")]
    pub surname: String,
    #[validate(length(max = 20, message = "Phone is too long"))]
    #[schema(example = "+54 11 5555 0101")]
    pub phone: Option<String>,
    #[validate(length(max = 150, message = "Address is too long"))]
    pub address: Option<String>,
    #[validate(length(max = 20, message = "National id is too long"))]
    #[schema(example = "30111222")]
    pub national_id: Option<String>,
    /// Sellers only; defaults to the address
    #[validate(length(max = 150, message = "Zone is too long"))]
    pub zone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// First administrator account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BootstrapAdminRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/bootstrap-admin", post(bootstrap_admin))
}

/// Register a user and their role profile
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or profile data already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let role: UserRole = payload
        .role
        .parse()
        .map_err(|e: crate::domain::UnknownRole| AppError::validation(e.to_string()))?;

    let user = state
        .auth_service
        .register(Registration {
            email: payload.email,
            password: payload.password,
            role: Some(role),
            name: payload.name,
            surname: payload.surname,
            phone: payload.phone,
            address: payload.address,
            national_id: payload.national_id,
            zone: payload.zone,
        })
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Login and get a JWT
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Create the first administrator on an empty installation
#[utoipa::path(
    post,
    path = "/auth/bootstrap-admin",
    tag = "Authentication",
    request_body = BootstrapAdminRequest,
    responses(
        (status = 201, description = "Administrator created", body = DetailResponse),
        (status = 400, description = "Validation error or users already exist")
    )
)]
pub async fn bootstrap_admin(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BootstrapAdminRequest>,
) -> AppResult<Created<DetailResponse>> {
    state
        .auth_service
        .bootstrap_admin(payload.email, payload.password)
        .await?;

    Ok(Created(DetailResponse::new("administrator created")))
}
