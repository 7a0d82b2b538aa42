//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, contact_request_handler, user_handler};
use crate::domain::{
    ContactRequestSummary, CreatedRequestResponse, CurrentUserResponse, MobileLocalClient,
    NotificationResponse, RequestStatus, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::DetailResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Accounts, profiles and the client/seller contact request workflow"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::bootstrap_admin,
        user_handler::get_current_user,
        user_handler::list_notifications,
        contact_request_handler::create_request,
        contact_request_handler::cancel_request,
        contact_request_handler::list_pending_requests,
        contact_request_handler::accept_request,
        contact_request_handler::find_snapshots,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            CurrentUserResponse,
            RequestStatus,
            CreatedRequestResponse,
            ContactRequestSummary,
            MobileLocalClient,
            NotificationResponse,
            DetailResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::BootstrapAdminRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Current account and notifications"),
        (name = "Contact requests", description = "Client requests and seller acceptance")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
