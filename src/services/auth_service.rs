//! Authentication service: registration, first-administrator bootstrap,
//! login and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewClientProfile, NewSellerProfile, NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// A new account together with the profile its role needs.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub national_id: Option<String>,
    /// Sellers only; falls back to `address`
    pub zone: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and its role profile atomically.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Create the first administrator. Refused once any account exists.
    async fn bootstrap_admin(&self, email: String, password: String) -> AppResult<User>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Sign a token for `user`.
pub fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// UnitOfWork-backed AuthService
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let role = registration
            .role
            .ok_or_else(|| AppError::validation("role is required"))?;
        let email = normalize_email(&registration.email);

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("email already registered"));
        }

        let address = blank_to_none(registration.address);
        let zone = match role {
            UserRole::Seller => {
                let zone = blank_to_none(registration.zone).or_else(|| address.clone());
                Some(zone.ok_or_else(|| {
                    AppError::validation("zone or address is required for sellers")
                })?)
            }
            UserRole::Client | UserRole::Administrator => None,
        };

        let name = registration.name.trim().to_string();
        let surname = registration.surname.trim().to_string();
        if role != UserRole::Administrator && (name.is_empty() || surname.is_empty()) {
            return Err(AppError::validation("name and surname are required"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let new_user = NewUser {
            email: email.clone(),
            password_hash,
            role,
            is_staff: false,
        };
        let phone = blank_to_none(registration.phone);
        let national_id = blank_to_none(registration.national_id);

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let user = ctx.users().create(new_user).await?;

                    match user.role {
                        UserRole::Client => {
                            ctx.profiles()
                                .create_client(NewClientProfile {
                                    user_id: Some(user.id),
                                    name,
                                    surname,
                                    phone,
                                    email: Some(email),
                                    address,
                                    national_id,
                                })
                                .await?;
                        }
                        UserRole::Seller => {
                            ctx.profiles()
                                .create_seller(NewSellerProfile {
                                    user_id: Some(user.id),
                                    name,
                                    surname,
                                    phone,
                                    email,
                                    zone: zone.unwrap_or_default(),
                                    national_id,
                                })
                                .await?;
                        }
                        UserRole::Administrator => {}
                    }

                    Ok(user)
                })
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    async fn bootstrap_admin(&self, email: String, password: String) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();
        let new_user = NewUser {
            email: normalize_email(&email),
            password_hash,
            role: UserRole::Administrator,
            is_staff: true,
        };

        let user = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    if ctx.users().any_exists().await? {
                        return Err(AppError::validation("a user is already registered"));
                    }
                    ctx.users().create(new_user).await
                })
            })
            .await?;

        tracing::info!(user_id = %user.id, "Administrator bootstrapped");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&normalize_email(&email)).await?;

        // Verify against a real hash even for unknown emails so response
        // timing does not reveal which accounts exist.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid && user.is_active => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
